use criterion::{criterion_group, criterion_main, Criterion};

use hexhunt::board::Board;
use hexhunt::solvers::{BreadthFirstSolver, SimpleBreadthFirstSolver, Solver};

fn make_board() -> Board {
    Board::reference()
}

fn bench_board_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_loading");
    group.bench_function("built-in board", |b| b.iter(Board::reference));
    group.bench_function("board file", |b| b.iter(|| {
        Board::from_file("./boards/reference.json")
            .expect("Couldn't read board file")
    }));
    group.finish();
}

fn bench_treasure_search(c: &mut Criterion) {
    let board = make_board();
    let mut group = c.benchmark_group("treasure_search");
    group.bench_function("simple search", |b| b.iter(|| {
        let mut solver = SimpleBreadthFirstSolver;
        solver.do_solve(&board)
    }));
    group.bench_function("optimized search", |b| b.iter(|| {
        let mut solver = BreadthFirstSolver;
        solver.do_solve(&board)
    }));
    group.finish();
}

criterion_group!{
    name = benches;
    // Limit sample size given the slow processing. Results will be noisy.
    config = Criterion::default().sample_size(50);
    targets = bench_board_loading, bench_treasure_search,
}
criterion_main!(benches);
