use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};

use hexhunt::board::{Board, BoardError};
use hexhunt::hex::Coord;
use hexhunt::report::{render_board, summarize_expedition};
use hexhunt::solvers::{BreadthFirstSolver, SimpleBreadthFirstSolver, Solver};

#[derive(ValueEnum, Clone)]
enum SolverName {
    /// Optimized breadth-first engine.
    BreadthFirst,
    /// Unoptimized engine, mostly useful to debug the optimized one.
    SimpleBreadthFirst,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Solver implementation to use to find an expedition.
    #[arg(short, long, value_enum, default_value_t = SolverName::BreadthFirst)]
    solver: SolverName,

    /// JSON board file to hunt on; uses the built-in board when missing.
    #[arg(short, long)]
    board: Option<String>,

    /// Start cell override, as "q,r".
    #[arg(long)]
    start: Option<String>,

    /// Print the board with the expedition overlaid.
    #[arg(long)]
    render: bool,
}

fn new_solver(cli: &Cli) -> Box<dyn Solver> {
    match cli.solver {
        SolverName::BreadthFirst => Box::new(BreadthFirstSolver),
        SolverName::SimpleBreadthFirst => Box::new(SimpleBreadthFirstSolver),
    }
}

fn parse_start(spec: &str) -> Option<Coord> {
    let (q, r) = spec.split_once(',')?;
    let q = q.trim().parse().ok()?;
    let r = r.trim().parse().ok()?;
    Some(Coord::new(q, r))
}

fn load_board(cli: &Cli) -> Result<Board, BoardError> {
    let board = match &cli.board {
        Some(filename) => {
            info!("Loading board from {filename}");
            Board::from_file(filename)?
        }
        None => {
            info!("Using the built-in reference board.");
            Board::reference()
        }
    };
    match &cli.start {
        Some(spec) => {
            let start = parse_start(spec)
                .expect("--start must look like \"q,r\"");
            board.with_start(start)
        }
        None => Ok(board),
    }
}

fn main() {
    // Init logger with default value of info.
    // This can be overriden with RUST_LOG env var.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let board = match load_board(&cli) {
        Ok(board) => board,
        Err(err) => {
            error!("Bad board:");
            error!("  {}", err);
            std::process::exit(2);
        }
    };
    info!("Board has {cells} cells, {treasures} treasures; starting on ({q}, {r})",
          cells = board.len(),
          treasures = board.treasure_count(),
          q = board.start().q,
          r = board.start().r);

    let mut solver = new_solver(&cli);
    match solver.solve(&board) {
        Some(expedition) => {
            summarize_expedition(&board, &expedition);
            if cli.render {
                println!("{}", render_board(&board, &expedition.path));
            }
        }
        None => {
            error!("No expedition can collect every treasure on this board.");
            std::process::exit(1);
        }
    }
}
