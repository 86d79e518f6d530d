// Implementation of search.rs, without optimizations: the collected set is a
// real set of coordinates instead of a bit mask, and the visited keys go in
// std collections. Kept as a correctness oracle for the optimized engine.
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::board::{Board, CellKind};
use crate::hex::{Coord, Direction};
use crate::search::Expedition;

// BTreeSet rather than HashSet so the visited key stays hashable.
type Collected = BTreeSet<Coord>;

#[derive(Debug, Clone)]
struct SimpleState {
    position: Coord,
    path: Vec<Coord>,
    collected: Collected,
    steps: f64,
    energy: f64,
    energy_multiplier: f64,
    previous_delta: f64,
}

pub fn collect_all_treasures(board: &Board) -> Option<Expedition> {
    let total = board.treasure_count();
    let start = board.start();
    let mut queue: VecDeque<SimpleState> = VecDeque::new();
    queue.push_back(SimpleState {
        position: start,
        path: vec![start],
        collected: Collected::new(),
        steps: 1.0,
        energy: 1.0,
        energy_multiplier: 1.0,
        previous_delta: 1.0,
    });
    let mut visited: HashSet<(Coord, Collected)> = HashSet::new();

    while let Some(mut state) = queue.pop_front() {
        if !visited.insert((state.position, state.collected.clone())) {
            continue;
        }

        let kind = board
            .kind(state.position)
            .expect("queued a cell that is not on the board");
        let mut step_addend = 1.0;
        match kind {
            CellKind::Treasure => {
                state.collected.insert(state.position);
            }
            CellKind::Trap1 => state.energy_multiplier *= 2.0,
            CellKind::Trap2 => step_addend = 2.0,
            CellKind::Trap4 => continue, // Stop searching this branch.
            CellKind::Reward1 => state.energy_multiplier /= 2.0,
            CellKind::Reward2 => step_addend = 0.5,
            _ => {}
        }

        if state.collected.len() == total {
            return Some(Expedition {
                path: state.path,
                steps: state.steps,
                energy: state.energy,
            });
        }

        let delta = state.previous_delta * state.energy_multiplier;
        state.steps += step_addend;
        state.energy += delta;
        state.previous_delta = delta;

        for direction in Direction::ALL {
            let neighbor = match board.neighbor(state.position, direction, 1) {
                Some(neighbor) => neighbor,
                None => continue,
            };
            if visited.contains(&(neighbor, state.collected.clone())) {
                continue;
            }
            let mut child = state.clone();
            child.path.push(neighbor);
            if board.kind(neighbor) == Some(CellKind::Trap3) {
                if let Some(landing) = board.neighbor(neighbor, direction, 2) {
                    child.position = landing;
                    child.path.push(landing);
                    queue.push_back(child);
                    continue;
                }
            }
            child.position = neighbor;
            queue.push_back(child);
        }
    }

    None
}
