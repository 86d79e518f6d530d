// Solver implementations to plan a full treasure-collecting expedition.
use log::{info, warn};
use std::time::Instant;

use crate::board::Board;
use crate::search::{self, Expedition};
use crate::simple_search;

pub trait Solver {
    // Name to display for this solver.
    fn name(&self) -> &str;

    // Implementation of the solver.
    fn do_solve(&mut self, board: &Board) -> Option<Expedition>;

    // Wrapper to do_solve, to log timing and outcome information.
    fn solve(&mut self, board: &Board) -> Option<Expedition> {
        let start = Instant::now();
        let expedition = self.do_solve(board);
        info!("Solver {} took {:?}", self.name(), start.elapsed());
        match &expedition {
            Some(expedition) => info!(
                "Solver {name} found a {cells}-cell plan covering {treasures} treasures",
                name = self.name(),
                cells = expedition.path.len(),
                treasures = board.treasure_count()),
            None => warn!("Solver {} did NOT find a plan.", self.name()),
        };
        expedition
    }
}

// Level-order exploration of (position, collected-set) states; the first
// state completing the collection wins, which is also the plan with the
// fewest path cells. No claim about steps or energy optimality.
pub struct BreadthFirstSolver;

// Same search without the bit-mask and hashing optimizations. Mostly useful
// as an oracle when debugging the optimized engine.
pub struct SimpleBreadthFirstSolver;

impl Solver for BreadthFirstSolver {
    fn name(&self) -> &str {
        "breadth-first"
    }

    fn do_solve(&mut self, board: &Board) -> Option<Expedition> {
        search::collect_all_treasures(board)
    }
}

impl Solver for SimpleBreadthFirstSolver {
    fn name(&self) -> &str {
        "simple-breadth-first"
    }

    fn do_solve(&mut self, board: &Board) -> Option<Expedition> {
        simple_search::collect_all_treasures(board)
    }
}
