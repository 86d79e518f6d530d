// Treasure-collecting breadth-first search.
//
// The search state is not just a position: it carries the set of treasures
// already picked up, and energy accumulation depends on the increments of
// earlier steps. Frontier order is plain FIFO, so the first state completing
// the treasure set is the one with the fewest path cells, not the cheapest
// one in steps or energy.
use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::board::{Board, CellKind};
use crate::hex::{Coord, Direction};

/// Bit i set <=> the treasure at `Board::treasures()[i]` was picked up.
pub type TreasureMask = u64;

// TODO: consider packing the visited key into a single u128?
type VisitedKey = (Coord, TreasureMask);

/// A complete plan: every treasure visited at least once, with the step and
/// energy costs accumulated along that exact path.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Expedition {
    pub path: Vec<Coord>,
    pub steps: f64,
    pub energy: f64,
}

#[derive(Debug, Clone)]
struct SearchState {
    position: Coord,
    // From the start cell, inclusive. Owned per state, never aliased.
    path: Vec<Coord>,
    collected: TreasureMask,
    steps: f64,
    energy: f64,
    // In effect for the next energy increment, until a trap or reward
    // changes it again.
    energy_multiplier: f64,
    // The previous increment is the base of the next one, which is what
    // makes energy history-dependent rather than edge-weighted.
    previous_delta: f64,
}

impl SearchState {
    fn initial(start: Coord) -> Self {
        SearchState {
            position: start,
            path: vec![start],
            collected: 0,
            // Entering the start cell already costs one unit of each.
            steps: 1.0,
            energy: 1.0,
            energy_multiplier: 1.0,
            previous_delta: 1.0,
        }
    }

    fn key(&self) -> VisitedKey {
        (self.position, self.collected)
    }
}

/// What dequeuing a state resolved to, once its cell's rules were applied.
enum Expansion {
    /// This cell completed the treasure set.
    Goal(Expedition),
    /// Keep exploring from the updated state.
    Expand(SearchState),
    /// Dead end, no children.
    Prune,
}

pub struct TreasureSearch<'a> {
    board: &'a Board,
    frontier: VecDeque<SearchState>,
    visited: FxHashSet<VisitedKey>,
}

/// First plan (in breadth-first order) that visits every treasure on the
/// board, or None when no such plan exists.
pub fn collect_all_treasures(board: &Board) -> Option<Expedition> {
    TreasureSearch::new(board).run()
}

impl<'a> TreasureSearch<'a> {
    pub fn new(board: &'a Board) -> Self {
        TreasureSearch {
            board,
            frontier: VecDeque::new(),
            visited: FxHashSet::default(),
        }
    }

    pub fn run(&mut self) -> Option<Expedition> {
        self.frontier.push_back(SearchState::initial(self.board.start()));
        while let Some(state) = self.frontier.pop_front() {
            if !self.visited.insert(state.key()) {
                // First dequeue of a (position, collected) key wins.
                continue;
            }
            match self.apply_cell(state) {
                Expansion::Goal(expedition) => return Some(expedition),
                Expansion::Expand(state) => self.expand(state),
                Expansion::Prune => {}
            }
        }
        None
    }

    /// Apply the current cell's rules: treasure pickup, multiplier changes,
    /// dead ends, then the steps/energy accumulation. The goal check comes
    /// before the accumulation, so the cell that completes the set never
    /// charges its own traversal cost.
    fn apply_cell(&self, mut state: SearchState) -> Expansion {
        let kind = match self.board.kind(state.position) {
            Some(kind) => kind,
            None => return Expansion::Prune,
        };
        let effect = kind.effect();
        if effect.dead_end {
            return Expansion::Prune;
        }
        if effect.collects_treasure {
            let index = self
                .board
                .treasure_index(state.position)
                .expect("treasure cell missing from the board's enumeration");
            state.collected |= 1 << index;
        }
        state.energy_multiplier *= effect.multiplier_factor;
        if state.collected.count_ones() as usize == self.board.treasure_count() {
            return Expansion::Goal(Expedition {
                path: state.path,
                steps: state.steps,
                energy: state.energy,
            });
        }
        let delta = state.previous_delta * state.energy_multiplier;
        state.steps += effect.step_addend;
        state.energy += delta;
        state.previous_delta = delta;
        Expansion::Expand(state)
    }

    /// Queue a child for each legal move out of the state's cell, resolving
    /// teleporter landings first. Children carry the accumulators as they
    /// stand; the child's own cell applies its rules when dequeued.
    fn expand(&mut self, state: SearchState) {
        for (direction, neighbor) in self.board.moves(state.position) {
            if self.visited.contains(&(neighbor, state.collected)) {
                continue;
            }
            let segment = resolve_move(self.board, neighbor, direction);
            let mut child = state.clone();
            child.position = segment[segment.len() - 1];
            child.path.extend_from_slice(&segment);
            self.frontier.push_back(child);
        }
    }

    #[cfg(test)]
    fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

/// Two-phase move resolution: landing on a teleporter carries the traveler a
/// second hex in the same direction when that landing is legal, and the
/// teleporter's in-place rules are bypassed. An illegal double hop falls back
/// to the plain single-cell move. Returns the path segment to append.
fn resolve_move(board: &Board, cell: Coord, direction: Direction) -> ArrayVec<Coord, 2> {
    let mut segment = ArrayVec::new();
    segment.push(cell);
    if board.kind(cell) == Some(CellKind::Trap3) {
        if let Some(landing) = board.neighbor(cell, direction, 2) {
            segment.push(landing);
        }
    }
    segment
}
