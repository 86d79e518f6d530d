// Board model: cell kinds and their per-visit rules, move legality, and
// fail-fast board construction. A Board is built once and handed to the
// search by shared reference; nothing here mutates after construction.
use std::fs;

use arrayvec::ArrayVec;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::{Coord, Direction};

/// The collected-treasure set is a 64-bit mask, so this is a hard cap.
pub const MAX_TREASURES: usize = 64;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum CellKind {
    #[serde(rename = " ")]
    Empty,
    #[serde(rename = "OB")]
    Obstacle,
    #[serde(rename = "TR")]
    Treasure,
    #[serde(rename = "R1")]
    Reward1,
    #[serde(rename = "R2")]
    Reward2,
    #[serde(rename = "T1")]
    Trap1,
    #[serde(rename = "T2")]
    Trap2,
    #[serde(rename = "T3")]
    Trap3,
    #[serde(rename = "T4")]
    Trap4,
}

/// Rules applied when the search lands on a cell of a given kind.
///
/// The teleporter (Trap3) is absent on purpose: its whole effect is the
/// double hop during neighbor expansion, in place it behaves like Empty.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct CellEffect {
    /// Added to the running step cost for this visit. Normally 1.
    pub step_addend: f64,
    /// Multiplied into the energy multiplier carried by the path.
    pub multiplier_factor: f64,
    /// Whether the cell's coordinate joins the collected-treasure set.
    pub collects_treasure: bool,
    /// Whether the branch ends here with no children.
    pub dead_end: bool,
}

const DEFAULT_EFFECT: CellEffect = CellEffect {
    step_addend: 1.0,
    multiplier_factor: 1.0,
    collects_treasure: false,
    dead_end: false,
};

impl CellKind {
    pub fn effect(&self) -> CellEffect {
        match self {
            CellKind::Treasure => CellEffect { collects_treasure: true, ..DEFAULT_EFFECT },
            CellKind::Trap1 => CellEffect { multiplier_factor: 2.0, ..DEFAULT_EFFECT },
            CellKind::Trap2 => CellEffect { step_addend: 2.0, ..DEFAULT_EFFECT },
            CellKind::Trap4 => CellEffect { dead_end: true, ..DEFAULT_EFFECT },
            CellKind::Reward1 => CellEffect { multiplier_factor: 0.5, ..DEFAULT_EFFECT },
            CellKind::Reward2 => CellEffect { step_addend: 0.5, ..DEFAULT_EFFECT },
            _ => DEFAULT_EFFECT,
        }
    }

    /// Short label for rendering and logs.
    pub fn label(&self) -> &'static str {
        match self {
            CellKind::Empty => ".",
            CellKind::Obstacle => "OB",
            CellKind::Treasure => "TR",
            CellKind::Reward1 => "R1",
            CellKind::Reward2 => "R2",
            CellKind::Trap1 => "T1",
            CellKind::Trap2 => "T2",
            CellKind::Trap3 => "T3",
            CellKind::Trap4 => "T4",
        }
    }
}

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("couldn't read board file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("start cell ({0}, {1}) is not on the board")]
    MissingStart(i32, i32),
    #[error("start cell ({0}, {1}) is an obstacle")]
    ObstacleStart(i32, i32),
    #[error("cell ({0}, {1}) is off the board's parity class, no move can reach it")]
    ParityMismatch(i32, i32),
    #[error("board has {0} treasures, more than the supported {}", MAX_TREASURES)]
    TooManyTreasures(usize),
}

/// One cell of a board file.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct CellSpec {
    pub q: i32,
    pub r: i32,
    pub kind: CellKind,
}

/// On-disk board description, see boards/reference.json for an example.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardFile {
    pub start: Coord,
    pub cells: Vec<CellSpec>,
}

/// Legal unit moves out of a cell, with the direction taken. At most six.
pub type Moves = ArrayVec<(Direction, Coord), 6>;

#[derive(Debug, Clone)]
pub struct Board {
    cells: FxHashMap<Coord, CellKind>,
    // Sorted. A treasure's position in here is its bit in the collected mask.
    treasures: Vec<Coord>,
    start: Coord,
}

impl Board {
    /// Validates and freezes a board. All malformed-input failures happen
    /// here, before any search runs.
    pub fn new(cells: FxHashMap<Coord, CellKind>, start: Coord) -> Result<Board, BoardError> {
        match cells.get(&start) {
            None => return Err(BoardError::MissingStart(start.q, start.r)),
            Some(CellKind::Obstacle) => {
                return Err(BoardError::ObstacleStart(start.q, start.r));
            }
            Some(_) => {}
        }
        // Every direction preserves (q + r) mod 2, so a cell off the start's
        // parity class can never be entered or left.
        let parity = (start.q + start.r).rem_euclid(2);
        for coord in cells.keys() {
            if (coord.q + coord.r).rem_euclid(2) != parity {
                return Err(BoardError::ParityMismatch(coord.q, coord.r));
            }
        }
        let mut treasures: Vec<Coord> = cells
            .iter()
            .filter(|(_, &kind)| kind == CellKind::Treasure)
            .map(|(&coord, _)| coord)
            .collect();
        treasures.sort();
        if treasures.len() > MAX_TREASURES {
            return Err(BoardError::TooManyTreasures(treasures.len()));
        }
        Ok(Board { cells, treasures, start })
    }

    pub fn from_json(json: &str) -> Result<Board, BoardError> {
        let file: BoardFile = serde_json::from_str(json)?;
        Board::from_board_file(&file)
    }

    pub fn from_file(filename: &str) -> Result<Board, BoardError> {
        Board::from_json(&fs::read_to_string(filename)?)
    }

    pub fn from_board_file(file: &BoardFile) -> Result<Board, BoardError> {
        let cells = file
            .cells
            .iter()
            .map(|cell| (Coord::new(cell.q, cell.r), cell.kind))
            .collect();
        Board::new(cells, file.start)
    }

    /// Same cells, different start. Revalidates, since the start drives the
    /// parity class and must land on a non-obstacle cell.
    pub fn with_start(self, start: Coord) -> Result<Board, BoardError> {
        Board::new(self.cells, start)
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    /// Kind of the cell, or None outside the board.
    pub fn kind(&self, coord: Coord) -> Option<CellKind> {
        self.cells.get(&coord).copied()
    }

    /// Destination of a `scale`-hex move, or None when it leaves the board
    /// or lands on an obstacle. Not an error, just a pruning signal.
    pub fn neighbor(&self, from: Coord, direction: Direction, scale: i32) -> Option<Coord> {
        let dest = from.step(direction, scale);
        match self.cells.get(&dest) {
            Some(CellKind::Obstacle) | None => None,
            Some(_) => Some(dest),
        }
    }

    /// The legal unit moves out of `from`, in `Direction::ALL` order.
    pub fn moves(&self, from: Coord) -> Moves {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                self.neighbor(from, direction, 1).map(|dest| (direction, dest))
            })
            .collect()
    }

    /// Treasure coordinates, sorted. Index here == bit in the collected mask.
    pub fn treasures(&self) -> &[Coord] {
        &self.treasures
    }

    /// How many treasures a complete plan must visit.
    pub fn treasure_count(&self) -> usize {
        self.treasures.len()
    }

    pub fn treasure_index(&self, coord: Coord) -> Option<usize> {
        self.treasures.binary_search(&coord).ok()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        self.cells.iter().map(|(&coord, &kind)| (coord, kind))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The 10x6 board the project was developed against, start included.
    pub fn reference() -> Board {
        let cells = REFERENCE_CELLS
            .iter()
            .map(|&(q, r, kind)| (Coord::new(q, r), kind))
            .collect();
        Board::new(cells, REFERENCE_START).expect("reference board is well-formed")
    }
}

pub const REFERENCE_START: Coord = Coord { q: 1, r: 10 };

#[rustfmt::skip]
const REFERENCE_CELLS: [(i32, i32, CellKind); 60] = [
    (1, 0, CellKind::Empty),
    (1, 2, CellKind::Empty),
    (1, 4, CellKind::Obstacle),
    (1, 6, CellKind::Empty),
    (1, 8, CellKind::Empty),
    (1, 10, CellKind::Empty),

    (2, 1, CellKind::Empty),
    (2, 3, CellKind::Empty),
    (2, 5, CellKind::Reward1),
    (2, 7, CellKind::Empty),
    (2, 9, CellKind::Trap2),
    (2, 11, CellKind::Empty),

    (3, 0, CellKind::Empty),
    (3, 2, CellKind::Trap2),
    (3, 4, CellKind::Empty),
    (3, 6, CellKind::Obstacle),
    (3, 8, CellKind::Empty),
    (3, 10, CellKind::Empty),

    (4, 1, CellKind::Empty),
    (4, 3, CellKind::Treasure),
    (4, 5, CellKind::Obstacle),
    (4, 7, CellKind::Empty),
    (4, 9, CellKind::Trap4),
    (4, 11, CellKind::Empty),

    (5, 0, CellKind::Empty),
    (5, 2, CellKind::Obstacle),
    (5, 4, CellKind::Empty),
    (5, 6, CellKind::Obstacle),
    (5, 8, CellKind::Treasure),
    (5, 10, CellKind::Reward1),

    (6, 1, CellKind::Reward2),
    (6, 3, CellKind::Empty),
    (6, 5, CellKind::Trap3),
    (6, 7, CellKind::Empty),
    (6, 9, CellKind::Empty),
    (6, 11, CellKind::Empty),

    (7, 0, CellKind::Empty),
    (7, 2, CellKind::Obstacle),
    (7, 4, CellKind::Obstacle),
    (7, 6, CellKind::Empty),
    (7, 8, CellKind::Trap3),
    (7, 10, CellKind::Empty),

    (8, 1, CellKind::Empty),
    (8, 3, CellKind::Obstacle),
    (8, 5, CellKind::Treasure),
    (8, 7, CellKind::Reward2),
    (8, 9, CellKind::Empty),
    (8, 11, CellKind::Empty),

    (9, 0, CellKind::Empty),
    (9, 2, CellKind::Empty),
    (9, 4, CellKind::Empty),
    (9, 6, CellKind::Trap1),
    (9, 8, CellKind::Obstacle),
    (9, 10, CellKind::Empty),

    (10, 1, CellKind::Empty),
    (10, 3, CellKind::Empty),
    (10, 5, CellKind::Treasure),
    (10, 7, CellKind::Empty),
    (10, 9, CellKind::Empty),
    (10, 11, CellKind::Empty),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(cells: &[(i32, i32, CellKind)], start: (i32, i32)) -> Result<Board, BoardError> {
        let cells = cells
            .iter()
            .map(|&(q, r, kind)| (Coord::new(q, r), kind))
            .collect();
        Board::new(cells, Coord::new(start.0, start.1))
    }

    #[test]
    fn test_missing_start_fails_fast() {
        let result = board_of(&[(0, 0, CellKind::Empty)], (0, 2));
        assert!(matches!(result, Err(BoardError::MissingStart(0, 2))));
    }

    #[test]
    fn test_obstacle_start_fails_fast() {
        let result = board_of(
            &[(0, 0, CellKind::Obstacle), (0, 2, CellKind::Empty)],
            (0, 0),
        );
        assert!(matches!(result, Err(BoardError::ObstacleStart(0, 0))));
    }

    #[test]
    fn test_parity_mismatch_fails_fast() {
        // (1, 0) has odd q+r while the start's class is even.
        let result = board_of(
            &[(0, 0, CellKind::Empty), (1, 0, CellKind::Empty)],
            (0, 0),
        );
        assert!(matches!(result, Err(BoardError::ParityMismatch(1, 0))));
    }

    #[test]
    fn test_neighbor_legality() {
        let board = board_of(
            &[
                (0, 0, CellKind::Empty),
                (0, 2, CellKind::Obstacle),
                (1, 1, CellKind::Empty),
            ],
            (0, 0),
        )
        .unwrap();
        let start = board.start();
        // Off the board.
        assert_eq!(board.neighbor(start, Direction::North, 1), None);
        // Onto an obstacle.
        assert_eq!(board.neighbor(start, Direction::South, 1), None);
        // Fine.
        assert_eq!(
            board.neighbor(start, Direction::SouthEast, 1),
            Some(Coord::new(1, 1))
        );
        let moves = board.moves(start);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0], (Direction::SouthEast, Coord::new(1, 1)));
    }

    #[test]
    fn test_treasure_enumeration_is_sorted() {
        let board = Board::reference();
        assert_eq!(board.treasure_count(), 4);
        let treasures = board.treasures();
        let mut sorted = treasures.to_vec();
        sorted.sort();
        assert_eq!(treasures, &sorted[..]);
        for (index, &coord) in treasures.iter().enumerate() {
            assert_eq!(board.treasure_index(coord), Some(index));
        }
        assert_eq!(board.treasure_index(board.start()), None);
    }

    #[test]
    fn test_reference_board_matches_shipped_file() {
        let board = Board::reference();
        let from_file = Board::from_file("./boards/reference.json")
            .expect("Couldn't load boards/reference.json");
        assert_eq!(board.start(), from_file.start());
        assert_eq!(board.len(), from_file.len());
        for (coord, kind) in board.cells() {
            assert_eq!(from_file.kind(coord), Some(kind), "cell {coord:?}");
        }
    }

    #[test]
    fn test_board_file_round_trip() {
        let file = BoardFile {
            start: Coord::new(0, 0),
            cells: vec![
                CellSpec { q: 0, r: 0, kind: CellKind::Empty },
                CellSpec { q: 0, r: 2, kind: CellKind::Treasure },
            ],
        };
        let json = serde_json::to_string(&file).unwrap();
        let board = Board::from_json(&json).unwrap();
        assert_eq!(board.kind(Coord::new(0, 2)), Some(CellKind::Treasure));
        assert_eq!(board.treasure_count(), 1);
    }

    #[test]
    fn test_effects_match_the_rulebook() {
        assert_eq!(CellKind::Trap2.effect().step_addend, 2.0);
        assert_eq!(CellKind::Reward2.effect().step_addend, 0.5);
        assert_eq!(CellKind::Trap1.effect().multiplier_factor, 2.0);
        assert_eq!(CellKind::Reward1.effect().multiplier_factor, 0.5);
        assert!(CellKind::Trap4.effect().dead_end);
        assert!(CellKind::Treasure.effect().collects_treasure);
        // The teleporter applies nothing in place.
        assert_eq!(CellKind::Trap3.effect(), CellKind::Empty.effect());
    }
}
