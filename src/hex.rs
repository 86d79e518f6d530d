// Hex geometry in doubled coordinates, integer arithmetic only.
// The coordinate system is based on https://www.redblobgames.com/grids/hexagons/
// (Doubled Coordinates section).
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Copy, Clone)]
pub struct Coord {
    pub q: i32,
    pub r: i32,
}

impl Coord {
    pub fn new(q: i32, r: i32) -> Self {
        Coord { q, r }
    }

    /// Destination after moving `scale` hexes in `direction` (scale 2 is the
    /// teleporter hop).
    pub fn step(&self, direction: Direction, scale: i32) -> Coord {
        let (dq, dr) = direction.delta();
        Coord {
            q: self.q + dq * scale,
            r: self.r + dr * scale,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Direction {
    North,
    South,
    NorthWest,
    SouthWest,
    NorthEast,
    SouthEast,
}

impl Direction {
    /// All six neighbor directions. The ordering matches the neighbor table
    /// the boards were authored against, so breadth-first tie-breaking (and
    /// therefore the first plan found) is reproducible.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
        Direction::SouthEast,
    ];

    /// (dq, dr) offset of one move in this direction. Every direction moves
    /// both offsets in a fixed combination, which keeps adjacency integral.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -2),
            Direction::South => (0, 2),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_negates_delta() {
        for direction in Direction::ALL {
            let (dq, dr) = direction.delta();
            assert_eq!(direction.opposite().delta(), (-dq, -dr),
                       "direction {direction:?}");
        }
    }

    #[test]
    fn test_step_then_opposite_returns() {
        let origin = Coord::new(3, 7);
        for direction in Direction::ALL {
            let there = origin.step(direction, 1);
            assert_eq!(there.step(direction.opposite(), 1), origin,
                       "direction {direction:?}");
        }
    }

    #[test]
    fn test_step_preserves_parity() {
        let origin = Coord::new(2, 5);
        for direction in Direction::ALL {
            for scale in [1, 2] {
                let there = origin.step(direction, scale);
                assert_eq!((there.q + there.r).rem_euclid(2),
                           (origin.q + origin.r).rem_euclid(2),
                           "direction {direction:?}, scale {scale}");
            }
        }
    }

    #[test]
    fn test_directions_are_distinct() {
        for a in Direction::ALL {
            for b in Direction::ALL {
                if a != b {
                    assert_ne!(a.delta(), b.delta());
                }
            }
        }
    }
}
