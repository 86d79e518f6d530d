// Turns a found expedition into log lines and a plain-text board sketch.
// This is the display collaborator: it consumes (path, steps, energy) and
// never feeds anything back into the search.
use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, info};

use crate::board::Board;
use crate::hex::Coord;
use crate::search::Expedition;

pub fn summarize_expedition(board: &Board, expedition: &Expedition) {
    info!("Expedition path ({} cells):", expedition.path.len());
    for (index, &coord) in expedition.path.iter().enumerate() {
        let kind = board.kind(coord).map_or("??", |kind| kind.label());
        let note = match board.treasure_index(coord) {
            Some(treasure) => format!("  <- treasure #{}", treasure + 1),
            None => String::new(),
        };
        info!("  {index:>3}: ({q}, {r}) {kind}{note}", q = coord.q, r = coord.r);
    }
    info!("Shortest path: {}",
          expedition.path.iter()
              .map(|coord| format!("({}, {})", coord.q, coord.r))
              .join(" -> "));
    info!("Path length: {}", expedition.path.len());
    info!("Steps taken: {}", expedition.steps);
    info!("Energy used: {}", expedition.energy);
    if cfg!(feature = "visualization_dump") {
        debug!("[VIZ_DATA] {}", serde_json::json!(expedition));
    }
}

/// Plain-text sketch of the board with a path overlaid. Cells show their
/// kind label, prefixed with '@' on the start cell and '*' on path cells.
/// Rows are r values; each q column is four characters wide, so the
/// staggered hex rows line up the way the doubled coordinates do.
pub fn render_board(board: &Board, path: &[Coord]) -> String {
    let on_path: HashSet<Coord> = path.iter().copied().collect();
    let (q_min, q_max) = board
        .cells()
        .map(|(coord, _)| coord.q)
        .minmax()
        .into_option()
        .expect("a validated board has at least the start cell");
    let (r_min, r_max) = board
        .cells()
        .map(|(coord, _)| coord.r)
        .minmax()
        .into_option()
        .expect("a validated board has at least the start cell");

    let mut out = String::new();
    for r in r_min..=r_max {
        let mut line = String::new();
        for q in q_min..=q_max {
            let coord = Coord::new(q, r);
            match board.kind(coord) {
                None => line.push_str("    "),
                Some(kind) => {
                    let mark = if coord == board.start() {
                        '@'
                    } else if on_path.contains(&coord) {
                        '*'
                    } else {
                        ' '
                    };
                    line.push(mark);
                    line.push_str(&format!("{:<3}", kind.label()));
                }
            }
        }
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use crate::board::CellKind;

    use super::*;

    fn line_board() -> Board {
        let cells: FxHashMap<Coord, CellKind> = [
            (Coord::new(0, 0), CellKind::Empty),
            (Coord::new(0, 2), CellKind::Trap2),
            (Coord::new(0, 4), CellKind::Treasure),
        ]
        .into_iter()
        .collect();
        Board::new(cells, Coord::new(0, 0)).unwrap()
    }

    #[test]
    fn test_render_marks_start_and_path() {
        let board = line_board();
        let path = [Coord::new(0, 0), Coord::new(0, 2), Coord::new(0, 4)];
        let art = render_board(&board, &path);
        assert!(art.contains("@."), "start marker missing:\n{art}");
        assert!(art.contains("*T2"), "path marker missing:\n{art}");
        assert!(art.contains("*TR"), "treasure missing:\n{art}");
        // One line per r row, including the empty in-between rows.
        assert_eq!(art.lines().count(), 5);
    }

    #[test]
    fn test_render_without_path() {
        let board = line_board();
        let art = render_board(&board, &[]);
        assert!(art.contains(" T2"));
        assert!(!art.contains('*'));
    }

    #[test]
    fn test_render_reference_board_has_all_kinds() {
        let board = Board::reference();
        let art = render_board(&board, &[]);
        for label in ["OB", "TR", "R1", "R2", "T1", "T2", "T3", "T4"] {
            assert!(art.contains(label), "{label} missing:\n{art}");
        }
        assert!(art.contains('@'));
    }
}
