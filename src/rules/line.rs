//! Contiguous-run scanning along the four line directions

use crate::board::{Board, Pos, Stone};

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Farthest cell examined on each side of the centre
const SCAN_LIMIT: i32 = 5;

/// A contiguous run of one color through a cell, in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Stones in the run, the centre included
    pub len: usize,
    /// Number of empty cells directly beyond the two ends (0, 1 or 2)
    pub open_ends: u8,
    /// First stone of the run (negative side)
    pub start: Pos,
    /// Last stone of the run (positive side)
    pub end: Pos,
}

/// Shape a run takes after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    None,
    /// Exactly three with both extension cells empty
    LiveThree,
    /// Exactly four with at least one extension cell empty
    Four,
    /// Exactly five
    Five,
    /// Six or more
    Overline,
}

/// Scan the run of `color` through `pos` along (dr, dc).
///
/// The cell at `pos` is treated as holding `color` and is never read, so
/// the same scan serves a stone already placed and a hypothetical one.
pub fn scan_run(board: &Board, pos: Pos, color: Stone, dr: i32, dc: i32) -> Run {
    let (fwd, fwd_open) = extend(board, pos, color, dr, dc);
    let (back, back_open) = extend(board, pos, color, -dr, -dc);

    Run {
        len: 1 + fwd + back,
        open_ends: u8::from(fwd_open) + u8::from(back_open),
        start: pos.offset(-dr, -dc, back as i32).unwrap_or(pos),
        end: pos.offset(dr, dc, fwd as i32).unwrap_or(pos),
    }
}

/// Count same-color stones stepping away from `pos`, and whether the
/// first cell past them is empty.
fn extend(board: &Board, pos: Pos, color: Stone, dr: i32, dc: i32) -> (usize, bool) {
    let mut count = 0;
    for i in 1..=SCAN_LIMIT {
        match pos.offset(dr, dc, i).map(|p| board.get(p)) {
            Some(s) if s == color => count += 1,
            Some(Stone::Empty) => return (count, true),
            _ => return (count, false),
        }
    }
    (count, false)
}

/// Classify a run the way the forbidden-move rule sees it.
pub fn classify(run: &Run) -> LineShape {
    match run.len {
        n if n > 5 => LineShape::Overline,
        5 => LineShape::Five,
        4 if run.open_ends >= 1 => LineShape::Four,
        3 if run.open_ends == 2 => LineShape::LiveThree,
        _ => LineShape::None,
    }
}

/// Shapes in all four directions for a (hypothetical) stone at `pos`.
pub fn shapes(board: &Board, pos: Pos, color: Stone) -> [LineShape; 4] {
    DIRECTIONS.map(|(dr, dc)| classify(&scan_run(board, pos, color, dr, dc)))
}
