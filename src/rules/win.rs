//! Win condition checking
//!
//! A run of five or more wins. Under strict rules the restricted side must
//! make exactly five; its overlines are not wins.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};

use super::line::{scan_run, DIRECTIONS};
use super::RuleSet;

/// Endpoints of a winning run, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub start: Pos,
    pub end: Pos,
}

#[inline]
fn is_winning_len(len: usize, color: Stone, rules: RuleSet) -> bool {
    if rules.restricts(color) {
        len == 5
    } else {
        len >= 5
    }
}

/// Check whether the stone at `pos` completes a winning run.
///
/// Only the 4 lines through `pos` are examined. Returns the run endpoints
/// on a win. An empty `pos` never wins.
#[must_use]
pub fn check_win(board: &Board, pos: Pos, rules: RuleSet) -> Option<WinLine> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }
    DIRECTIONS.iter().find_map(|&(dr, dc)| {
        let run = scan_run(board, pos, color, dr, dc);
        is_winning_len(run.len, color, rules).then_some(WinLine {
            start: run.start,
            end: run.end,
        })
    })
}

/// Would placing `color` at the empty `pos` win on the spot?
#[inline]
#[must_use]
pub fn is_winning_move(board: &Board, pos: Pos, color: Stone, rules: RuleSet) -> bool {
    board.is_empty(pos)
        && DIRECTIONS
            .iter()
            .any(|&(dr, dc)| is_winning_len(scan_run(board, pos, color, dr, dc).len, color, rules))
}

/// Every winning run on the board, each reported once from its start.
#[must_use]
pub fn winning_lines(board: &Board, rules: RuleSet) -> Vec<(Stone, WinLine)> {
    let mut lines = Vec::new();
    for color in [Stone::Black, Stone::White] {
        for pos in board.stones(color) {
            for &(dr, dc) in &DIRECTIONS {
                let run = scan_run(board, pos, color, dr, dc);
                if run.start == pos && is_winning_len(run.len, color, rules) {
                    lines.push((color, WinLine { start: run.start, end: run.end }));
                }
            }
        }
    }
    lines
}
