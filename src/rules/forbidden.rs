//! Forbidden move rules for the restricted side under strict mode
//!
//! A placement by the restricted side is forbidden when it makes:
//! - an overline (six or more in a row),
//! - two or more fours in different directions,
//! - two or more live threes in different directions.
//!
//! A placement that makes exactly five wins and is never forbidden.
//! The restricted side's first stone must also go on the centre point.

use crate::board::{Board, Pos, Stone, CENTER};

use super::line::{shapes, LineShape};
use super::RuleSet;

/// Threat shapes a single placement would create, one per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreatCount {
    pub fives: u8,
    pub overlines: u8,
    pub fours: u8,
    pub live_threes: u8,
}

impl ThreatCount {
    /// Four plus live three, or two live threes: hard to defend.
    #[inline]
    pub fn is_kill(&self) -> bool {
        (self.fours >= 1 && self.live_threes >= 1) || self.live_threes >= 2
    }
}

/// Tally the shapes created by a hypothetical `color` stone at `pos`.
///
/// Reads the board only; nothing is placed.
pub fn count_threats(board: &Board, pos: Pos, color: Stone) -> ThreatCount {
    let mut count = ThreatCount::default();
    for shape in shapes(board, pos, color) {
        match shape {
            LineShape::Five => count.fives += 1,
            LineShape::Overline => count.overlines += 1,
            LineShape::Four => count.fours += 1,
            LineShape::LiveThree => count.live_threes += 1,
            LineShape::None => {}
        }
    }
    count
}

/// Check if placing `color` at `pos` is forbidden under `rules`.
///
/// Only the restricted side in strict mode can be forbidden anything.
#[must_use]
pub fn is_forbidden(board: &Board, pos: Pos, color: Stone, rules: RuleSet) -> bool {
    if !rules.restricts(color) {
        return false;
    }

    // Opening stone goes on the centre while the centre is free
    if board.is_empty(CENTER) && pos != CENTER && board.stones(color).next().is_none() {
        return true;
    }

    let threats = count_threats(board, pos, color);
    if threats.fives > 0 {
        return false;
    }
    threats.overlines > 0 || threats.fours >= 2 || threats.live_threes >= 2
}

/// Check if a move is legal: on an empty cell and not forbidden.
#[must_use]
pub fn is_legal_move(board: &Board, pos: Pos, color: Stone, rules: RuleSet) -> bool {
    board.is_empty(pos) && !is_forbidden(board, pos, color, rules)
}

/// Threat tally for a kill-move probe, `None` if the move is illegal.
pub fn kill_threats(board: &Board, pos: Pos, color: Stone, rules: RuleSet) -> Option<ThreatCount> {
    is_legal_move(board, pos, color, rules).then(|| count_threats(board, pos, color))
}
