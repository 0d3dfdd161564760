//! Game rules for Gobang with an optional Renju-style restricted side
//!
//! This module implements the rule set:
//! - Line scanning shared by rules and heuristics
//! - Win conditions (exactly five for the restricted side, five or more otherwise)
//! - Forbidden moves (overline, double-four, double-three, centre opening)

pub mod forbidden;
pub mod line;
pub mod win;

use serde::{Deserialize, Serialize};

use crate::board::Stone;

// Re-exports for convenient access
pub use forbidden::{count_threats, is_forbidden, is_legal_move, kill_threats, ThreatCount};
pub use line::{classify, scan_run, shapes, LineShape, Run, DIRECTIONS};
pub use win::{check_win, is_winning_move, winning_lines, WinLine};

/// Which rule variant a game is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Strict (Renju-style) mode: forbidden moves and exact-five wins
    pub strict: bool,
    /// The side bound by the strict-mode restrictions
    pub restricted: Stone,
}

impl RuleSet {
    /// Free-style rules: no forbidden moves, five or more wins for both.
    pub const FREESTYLE: RuleSet = RuleSet {
        strict: false,
        restricted: Stone::Black,
    };

    /// Strict rules restricting Black.
    pub const STRICT: RuleSet = RuleSet {
        strict: true,
        restricted: Stone::Black,
    };

    /// True if `color` is subject to forbidden moves and exact-five wins.
    #[inline]
    pub fn restricts(self, color: Stone) -> bool {
        self.strict && color == self.restricted && color != Stone::Empty
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::FREESTYLE
    }
}
