//! Candidate move generation with heuristic ordering
//!
//! Only empty cells touching a stone are considered, scored by the line
//! potential they hold for both colors and sorted best first so alpha-beta
//! sees the tactically relevant cells early.

use crate::board::{Board, Pos, Stone, CENTER};
use crate::eval::move_score;
use crate::rules::{is_legal_move, RuleSet};

/// A candidate cell and its ordering score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: i32,
}

/// Ordered candidate moves for `color`, at most `limit` of them.
///
/// Cells illegal for `color` are left out. When no neighbour-adjacent cell
/// is legal, every legal empty cell competes instead, so the list is empty
/// only when `color` has no legal move at all.
#[must_use]
pub fn generate_moves(board: &Board, color: Stone, rules: RuleSet, limit: usize) -> Vec<ScoredMove> {
    if board.is_board_empty() {
        return if is_legal_move(board, CENTER, color, rules) {
            vec![ScoredMove { pos: CENTER, score: 0 }]
        } else {
            Vec::new()
        };
    }

    let mut moves = collect(board, color, rules, |pos| board.has_neighbor(pos));
    if moves.is_empty() {
        moves = collect(board, color, rules, |_| true);
    }

    // Stable: equal scores keep row-major order
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves.truncate(limit.max(1));
    moves
}

fn collect(
    board: &Board,
    color: Stone,
    rules: RuleSet,
    keep: impl Fn(Pos) -> bool,
) -> Vec<ScoredMove> {
    board
        .empty_cells()
        .filter(|&pos| keep(pos) && is_legal_move(board, pos, color, rules))
        .map(|pos| ScoredMove {
            pos,
            score: move_score(board, pos),
        })
        .collect()
}

/// Ordered candidate cells for `color`, without truncation.
#[must_use]
pub fn candidates(board: &Board, color: Stone, rules: RuleSet) -> Vec<Pos> {
    generate_moves(board, color, rules, usize::MAX)
        .into_iter()
        .map(|m| m.pos)
        .collect()
}
