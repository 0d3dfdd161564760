//! Heuristic evaluation for Gobang board positions
//!
//! Two uses:
//! - `evaluate`: static score of a whole position for the search leaves
//! - `move_score`: line potential of one empty cell, for move ordering

use crate::board::{Board, Pos, Stone};
use crate::rules::{scan_run, DIRECTIONS};

use super::patterns::{line_value, POSITION_WEIGHTS};

/// Evaluate the board from the perspective of the given color.
///
/// Positive values favour `color`. Symmetric:
/// `evaluate(board, Black) == -evaluate(board, White)`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let opponent = color.opponent();
    let position_score = evaluate_positions(board, color) - evaluate_positions(board, opponent);
    let pattern_score = evaluate_patterns(board, color) - evaluate_patterns(board, opponent);
    position_score + pattern_score
}

/// Sum of positional weights under every stone of `color`.
fn evaluate_positions(board: &Board, color: Stone) -> i32 {
    board
        .stones(color)
        .map(|p| POSITION_WEIGHTS[p.row as usize][p.col as usize])
        .sum()
}

/// Line potential of every run of `color`, each run counted once.
///
/// A run is scored from its first stone only: a stone whose predecessor in
/// the scan direction is the same color is skipped.
fn evaluate_patterns(board: &Board, color: Stone) -> i32 {
    let mut score = 0;
    for pos in board.stones(color) {
        for &(dr, dc) in &DIRECTIONS {
            score += evaluate_line(board, pos, dr, dc, color);
        }
    }
    score
}

fn evaluate_line(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let before = pos.offset(-dr, -dc, 1).map(|p| board.get(p));
    if before == Some(color) {
        return 0; // Not the start of this run
    }

    let mut open_ends = u8::from(before == Some(Stone::Empty));
    let mut len = 1;
    let mut next = pos.offset(dr, dc, 1);
    while let Some(p) = next {
        match board.get(p) {
            s if s == color => {
                len += 1;
                next = p.offset(dr, dc, 1);
            }
            Stone::Empty => {
                open_ends += 1;
                break;
            }
            _ => break,
        }
    }
    line_value(len, open_ends)
}

/// Best line potential a `color` stone at the empty `pos` would have.
#[must_use]
pub fn score_cell(board: &Board, pos: Pos, color: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let run = scan_run(board, pos, color, dr, dc);
            line_value(run.len, run.open_ends)
        })
        .max()
        .unwrap_or(0)
}

/// Ordering score of an empty cell: attack plus defence potential.
#[inline]
#[must_use]
pub fn move_score(board: &Board, pos: Pos) -> i32 {
    score_cell(board, pos, Stone::Black) + score_cell(board, pos, Stone::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;
    use crate::search::ZobristTable;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::with_zobrist(ZobristTable::from_seed(12));
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_empty_board_is_even() {
        let board = board_with(&[]);
        assert_eq!(evaluate(&board, Stone::Black), 0);
    }

    #[test]
    fn test_evaluation_symmetric() {
        let board = board_with(&[
            (7, 7, Stone::Black),
            (7, 8, Stone::Black),
            (8, 8, Stone::White),
            (2, 3, Stone::White),
        ]);
        assert_eq!(evaluate(&board, Stone::Black), -evaluate(&board, Stone::White));
    }

    #[test]
    fn test_open_three_beats_scattered() {
        let three = board_with(&[(7, 6, Stone::Black), (7, 7, Stone::Black), (7, 8, Stone::Black)]);
        let scattered = board_with(&[(7, 3, Stone::Black), (7, 7, Stone::Black), (7, 11, Stone::Black)]);
        assert!(evaluate(&three, Stone::Black) > evaluate(&scattered, Stone::Black));
    }

    #[test]
    fn test_run_counted_once() {
        // A lone open two in the corner region scores OPEN_TWO once, plus position
        let board = board_with(&[(1, 1, Stone::White), (1, 2, Stone::White)]);
        let positions = POSITION_WEIGHTS[1][1] + POSITION_WEIGHTS[1][2];
        assert_eq!(evaluate(&board, Stone::White), positions + PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_score_cell_open_four() {
        let board = board_with(&[(5, 5, Stone::White), (5, 6, Stone::White), (5, 7, Stone::White)]);
        assert_eq!(score_cell(&board, Pos::new(5, 8), Stone::White), PatternScore::OPEN_FOUR);
        assert_eq!(score_cell(&board, Pos::new(5, 8), Stone::Black), 0);
        assert_eq!(move_score(&board, Pos::new(5, 8)), PatternScore::OPEN_FOUR);
    }
}
