//! Tactical shortcuts tried before the full search
//!
//! - immediate five for either side
//! - kill moves: one stone making (four + live three) or two live threes

use crate::board::{Board, Pos, Stone};
use crate::rules::{is_legal_move, is_winning_move, kill_threats, RuleSet};

/// Empty cells touching a stone, row-major
fn frontier(board: &Board) -> impl Iterator<Item = Pos> + '_ {
    board.empty_cells().filter(move |&p| board.has_neighbor(p))
}

/// First legal cell where `color` completes a five.
#[must_use]
pub fn find_winning_cell(board: &Board, color: Stone, rules: RuleSet) -> Option<Pos> {
    frontier(board).find(|&p| is_winning_move(board, p, color, rules) && is_legal_move(board, p, color, rules))
}

/// First legal kill move for `color`.
///
/// Among kills, a four-plus-three is preferred to a double three since
/// it leaves the defender one fewer option.
#[must_use]
pub fn find_kill_move(board: &Board, color: Stone, rules: RuleSet) -> Option<Pos> {
    let mut double_three = None;
    for pos in frontier(board) {
        let Some(threats) = kill_threats(board, pos, color, rules) else {
            continue;
        };
        if !threats.is_kill() {
            continue;
        }
        if threats.fours >= 1 {
            return Some(pos);
        }
        double_three.get_or_insert(pos);
    }
    double_three
}

/// Cell `defender` should occupy to stop `attacker`'s immediate five.
#[must_use]
pub fn find_block(board: &Board, defender: Stone, rules: RuleSet) -> Option<Pos> {
    let attacker = defender.opponent();
    frontier(board).find(|&p| {
        is_winning_move(board, p, attacker, rules) && is_legal_move(board, p, defender, rules)
    })
}

/// Cell `defender` should occupy to pre-empt `attacker`'s kill move.
#[must_use]
pub fn find_kill_block(board: &Board, defender: Stone, rules: RuleSet) -> Option<Pos> {
    let attacker = defender.opponent();
    find_kill_move(board, attacker, rules).filter(|&p| is_legal_move(board, p, defender, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ZobristTable;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::with_zobrist(ZobristTable::from_seed(33));
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_finds_winning_cell() {
        let board = board_with(&[
            (3, 3, Stone::Black),
            (3, 4, Stone::Black),
            (3, 5, Stone::Black),
            (3, 6, Stone::Black),
            (3, 2, Stone::White),
        ]);
        assert_eq!(find_winning_cell(&board, Stone::Black, RuleSet::FREESTYLE), Some(Pos::new(3, 7)));
        assert_eq!(find_winning_cell(&board, Stone::White, RuleSet::FREESTYLE), None);
        assert_eq!(find_block(&board, Stone::White, RuleSet::FREESTYLE), Some(Pos::new(3, 7)));
    }

    #[test]
    fn test_restricted_overline_is_no_win() {
        // B B B B _ B : the gap makes six, not a win for a restricted Black
        let board = board_with(&[
            (3, 1, Stone::Black),
            (3, 2, Stone::Black),
            (3, 3, Stone::Black),
            (3, 4, Stone::Black),
            (3, 6, Stone::Black),
            (3, 0, Stone::White),
            (3, 7, Stone::White),
        ]);
        assert_eq!(find_winning_cell(&board, Stone::Black, RuleSet::STRICT), None);
        assert_eq!(find_winning_cell(&board, Stone::Black, RuleSet::FREESTYLE), Some(Pos::new(3, 5)));
    }

    #[test]
    fn test_finds_double_three() {
        let board = board_with(&[
            (7, 6, Stone::White),
            (7, 8, Stone::White),
            (6, 7, Stone::White),
            (8, 7, Stone::White),
            (0, 0, Stone::Black),
        ]);
        assert_eq!(find_kill_move(&board, Stone::White, RuleSet::FREESTYLE), Some(Pos::new(7, 7)));
        assert_eq!(find_kill_block(&board, Stone::Black, RuleSet::FREESTYLE), Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_kill_block_skips_forbidden_cell() {
        // White's kill point is a double three for a restricted Black too
        let board = board_with(&[
            (7, 6, Stone::White),
            (7, 8, Stone::White),
            (6, 7, Stone::White),
            (8, 7, Stone::White),
            (6, 6, Stone::Black),
            (8, 8, Stone::Black),
            (6, 8, Stone::Black),
            (8, 6, Stone::Black),
        ]);
        assert_eq!(find_kill_move(&board, Stone::White, RuleSet::STRICT), Some(Pos::new(7, 7)));
        assert!(!is_legal_move(&board, Pos::new(7, 7), Stone::Black, RuleSet::STRICT));
        assert_eq!(find_kill_block(&board, Stone::Black, RuleSet::STRICT), None);
        assert_eq!(find_kill_block(&board, Stone::Black, RuleSet::FREESTYLE), Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_four_three_preferred() {
        let board = board_with(&[
            // double three at (2,10), earlier in row-major order
            (2, 9, Stone::White),
            (2, 11, Stone::White),
            (1, 10, Stone::White),
            (3, 10, Stone::White),
            // four-three around (3,3): row 3 has three, column 3 has two
            (3, 0, Stone::White),
            (3, 1, Stone::White),
            (3, 2, Stone::White),
            (1, 3, Stone::White),
            (2, 3, Stone::White),
            (0, 14, Stone::Black),
        ]);
        assert_eq!(find_kill_move(&board, Stone::White, RuleSet::FREESTYLE), Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_no_kill_on_quiet_board() {
        let board = board_with(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        assert_eq!(find_kill_move(&board, Stone::Black, RuleSet::FREESTYLE), None);
    }
}
