//! Pattern scores for Gobang evaluation
//!
//! Line-potential values shared by the static evaluation and move ordering,
//! plus the positional weight table.

use crate::board::BOARD_SIZE;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Terminal score for a completed five
    pub const WIN: i32 = 1_000_000;

    /// Five or more in a line
    pub const FIVE: i32 = 500_000;
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i32 = 50_000;
    /// Blocked four: XOOOO_ or _OOOOX
    pub const BLOCKED_FOUR: i32 = 500;
    /// Open three: _OOO_
    pub const OPEN_THREE: i32 = 200;
    /// Blocked three: XOOO_ or _OOOX
    pub const BLOCKED_THREE: i32 = 10;
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 5;
}

/// Value of a contiguous run given how many of its ends are open.
#[inline]
pub fn line_value(len: usize, open_ends: u8) -> i32 {
    match (len, open_ends) {
        (5.., _) => PatternScore::FIVE,
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::BLOCKED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::BLOCKED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        _ => 0,
    }
}

/// Positional weight per cell: 7 at the centre, falling by one per ring to 0 at the edge.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = build_position_weights();

const fn build_position_weights() -> [[i32; BOARD_SIZE]; BOARD_SIZE] {
    let center = (BOARD_SIZE / 2) as i32;
    let mut table = [[0i32; BOARD_SIZE]; BOARD_SIZE];
    let mut r = 0;
    while r < BOARD_SIZE {
        let mut c = 0;
        while c < BOARD_SIZE {
            let dr = (r as i32 - center).abs();
            let dc = (c as i32 - center).abs();
            let ring = if dr > dc { dr } else { dc };
            table[r][c] = center - ring;
            c += 1;
        }
        r += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::WIN > PatternScore::FIVE);
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::BLOCKED_FOUR);
        assert!(PatternScore::BLOCKED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::BLOCKED_THREE);
        assert!(PatternScore::BLOCKED_THREE > PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_line_value_lookup() {
        assert_eq!(line_value(6, 0), PatternScore::FIVE);
        assert_eq!(line_value(4, 2), PatternScore::OPEN_FOUR);
        assert_eq!(line_value(4, 0), 0);
        assert_eq!(line_value(2, 1), 0);
        assert_eq!(line_value(1, 2), 0);
    }

    #[test]
    fn test_position_weights() {
        assert_eq!(POSITION_WEIGHTS[7][7], 7);
        assert_eq!(POSITION_WEIGHTS[0][0], 0);
        assert_eq!(POSITION_WEIGHTS[14][7], 0);
        assert_eq!(POSITION_WEIGHTS[6][8], 6);
    }
}
