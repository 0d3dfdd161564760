//! Board representation for Gobang

pub mod board;


// Re-exports
pub use board::Board;

use serde::{Deserialize, Serialize};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Centre cell, the restricted side's mandatory first move under strict rules
pub const CENTER: Pos = Pos { row: 7, col: 7 };

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Upper-case name used in results and logs
    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "BLACK",
            Stone::White => "WHITE",
            Stone::Empty => "EMPTY",
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Build a position from untrusted coordinates
    #[inline]
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Step `dist` cells along (dr, dc), if still on the board
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, dist: i32) -> Option<Pos> {
        Self::checked(self.row as i32 + dr * dist, self.col as i32 + dc * dist)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
