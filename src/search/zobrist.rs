//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! This is essential for efficient transposition table lookups during search.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Stone, Pos};
//! use gobang::search::ZobristTable;
//!
//! let zt = ZobristTable::from_seed(7);
//! let mut board = Board::with_zobrist(zt.clone());
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(board.hash(), zt.hash(&board));
//! assert_eq!(zt.update(0, pos, Stone::Black), board.hash());
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Zobrist hash table for position hashing.
///
/// Holds one random value per (cell, color). The table is drawn once per
/// session; the board XORs entries in and out as stones come and go.
#[derive(Clone)]
pub struct ZobristTable {
    /// `keys[cell][0]` for black, `keys[cell][1]` for white
    keys: [[u64; 2]; TOTAL_CELLS],
}

impl ZobristTable {
    /// Create a table from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(&mut StdRng::from_entropy())
    }

    /// Create a reproducible table from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Draw every key from the given generator.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut keys = [[0u64; 2]; TOTAL_CELLS];
        for cell in keys.iter_mut() {
            cell[0] = rng.gen();
            cell[1] = rng.gen();
        }
        Self { keys }
    }

    /// Random value for a stone at a position (zero for `Empty`).
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let cell = &self.keys[pos.to_index()];
        match stone {
            Stone::Black => cell[0],
            Stone::White => cell[1],
            Stone::Empty => 0,
        }
    }

    /// Compute the full hash for a board position.
    ///
    /// Iterates every cell. The board keeps its own key current
    /// incrementally; this exists to rebuild it and to check it.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .cells()
            .iter()
            .enumerate()
            .fold(0u64, |h, (idx, &stone)| h ^ self.key(Pos::from_index(idx), stone))
    }

    /// Incrementally toggle a stone in or out of a hash.
    ///
    /// XOR is its own inverse, so the same call places and removes.
    #[inline]
    #[must_use]
    pub fn update(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.key(pos, stone)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ZobristTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZobristTable").finish_non_exhaustive()
    }
}
