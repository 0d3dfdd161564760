//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by board hash,
//! enabling reuse of previous search results for positions we've seen before.
//! Entries are advisory: a collision simply overwrites, a miss costs a search.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Pos, Stone};
//! use gobang::search::{TranspositionTable, EntryType};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x123456789ABCDEF0;
//! tt.store(hash, 3, 100, EntryType::Exact, Stone::Black, Some(Pos::new(7, 7)));
//!
//! assert_eq!(tt.probe(hash, 3, -1000, 1000, Stone::Black), Some(100));
//! assert_eq!(tt.probe(hash, 4, -1000, 1000, Stone::Black), None);
//! ```

use crate::board::{Pos, Stone};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth the score was computed with
    pub depth: i8,
    /// Evaluation score
    pub score: i32,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
    /// Color the score is measured for
    pub perspective: Stone,
    /// Best move found for this position
    pub best_move: Option<Pos>,
}

/// Transposition table for caching search results.
///
/// Direct-mapped: each hash maps to exactly one slot. Collisions are
/// resolved by a depth-preferred replacement policy.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Probe the table for a usable score.
    ///
    /// Returns the stored score only when the entry matches the hash and
    /// perspective, was searched at least `depth` deep, and its bound type
    /// settles the current (`alpha`, `beta`) window.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32, perspective: Stone) -> Option<i32> {
        let entry = self.entries[self.slot(hash)]?;

        if entry.hash != hash || entry.perspective != perspective || entry.depth < depth {
            return None;
        }

        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Get best move from the table for move ordering.
    #[must_use]
    pub fn get_best_move(&self, hash: u64) -> Option<Pos> {
        self.entries[self.slot(hash)].and_then(|e| if e.hash == hash { e.best_move } else { None })
    }

    /// Store a position in the table.
    ///
    /// An entry is replaced if the slot is empty, holds the same position,
    /// or the new search is at least as deep as the existing entry.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        score: i32,
        entry_type: EntryType,
        perspective: Stone,
        best_move: Option<Pos>,
    ) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
                perspective,
                best_move,
            });
        }
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt_miss() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.probe(0xABCD, 1, -100, 100, Stone::Black), None);
        assert_eq!(tt.get_best_move(0xABCD), None);
    }

    #[test]
    fn test_tt_exact_hit_requires_depth() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 3, 250, EntryType::Exact, Stone::White, Some(Pos::new(1, 2)));
        assert_eq!(tt.probe(42, 2, -1000, 1000, Stone::White), Some(250));
        assert_eq!(tt.probe(42, 3, -1000, 1000, Stone::White), Some(250));
        assert_eq!(tt.probe(42, 4, -1000, 1000, Stone::White), None);
        assert_eq!(tt.get_best_move(42), Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_tt_perspective_mismatch() {
        let mut tt = TranspositionTable::new(1);
        tt.store(7, 2, 10, EntryType::Exact, Stone::Black, None);
        assert_eq!(tt.probe(7, 1, -100, 100, Stone::White), None);
    }

    #[test]
    fn test_tt_bounds() {
        let mut tt = TranspositionTable::new(1);
        tt.store(9, 2, 500, EntryType::LowerBound, Stone::Black, None);
        assert_eq!(tt.probe(9, 2, 0, 400, Stone::Black), Some(500));
        assert_eq!(tt.probe(9, 2, 0, 600, Stone::Black), None);

        tt.store(9, 2, -50, EntryType::UpperBound, Stone::Black, None);
        assert_eq!(tt.probe(9, 2, 0, 100, Stone::Black), Some(-50));
        assert_eq!(tt.probe(9, 2, -100, 100, Stone::Black), None);
    }

    #[test]
    fn test_tt_depth_preferred_replacement() {
        let mut tt = TranspositionTable::new(1);
        let size = tt.stats().size as u64;
        tt.store(5, 4, 1, EntryType::Exact, Stone::Black, None);
        // Colliding hash with a shallower search does not evict
        tt.store(5 + size, 1, 2, EntryType::Exact, Stone::Black, None);
        assert_eq!(tt.probe(5, 4, -10, 10, Stone::Black), Some(1));
        // A deeper one does
        tt.store(5 + size, 6, 3, EntryType::Exact, Stone::Black, None);
        assert_eq!(tt.probe(5, 4, -10, 10, Stone::Black), None);
        assert_eq!(tt.probe(5 + size, 6, -10, 10, Stone::Black), Some(3));
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(1);
        tt.store(1, 1, 1, EntryType::Exact, Stone::Black, None);
        assert_eq!(tt.stats().used, 1);
        tt.clear();
        assert_eq!(tt.stats().used, 0);
    }
}
