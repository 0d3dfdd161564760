//! Search module for the Gobang AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Candidate move generation and ordering
//! - Tactical shortcuts (immediate fives, kill moves)
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod movegen;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use movegen::{candidates, generate_moves, ScoredMove};
pub use threat::{find_block, find_kill_block, find_kill_move, find_winning_cell};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
