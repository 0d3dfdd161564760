//! Gobang (five-in-a-row) engine with optional Renju-style restrictions
//!
//! A game engine for 15x15 five-in-a-row:
//! - Black moves first, five in a row wins
//! - Strict mode restricts one side (Black by default): exactly five to win,
//!   no overlines, no double fours, no double live threes, first stone on
//!   the centre
//! - A computer opponent searching under a wall-clock deadline
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Flat board with incremental Zobrist key and undo stack
//! - [`rules`]: Win detection and forbidden moves
//! - [`eval`]: Position evaluation and move-ordering heuristics
//! - [`search`]: Move generation, tactical shortcuts, alpha-beta, caching
//! - [`engine`]: AI engine combining the search phases
//! - [`session`]: Players, turn order, results, undo and state transfer
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gobang::{EngineConfig, Session, Stone};
//!
//! let config = EngineConfig { max_depth: 2, time_budget_ms: 200, ..EngineConfig::default() };
//! let mut session = Session::with_seed_and_config(7, config);
//! session.set_ai_mode(true, "alice");
//! session.add_player("alice");
//! session.add_player("engine");
//!
//! assert!(session.process_move("alice", 7, 7));
//! let reply = session.get_ai_move().unwrap();
//! assert!(session.process_move("engine", reply.row as i32, reply.col as i32));
//! assert_eq!(session.current_player(), Stone::Black);
//! ```
//!
//! # Search Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Kill move (four plus live three, or two live threes)
//! 4. Block the opponent's kill move
//! 5. Opening reply
//! 6. Alpha-Beta search with transposition table

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use rules::RuleSet;
pub use session::{GameResult, Phase, Session, SessionArena, SessionId, SessionState, StateError};
