//! Main AI Engine integrating all search components
//!
//! The engine tries cheap tactical answers before falling back to the full
//! search. Priority order:
//!
//! 1. **Immediate win**: a cell completing our five
//! 2. **Block**: the cell completing the opponent's five
//! 3. **Kill move**: our four-plus-three or double three
//! 4. **Kill block**: occupy the opponent's kill cell
//! 5. **Opening**: centre, or a cell next to it, in the first two moves
//! 6. **Alpha-Beta**: iterative deepening search under a deadline
//!
//! # Example
//!
//! ```
//! use gobang::{AIEngine, Board, EngineConfig, Pos, RuleSet, Stone};
//!
//! let config = EngineConfig { max_depth: 2, time_budget_ms: 200, ..EngineConfig::default() };
//! let mut engine = AIEngine::with_config(config);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, Stone::White, RuleSet::FREESTYLE);
//! println!("Best move: {:?} via {:?} in {}ms", result.best_move, result.search_type, result.time_ms);
//! ```

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Pos, Stone, CENTER};
use crate::config::EngineConfig;
use crate::eval::PatternScore;
use crate::rules::{is_legal_move, RuleSet};
use crate::search::{
    find_block, find_kill_block, find_kill_move, find_winning_cell, generate_moves, SearchResult,
    Searcher, TTStats,
};

/// Type of search that produced the result.
///
/// This indicates which phase of the priority list found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes a five for the engine's colour
    ImmediateWin,
    /// Stops the opponent's five
    Block,
    /// Creates a four-plus-three or double three
    KillMove,
    /// Takes the opponent's kill cell
    KillBlock,
    /// Fixed reply in the first two moves
    Opening,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// No legal cell for the engine's colour
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score from the engine's point of view
    pub score: i32,
    /// Phase that found this move
    pub search_type: SearchType,
    /// Deepest completed alpha-beta iteration, 0 for the shortcuts
    pub depth: i8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn shortcut(pos: Pos, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            depth: 0,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 1,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move(start: Instant) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            depth: 0,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }
}

/// Neighbours of the centre tried by the opening reply, in order
const OPENING_REPLIES: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Main AI Engine for Gobang.
///
/// Holds the searcher (and so the transposition table) across moves.
/// Cloning an engine clones its table; the front end relies on this to
/// search on a background thread.
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Create a new AI engine with default settings.
    ///
    /// Default configuration: depth 4, 2.5 s budget, 20 candidates per node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an AI engine with custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            searcher: Searcher::new(config.tt_size_mb, config.max_candidates),
            config,
        }
    }

    /// Get the best move for the given position using the configured budget.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone, rules: RuleSet) -> Option<Pos> {
        self.get_move_with_stats(board, color, rules).best_move
    }

    /// Get the best move with detailed search statistics.
    ///
    /// The deadline is now plus the configured time budget.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone, rules: RuleSet) -> MoveResult {
        let deadline = Instant::now() + self.config.time_budget();
        self.select_move(board, color, rules, deadline)
    }

    /// Choose a move for `color`, searching no later than `deadline`.
    ///
    /// Returns a move whenever `color` has at least one legal cell, even if
    /// the deadline has already passed.
    pub fn select_move(
        &mut self,
        board: &Board,
        color: Stone,
        rules: RuleSet,
        deadline: Instant,
    ) -> MoveResult {
        let start = Instant::now();
        let result = self.select_inner(board, color, rules, deadline, start);
        debug!(
            color = color.name(),
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move selected"
        );
        result
    }

    fn select_inner(
        &mut self,
        board: &Board,
        color: Stone,
        rules: RuleSet,
        deadline: Instant,
        start: Instant,
    ) -> MoveResult {
        let opponent = color.opponent();

        // 1. Immediate win
        if let Some(pos) = find_winning_cell(board, color, rules) {
            return MoveResult::shortcut(pos, PatternScore::WIN, SearchType::ImmediateWin, start);
        }

        // 2. Opponent wins next move unless we take the cell
        if let Some(pos) = find_block(board, color, rules) {
            return MoveResult::shortcut(pos, -PatternScore::FIVE, SearchType::Block, start);
        }

        // 3. Our kill move
        if let Some(pos) = find_kill_move(board, color, rules) {
            return MoveResult::shortcut(pos, PatternScore::OPEN_FOUR, SearchType::KillMove, start);
        }

        // 4. Opponent's kill move
        if let Some(pos) = find_kill_block(board, color, rules) {
            return MoveResult::shortcut(pos, -PatternScore::OPEN_FOUR, SearchType::KillBlock, start);
        }
        debug!(opponent = opponent.name(), "no tactical shortcut");

        // 5. Opening
        if let Some(pos) = self.opening_move(board, color, rules) {
            return MoveResult::shortcut(pos, 0, SearchType::Opening, start);
        }

        // 6. Full search on a scratch copy
        if generate_moves(board, color, rules, 1).is_empty() {
            return MoveResult::no_move(start);
        }
        let mut work_board = board.clone();
        let result = self
            .searcher
            .search(&mut work_board, color, rules, self.config.max_depth, deadline);
        MoveResult::from_alphabeta(result, start)
    }

    /// Centre on an (almost) empty board, else the first free neighbour of it.
    fn opening_move(&self, board: &Board, color: Stone, rules: RuleSet) -> Option<Pos> {
        if board.move_count() > 1 {
            return None;
        }
        if is_legal_move(board, CENTER, color, rules) {
            return Some(CENTER);
        }
        OPENING_REPLIES
            .iter()
            .filter_map(|&(dr, dc)| CENTER.offset(dr, dc, 1))
            .find(|&p| is_legal_move(board, p, color, rules))
    }

    /// Replace the configuration. Resizes the table only if its size changed.
    pub fn set_config(&mut self, config: EngineConfig) {
        let config = config.sanitized();
        if config.tt_size_mb != self.config.tt_size_mb {
            self.searcher = Searcher::new(config.tt_size_mb, config.max_candidates);
        } else {
            self.searcher.set_max_candidates(config.max_candidates);
        }
        self.config = config;
    }

    /// Set maximum search depth.
    pub fn set_max_depth(&mut self, depth: i8) {
        self.config.max_depth = depth.max(1);
    }

    /// Set per-move time budget.
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.config.time_budget_ms = time_ms;
    }

    /// Clear the transposition table.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn max_depth(&self) -> i8 {
        self.config.max_depth
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
