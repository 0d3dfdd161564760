//! Alpha-Beta search with iterative deepening and transposition table
//!
//! Plain minimax with alpha-beta pruning, scored from the searching side's
//! point of view. Iterative deepening runs depth 1, 2, ... up to the
//! configured maximum; a depth that runs past the deadline is discarded and
//! the move from the last completed depth is returned.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use gobang::board::{Board, Stone, CENTER};
//! use gobang::rules::RuleSet;
//! use gobang::search::Searcher;
//!
//! let mut searcher = Searcher::new(1, 20);
//! let mut board = Board::new();
//! board.place_stone(CENTER, Stone::Black);
//!
//! let deadline = Instant::now() + Duration::from_millis(500);
//! let result = searcher.search(&mut board, Stone::White, RuleSet::FREESTYLE, 2, deadline);
//! assert!(result.best_move.is_some());
//! ```

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, PatternScore};
use crate::rules::{check_win, RuleSet};

use super::movegen::generate_moves;
use super::{EntryType, TTStats, TranspositionTable};

/// Infinity score for alpha-beta bounds
const INF: i32 = PatternScore::WIN + 1;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    /// TT score hit rate in percent
    #[must_use]
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score of the best move
    pub score: i32,
    /// Deepest fully completed iteration, 0 if none finished in time
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Iterative-deepening alpha-beta searcher.
///
/// Owns the transposition table so entries survive between moves of the
/// same game. Call [`Searcher::clear_tt`] when the rules or the game change.
#[derive(Debug, Clone)]
pub struct Searcher {
    tt: TranspositionTable,
    max_candidates: usize,
    // Per-search state
    rules: RuleSet,
    ai: Stone,
    deadline: Option<Instant>,
    aborted: bool,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a new searcher.
    ///
    /// * `tt_size_mb` - Size of transposition table in megabytes
    /// * `max_candidates` - Children expanded per node, best-ordered first
    #[must_use]
    pub fn new(tt_size_mb: usize, max_candidates: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_size_mb),
            max_candidates: max_candidates.max(1),
            rules: RuleSet::default(),
            ai: Stone::Black,
            deadline: None,
            aborted: false,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Change how many children each node expands.
    pub fn set_max_candidates(&mut self, max_candidates: usize) {
        self.max_candidates = max_candidates.max(1);
    }

    /// Search for the best move for `color` on `board`.
    ///
    /// The board is mutated during the search but restored before return.
    /// Always yields a move when `color` has any legal cell: if not even
    /// depth 1 completes, the first ordered candidate is returned.
    pub fn search(
        &mut self,
        board: &mut Board,
        color: Stone,
        rules: RuleSet,
        max_depth: i8,
        deadline: Instant,
    ) -> SearchResult {
        self.rules = rules;
        self.ai = color;
        self.deadline = Some(deadline);
        self.aborted = false;
        self.nodes = 0;
        self.stats = SearchStats::default();

        let mut best = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
        };

        for depth in 1..=max_depth.max(1) {
            if Instant::now() >= deadline {
                break;
            }
            let Some((pos, score)) = self.search_root(board, depth) else {
                break;
            };
            best.best_move = Some(pos);
            best.score = score;
            best.depth = depth;
            debug!(depth, ?pos, score, nodes = self.nodes, "search depth completed");

            // Forced result found, deeper iterations cannot change it
            if score.abs() >= PatternScore::WIN {
                break;
            }
        }

        if best.best_move.is_none() {
            best.best_move = generate_moves(board, color, rules, 1).first().map(|m| m.pos);
            debug!(fallback = ?best.best_move, "no search depth completed");
        }

        best.nodes = self.nodes;
        best.stats = self.stats;
        best
    }

    /// True once the deadline has passed; latches `aborted`.
    #[inline]
    fn check_time(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }

    /// One full-window pass at the root. `None` if the deadline hit mid-way.
    fn search_root(&mut self, board: &mut Board, depth: i8) -> Option<(Pos, i32)> {
        let color = self.ai;
        let hash = board.hash();
        let mut moves = generate_moves(board, color, self.rules, self.max_candidates);

        // Previous iteration's best move first
        if let Some(tt_move) = self.tt.get_best_move(hash) {
            if let Some(idx) = moves.iter().position(|m| m.pos == tt_move) {
                let m = moves.remove(idx);
                moves.insert(0, m);
            }
        }

        let mut alpha = -INF;
        let beta = INF;
        let mut best_score = -INF;
        let mut best_move = None;

        for m in moves {
            board.place_stone(m.pos, color);
            let score = self.minimax(board, depth - 1, alpha, beta, false, m.pos);
            board.undo();

            if self.aborted {
                return None;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(m.pos);
            }
            alpha = alpha.max(best_score);
        }

        let best_move = best_move?;
        self.tt
            .store(hash, depth, best_score, EntryType::Exact, color, Some(best_move));
        Some((best_move, best_score))
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `last` is the stone that produced this position; only it can have
    /// completed a five.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        last: Pos,
    ) -> i32 {
        if self.check_time() {
            return 0;
        }
        self.nodes += 1;

        let hash = board.hash();
        self.stats.tt_probes += 1;
        if let Some(score) = self.tt.probe(hash, depth, alpha, beta, self.ai) {
            self.stats.tt_hits += 1;
            return score;
        }

        if check_win(board, last, self.rules).is_some() {
            return if board.get(last) == self.ai {
                PatternScore::WIN
            } else {
                -PatternScore::WIN
            };
        }

        if depth <= 0 {
            return evaluate(board, self.ai);
        }

        let to_move = if maximizing { self.ai } else { self.ai.opponent() };
        let mut moves = generate_moves(board, to_move, self.rules, self.max_candidates);
        if moves.is_empty() {
            // Full board, or nothing legal for the side to move: draw
            return 0;
        }
        if let Some(tt_move) = self.tt.get_best_move(hash) {
            if let Some(idx) = moves.iter().position(|m| m.pos == tt_move) {
                moves.swap(0, idx);
            }
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for m in moves {
            board.place_stone(m.pos, to_move);
            let score = self.minimax(board, depth - 1, alpha, beta, !maximizing, m.pos);
            board.undo();

            if self.aborted {
                return 0;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(m.pos);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(m.pos);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        let entry_type = if best_score <= orig_alpha {
            EntryType::UpperBound
        } else if best_score >= orig_beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt
            .store(hash, depth, best_score, entry_type, self.ai, best_move);

        best_score
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}
