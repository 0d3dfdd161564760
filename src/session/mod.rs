//! Game session: players, turn order, results, undo and state transfer
//!
//! A [`Session`] is the single entry point a front end or network layer
//! talks to. It validates who is moving, applies the rules, tracks the
//! result and asks the engine for computer moves.
//!
//! ```text
//! WaitingForPlayers --(second add_player)--> InProgress --(win/draw)--> GameOver
//!                                                ^                         |
//!                                                +---------(reset)---------+
//! ```

pub mod arena;
pub mod state;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::rules::{check_win, is_legal_move, RuleSet, WinLine};
use crate::search::{TTStats, ZobristTable};

pub use arena::{SessionArena, SessionId};
pub use state::{SessionState, StateError};

/// Lifecycle stage of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForPlayers,
    InProgress,
    GameOver,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win { winner: Stone, line: Option<WinLine> },
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win { winner, .. } => write!(f, "{} wins", winner.name()),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// One game between two named players, optionally one of them the engine.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    phase: Phase,
    black_player: Option<String>,
    white_player: Option<String>,
    ai_enabled: bool,
    human_player: Option<String>,
    rules: RuleSet,
    result: Option<GameResult>,
    engine: AIEngine,
    rng: StdRng,
}

impl Session {
    /// New session with entropy-seeded tables and the default engine config.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), StdRng::from_entropy())
    }

    /// Reproducible session: the zobrist table and colour swap follow `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::build(config, StdRng::from_entropy())
    }

    #[must_use]
    pub fn with_seed_and_config(seed: u64, config: EngineConfig) -> Self {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: EngineConfig, mut rng: StdRng) -> Self {
        let zobrist = ZobristTable::from_rng(&mut rng);
        Self {
            board: Board::with_zobrist(zobrist),
            phase: Phase::WaitingForPlayers,
            black_player: None,
            white_player: None,
            ai_enabled: false,
            human_player: None,
            rules: RuleSet::default(),
            result: None,
            engine: AIEngine::with_config(config),
            rng,
        }
    }

    // =========================================================================
    // Players and settings
    // =========================================================================

    /// Bind a player: first to Black, second to White.
    ///
    /// Without AI mode the second join swaps the colours half of the time.
    /// The second join starts the game. Rejects empty or duplicate names and
    /// joins after both seats are taken.
    pub fn add_player(&mut self, name: &str) -> bool {
        if self.phase != Phase::WaitingForPlayers || name.is_empty() {
            return false;
        }
        if self.color_of(name).is_some() {
            return false;
        }

        if self.black_player.is_none() {
            self.black_player = Some(name.to_owned());
            debug!(name, "player joined as BLACK");
            return true;
        }

        self.white_player = Some(name.to_owned());
        if !self.ai_enabled && self.rng.gen_bool(0.5) {
            std::mem::swap(&mut self.black_player, &mut self.white_player);
        }
        self.phase = Phase::InProgress;
        info!(
            black = self.black_player.as_deref().unwrap_or_default(),
            white = self.white_player.as_deref().unwrap_or_default(),
            strict = self.rules.strict,
            "game started"
        );
        true
    }

    /// Turn human-vs-computer play on or off. `human_name` names the human.
    pub fn set_ai_mode(&mut self, enabled: bool, human_name: &str) {
        self.ai_enabled = enabled;
        self.human_player = enabled.then(|| human_name.to_owned());
    }

    /// Toggle forbidden moves and exact-five wins for the restricted side.
    pub fn set_strict_mode(&mut self, enabled: bool) {
        if self.rules.strict != enabled {
            self.rules.strict = enabled;
            self.engine.clear_cache();
        }
    }

    /// Choose which colour strict mode restricts. `Empty` is ignored.
    pub fn set_restricted_side(&mut self, side: Stone) -> bool {
        if side == Stone::Empty {
            return false;
        }
        if self.rules.restricted != side {
            self.rules.restricted = side;
            self.engine.clear_cache();
        }
        true
    }

    pub fn set_engine_config(&mut self, config: EngineConfig) {
        self.engine.set_config(config);
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Apply `player`'s stone at (`row`, `col`).
    ///
    /// Fails without any change unless the game is in progress, `player`
    /// owns the side to move, and the cell is on the board, empty and not
    /// forbidden. A five ends the game as a win; a full board, or a side to
    /// move with no legal cell, ends it as a draw.
    pub fn process_move(&mut self, player: &str, row: i32, col: i32) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let color = self.board.side_to_move();
        if self.player_name(color) != Some(player) {
            return false;
        }
        let Some(pos) = Pos::checked(row, col) else {
            return false;
        };
        if !is_legal_move(&self.board, pos, color, self.rules) {
            return false;
        }
        if !self.board.place_stone(pos, color) {
            return false;
        }

        if let Some(line) = check_win(&self.board, pos, self.rules) {
            self.finish(GameResult::Win {
                winner: color,
                line: Some(line),
            });
        } else if self.board.is_full() {
            self.finish(GameResult::Draw);
        } else {
            let next = color.opponent();
            let board = &self.board;
            if !board.empty_cells().any(|p| is_legal_move(board, p, next, self.rules)) {
                debug!(side = next.name(), "no legal cell left");
                self.finish(GameResult::Draw);
            }
        }
        true
    }

    fn finish(&mut self, result: GameResult) {
        info!(%result, moves = self.board.move_count(), "game over");
        self.result = Some(result);
        self.phase = Phase::GameOver;
    }

    /// Undo is offered to the human in computer games, on their turn, once
    /// both the human's and the computer's last stones can be taken back.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.ai_enabled
            && self.phase == Phase::InProgress
            && self.board.history().len() >= 2
            && self.human_color() == Some(self.board.side_to_move())
    }

    /// Take back the computer's reply and the human's move before it.
    pub fn undo_move(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.board.undo();
        self.board.undo();
        debug!(moves = self.board.move_count(), "undid two moves");
        true
    }

    /// Engine move for the side to move, or `None` if the game is not running
    /// or that side has no legal cell.
    pub fn get_ai_move(&mut self) -> Option<Pos> {
        self.ai_move_with_stats().and_then(|r| r.best_move)
    }

    /// Like [`Session::get_ai_move`] with search statistics.
    pub fn ai_move_with_stats(&mut self) -> Option<MoveResult> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let color = self.board.side_to_move();
        Some(self.engine.get_move_with_stats(&self.board, color, self.rules))
    }

    /// Hand over the engine, search cache included.
    ///
    /// A front end that searches on a clone gives the engine back to the
    /// original through [`Session::restore_engine`].
    #[must_use]
    pub fn into_engine(self) -> AIEngine {
        self.engine
    }

    /// Reinstall an engine taken from a clone of this session.
    pub fn restore_engine(&mut self, engine: AIEngine) {
        self.engine = engine;
    }

    /// Clear the board and start again with the same players and settings.
    pub fn reset(&mut self) {
        self.board.clear();
        self.result = None;
        self.engine.clear_cache();
        self.phase = if self.black_player.is_some() && self.white_player.is_some() {
            Phase::InProgress
        } else {
            Phase::WaitingForPlayers
        };
        info!(phase = ?self.phase, "session reset");
    }

    // =========================================================================
    // State transfer
    // =========================================================================

    #[must_use]
    pub fn export_state(&self) -> SessionState {
        SessionState {
            cells: self.board.cells().to_vec(),
            move_count: self.board.move_count(),
            current_player: self.board.side_to_move(),
            game_over: self.phase == Phase::GameOver,
            result: self.result,
            black_player: self.black_player.clone(),
            white_player: self.white_player.clone(),
            strict_mode: self.rules.strict,
            restricted_side: self.rules.restricted,
            ai_enabled: self.ai_enabled,
            human_player: self.human_player.clone(),
            history: Some(self.board.history().to_vec()),
        }
    }

    /// Replace this session's game with `state`.
    ///
    /// The record is validated first; on error nothing changes. The
    /// zobrist key is recomputed and the search cache cleared.
    pub fn import_state(&mut self, state: SessionState) -> Result<(), StateError> {
        let cells = state.validate().inspect_err(|e| warn!(error = %e, "rejected session import"))?;

        self.board.load(cells, state.history.unwrap_or_default());
        self.black_player = state.black_player;
        self.white_player = state.white_player;
        self.ai_enabled = state.ai_enabled;
        self.human_player = state.human_player;
        self.rules = RuleSet {
            strict: state.strict_mode,
            restricted: state.restricted_side,
        };
        self.result = state.result;
        self.phase = if state.game_over {
            Phase::GameOver
        } else if self.black_player.is_some() && self.white_player.is_some() {
            Phase::InProgress
        } else {
            Phase::WaitingForPlayers
        };
        self.engine.clear_cache();

        info!(moves = self.board.move_count(), phase = ?self.phase, "session imported");
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.export_state().to_json()
    }

    /// Parse and import a JSON record produced by [`Session::to_json`].
    pub fn import_json(&mut self, json: &str) -> Result<(), StateError> {
        let state = SessionState::from_json(json).inspect_err(|e| warn!(error = %e, "rejected session import"))?;
        self.import_state(state)
    }

    /// Fresh session restored from a JSON record.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let mut session = Self::new();
        session.import_json(json)?;
        Ok(session)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn winning_line(&self) -> Option<WinLine> {
        match self.result {
            Some(GameResult::Win { line, .. }) => line,
            _ => None,
        }
    }

    /// Side to move
    #[must_use]
    pub fn current_player(&self) -> Stone {
        self.board.side_to_move()
    }

    #[must_use]
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    #[must_use]
    pub fn engine_config(&self) -> &EngineConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.engine.tt_stats()
    }

    #[must_use]
    pub fn is_ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Name bound to `color`
    #[must_use]
    pub fn player_name(&self, color: Stone) -> Option<&str> {
        match color {
            Stone::Black => self.black_player.as_deref(),
            Stone::White => self.white_player.as_deref(),
            Stone::Empty => None,
        }
    }

    /// Colour bound to `name`
    #[must_use]
    pub fn color_of(&self, name: &str) -> Option<Stone> {
        if self.black_player.as_deref() == Some(name) {
            Some(Stone::Black)
        } else if self.white_player.as_deref() == Some(name) {
            Some(Stone::White)
        } else {
            None
        }
    }

    /// Colour the human plays in a computer game
    #[must_use]
    pub fn human_color(&self) -> Option<Stone> {
        self.human_player.as_deref().and_then(|h| self.color_of(h))
    }

    /// Colour the engine plays in a computer game
    #[must_use]
    pub fn ai_color(&self) -> Option<Stone> {
        if !self.ai_enabled {
            return None;
        }
        self.human_color().map(Stone::opponent)
    }

    /// True when the engine should move next
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.phase == Phase::InProgress && self.ai_color() == Some(self.board.side_to_move())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, CENTER};

    const ALICE: &str = "alice";
    const BOB: &str = "bob";

    fn fast_config() -> EngineConfig {
        EngineConfig {
            max_depth: 2,
            time_budget_ms: 500,
            max_candidates: 10,
            tt_size_mb: 1,
        }
    }

    /// Hotseat game with alice on Black
    fn started() -> Session {
        let mut session = Session::with_seed_and_config(7, fast_config());
        assert!(session.add_player(ALICE));
        assert!(session.add_player(BOB));
        if session.color_of(ALICE) != Some(Stone::Black) {
            std::mem::swap(&mut session.black_player, &mut session.white_player);
        }
        session
    }

    /// Computer game with alice (human) on Black
    fn versus_ai() -> Session {
        let mut session = Session::with_seed_and_config(11, fast_config());
        session.set_ai_mode(true, ALICE);
        assert!(session.add_player(ALICE));
        assert!(session.add_player("engine"));
        session
    }

    fn play(session: &mut Session, moves: &[(i32, i32)]) {
        for &(r, c) in moves {
            let name = session.player_name(session.current_player()).unwrap().to_owned();
            assert!(session.process_move(&name, r, c), "move ({r}, {c}) rejected");
        }
    }

    #[test]
    fn test_phases() {
        let mut session = Session::with_seed(1);
        assert_eq!(session.phase(), Phase::WaitingForPlayers);
        assert!(!session.process_move(ALICE, 7, 7));
        assert!(session.add_player(ALICE));
        assert!(!session.add_player(ALICE));
        assert!(!session.add_player(""));
        assert_eq!(session.phase(), Phase::WaitingForPlayers);
        assert!(session.add_player(BOB));
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(!session.add_player("carol"));
        assert!(session.color_of(ALICE).is_some());
        assert_ne!(session.color_of(ALICE), session.color_of(BOB));
    }

    #[test]
    fn test_ai_mode_keeps_join_order() {
        let session = versus_ai();
        assert_eq!(session.color_of(ALICE), Some(Stone::Black));
        assert_eq!(session.human_color(), Some(Stone::Black));
        assert_eq!(session.ai_color(), Some(Stone::White));
        assert!(!session.is_ai_turn());
    }

    #[test]
    fn test_win_detection() {
        let mut session = started();
        play(
            &mut session,
            &[(7, 3), (0, 0), (7, 4), (0, 2), (7, 5), (0, 4), (7, 6), (0, 6)],
        );
        assert!(!session.is_game_over());
        assert!(session.process_move(ALICE, 7, 7));
        assert!(session.is_game_over());
        assert_eq!(session.phase(), Phase::GameOver);
        let line = session.winning_line().unwrap();
        assert_eq!((line.start, line.end), (Pos::new(7, 3), Pos::new(7, 7)));
        assert!(matches!(session.result(), Some(GameResult::Win { winner: Stone::Black, .. })));
        assert_eq!(session.result().unwrap().to_string(), "BLACK wins");
        // Terminal: nothing more is accepted
        assert!(!session.process_move(BOB, 1, 1));
    }

    #[test]
    fn test_draw_on_full_board() {
        let mut session = started();
        let n = BOARD_SIZE as i32;
        // Two-wide diagonal stripes: no line holds more than two in a row
        let is_black = |r: i32, c: i32| (c + 2 * r) % 4 < 2;
        let black: Vec<_> = (0..n).flat_map(|r| (0..n).map(move |c| (r, c))).filter(|&(r, c)| is_black(r, c)).collect();
        let white: Vec<_> = (0..n).flat_map(|r| (0..n).map(move |c| (r, c))).filter(|&(r, c)| !is_black(r, c)).collect();
        assert_eq!((black.len(), white.len()), (113, 112));

        for i in 0..black.len() {
            let (r, c) = black[i];
            assert!(session.process_move(ALICE, r, c));
            if let Some(&(r, c)) = white.get(i) {
                assert!(!session.is_game_over());
                assert!(session.process_move(BOB, r, c));
            }
        }
        assert!(session.board().is_full());
        assert_eq!(session.result(), Some(GameResult::Draw));
        assert!(session.is_game_over());
    }

    #[test]
    fn test_rejections_do_not_mutate() {
        let mut session = started();
        play(&mut session, &[(7, 7)]);
        let before = session.export_state();
        let hash = session.board().hash();

        assert!(!session.process_move(ALICE, 7, 8), "wrong turn");
        assert!(!session.process_move("mallory", 7, 8), "unknown player");
        assert!(!session.process_move(BOB, 7, 7), "occupied");
        assert!(!session.process_move(BOB, -1, 3), "off board");
        assert!(!session.process_move(BOB, 3, 15), "off board");

        assert_eq!(session.export_state(), before);
        assert_eq!(session.board().hash(), hash);
    }

    #[test]
    fn test_strict_rejects_double_three_and_overline() {
        let mut session = started();
        session.set_strict_mode(true);
        play(
            &mut session,
            &[(7, 7), (0, 0), (7, 8), (0, 2), (8, 6), (0, 4), (9, 6), (0, 6)],
        );
        // (7,6) would make live threes on the row and the column
        let before = session.board().hash();
        assert!(!session.process_move(ALICE, 7, 6));
        assert_eq!(session.board().hash(), before);
        assert_eq!(session.current_player(), Stone::Black);

        // Free-style allows it
        session.set_strict_mode(false);
        assert!(session.process_move(ALICE, 7, 6));
    }

    #[test]
    fn test_strict_centre_opening() {
        let mut session = started();
        session.set_strict_mode(true);
        assert!(!session.process_move(ALICE, 3, 3));
        assert!(session.process_move(ALICE, CENTER.row as i32, CENTER.col as i32));
    }

    #[test]
    fn test_strict_overline_not_a_win() {
        let mut session = started();
        session.set_strict_mode(true);
        play(
            &mut session,
            &[(7, 7), (0, 0), (7, 3), (0, 2), (7, 4), (0, 4), (7, 5), (0, 6), (7, 8), (2, 0)],
        );
        // (7,6) joins six in a row: forbidden for the restricted side
        assert!(!session.process_move(ALICE, 7, 6));
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_undo_restores_position() {
        let mut session = versus_ai();
        play(&mut session, &[(7, 7), (6, 6)]);
        let snapshot = session.export_state();
        let hash = session.board().hash();

        play(&mut session, &[(8, 8), (5, 5)]);
        assert!(session.can_undo());
        assert!(session.undo_move());

        assert_eq!(session.board().hash(), hash);
        assert_eq!(session.export_state(), snapshot);
        assert_eq!(session.current_player(), Stone::Black);
    }

    #[test]
    fn test_undo_rules() {
        let mut hotseat = started();
        play(&mut hotseat, &[(7, 7), (6, 6)]);
        assert!(!hotseat.can_undo(), "hotseat games have no undo");

        let mut session = versus_ai();
        play(&mut session, &[(7, 7)]);
        assert!(!session.can_undo(), "computer's turn");
        play(&mut session, &[(6, 6)]);
        assert!(session.can_undo());
        assert!(session.undo_move());
        assert!(!session.undo_move(), "board is empty again");
    }

    #[test]
    fn test_ai_move_is_legal() {
        let mut session = versus_ai();
        play(&mut session, &[(7, 7)]);
        assert!(session.is_ai_turn());
        let pos = session.get_ai_move().unwrap();
        assert!(session.board().is_empty(pos));
        assert!(session.process_move("engine", pos.row as i32, pos.col as i32));
    }

    #[test]
    fn test_ai_move_with_zero_budget() {
        let config = EngineConfig {
            time_budget_ms: 0,
            ..fast_config()
        };
        let mut session = Session::with_seed_and_config(3, config);
        session.set_ai_mode(true, ALICE);
        session.add_player(ALICE);
        session.add_player("engine");
        play(&mut session, &[(7, 7), (7, 8), (8, 8)]);
        let pos = session.get_ai_move().unwrap();
        assert!(is_legal_move(session.board(), pos, Stone::White, session.rules()));
    }

    #[test]
    fn test_no_ai_move_before_start() {
        let mut session = Session::with_seed(5);
        assert_eq!(session.get_ai_move(), None);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut session = versus_ai();
        session.set_strict_mode(true);
        play(&mut session, &[(7, 7), (6, 6), (8, 8)]);
        let json = session.to_json().unwrap();

        let mut copy = Session::with_seed_and_config(99, fast_config());
        copy.import_json(&json).unwrap();

        assert_eq!(copy.board().cells(), session.board().cells());
        assert_eq!(copy.board().move_count(), 3);
        assert_eq!(copy.current_player(), Stone::White);
        assert_eq!(copy.color_of(ALICE), Some(Stone::Black));
        assert_eq!(copy.color_of("engine"), Some(Stone::White));
        assert!(copy.rules().strict);
        assert!(copy.is_ai_enabled());
        assert_eq!(copy.phase(), Phase::InProgress);
        // Different table, recomputed from scratch
        assert_eq!(copy.board().hash(), copy.board().zobrist().hash(copy.board()));
        assert_eq!(copy.export_state(), session.export_state());
    }

    #[test]
    fn test_from_json_builds_session() {
        let mut session = versus_ai();
        play(&mut session, &[(7, 7)]);
        let restored = Session::from_json(&session.to_json().unwrap()).unwrap();
        assert_eq!(restored.board().history(), &[Pos::new(7, 7)]);
        assert!(restored.is_ai_turn());
        assert!(Session::from_json("[]").is_err());
    }

    #[test]
    fn test_import_without_history() {
        let mut session = versus_ai();
        play(&mut session, &[(7, 7), (6, 6)]);
        let mut state = session.export_state();
        state.history = None;

        let mut copy = Session::with_seed(4);
        copy.import_state(state).unwrap();
        assert_eq!(copy.board().move_count(), 2);
        assert!(!copy.can_undo());
    }

    #[test]
    fn test_import_rejects_bad_records() {
        let mut session = started();
        play(&mut session, &[(7, 7), (6, 6)]);
        let good = session.export_state();

        let mut target = started();
        let before = target.export_state();

        let mut bad = good.clone();
        bad.move_count = 5;
        assert!(matches!(target.import_state(bad), Err(StateError::MoveCount { .. })));

        let mut bad = good.clone();
        bad.current_player = Stone::White;
        assert!(matches!(target.import_state(bad), Err(StateError::Turn { .. })));

        let mut bad = good.clone();
        bad.cells.pop();
        assert!(matches!(target.import_state(bad), Err(StateError::CellCount { found: 224 })));

        let mut bad = good.clone();
        bad.history = Some(vec![Pos::new(6, 6), Pos::new(7, 7)]);
        assert!(matches!(target.import_state(bad), Err(StateError::HistoryEntry { index: 0 })));

        let mut bad = good.clone();
        bad.game_over = true;
        assert!(matches!(target.import_state(bad), Err(StateError::ResultMismatch)));

        let mut bad = good.clone();
        bad.history = Some(vec![Pos::new(7, 7)]);
        assert!(matches!(
            target.import_state(bad),
            Err(StateError::HistoryLength { len: 1, move_count: 2 })
        ));

        let mut bad = good.clone();
        bad.restricted_side = Stone::Empty;
        assert!(matches!(target.import_state(bad), Err(StateError::RestrictedSide { .. })));

        let mut bad = good.clone();
        bad.white_player = None;
        assert!(matches!(target.import_state(bad), Err(StateError::MissingPlayers)));

        let mut bad = good.clone();
        bad.ai_enabled = true;
        assert!(matches!(target.import_state(bad.clone()), Err(StateError::HumanPlayer { name: None })));
        bad.human_player = Some("carol".to_owned());
        assert!(matches!(target.import_state(bad.clone()), Err(StateError::HumanPlayer { .. })));
        bad.human_player = Some(BOB.to_owned());
        assert!(target.clone().import_state(bad).is_ok());

        let mut bad = good;
        bad.cells[0] = Stone::Black;
        bad.cells[1] = Stone::Black;
        bad.move_count = 4;
        assert!(matches!(target.import_state(bad), Err(StateError::StoneBalance { .. })));

        assert!(matches!(target.import_json("{ nope"), Err(StateError::Json(_))));
        assert_eq!(target.export_state(), before);
    }

    #[test]
    fn test_import_checks_result_against_board() {
        let mut won = started();
        play(&mut won, &[(7, 3), (0, 0), (7, 4), (0, 2), (7, 5), (0, 4), (7, 6), (0, 6), (7, 7)]);
        let finished = won.export_state();
        let mut target = started();
        assert!(target.clone().import_state(finished.clone()).is_ok());

        let mut bad = finished.clone();
        bad.game_over = false;
        bad.result = None;
        assert!(matches!(
            target.import_state(bad),
            Err(StateError::UnfinishedWin { winner: Stone::Black })
        ));

        let mut bad = finished.clone();
        bad.result = Some(GameResult::Win {
            winner: Stone::Black,
            line: Some(WinLine {
                start: Pos::new(0, 0),
                end: Pos::new(0, 4),
            }),
        });
        assert!(matches!(target.import_state(bad), Err(StateError::ResultBoard { .. })));

        let mut bad = finished;
        bad.result = Some(GameResult::Win {
            winner: Stone::White,
            line: None,
        });
        assert!(matches!(target.import_state(bad), Err(StateError::ResultBoard { .. })));

        // Nothing on the board backs a win or a draw
        let mut bad = started().export_state();
        bad.game_over = true;
        bad.result = Some(GameResult::Win {
            winner: Stone::White,
            line: None,
        });
        assert!(matches!(target.import_state(bad.clone()), Err(StateError::ResultBoard { .. })));
        bad.result = Some(GameResult::Draw);
        assert!(matches!(target.import_state(bad), Err(StateError::ResultBoard { .. })));
        assert_eq!(target.board().move_count(), 0);
        assert!(!target.is_game_over());
    }

    /// Full board but for (0,2) and (7,7); Black on (7,7) would make seven
    const STUCK_ROWS: [&str; BOARD_SIZE] = [
        "BB.WBBWWBBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWWBWWBBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWBBWWBBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWBBWWBBWWBBW",
        "WWBWBBB.BBBWWWB",
        "BBWWBBWWBBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWBBWWWBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWBBWWBBWWBBW",
        "WWBBWWBBWWBBWWB",
        "BBWWBBWWBBWWBBW",
    ];

    #[test]
    fn test_draw_when_restricted_side_has_no_legal_cell() {
        let mut state = started().export_state();
        state.cells = STUCK_ROWS
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| match ch {
                'B' => Stone::Black,
                'W' => Stone::White,
                _ => Stone::Empty,
            })
            .collect();
        state.move_count = 223;
        state.current_player = Stone::White;
        state.strict_mode = true;
        state.history = None;

        let mut session = started();
        session.import_state(state).unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(!is_legal_move(session.board(), CENTER, Stone::Black, session.rules()));

        assert!(session.process_move(BOB, 0, 2));
        assert!(!session.board().is_full());
        assert_eq!(session.result(), Some(GameResult::Draw));
        assert!(session.is_game_over());

        let mut copy = started();
        copy.import_state(session.export_state()).unwrap();
        assert_eq!(copy.result(), Some(GameResult::Draw));
    }

    #[test]
    fn test_reset() {
        let mut session = started();
        play(&mut session, &[(7, 3), (0, 0), (7, 4), (0, 2), (7, 5), (0, 4), (7, 6), (0, 6), (7, 7)]);
        assert!(session.is_game_over());
        session.reset();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.board().move_count(), 0);
        assert_eq!(session.board().hash(), 0);
        assert_eq!(session.result(), None);
        assert_eq!(session.current_player(), Stone::Black);
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = Session::with_seed(42);
        let mut b = Session::with_seed(42);
        for s in [&mut a, &mut b] {
            s.add_player(ALICE);
            s.add_player(BOB);
        }
        assert_eq!(a.color_of(ALICE), b.color_of(ALICE));
        assert_eq!(
            a.board().zobrist().key(CENTER, Stone::Black),
            b.board().zobrist().key(CENTER, Stone::Black)
        );
    }
}
