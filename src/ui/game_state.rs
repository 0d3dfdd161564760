//! Game state management for the Gobang GUI
//!
//! Wraps a [`Session`] the way a network front end would: every move goes
//! through `process_move` with the mover's name, and computer moves come
//! from `get_ai_move` on a cloned session running in a worker thread.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{AIEngine, EngineConfig, MoveResult, Pos, Session, Stone};

pub const HUMAN: &str = "You";
pub const COMPUTER: &str = "Computer";
pub const PLAYER_ONE: &str = "Player 1";
pub const PLAYER_TWO: &str = "Player 2";

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_color: Stone },
    /// Player vs Player (hotseat); colours are drawn at random
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(Option<MoveResult>, AIEngine)>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// Main game state
pub struct GameState {
    pub session: Session,
    pub mode: GameMode,
    pub strict: bool,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(mode: GameMode, strict: bool) -> Self {
        Self::with_config(mode, strict, EngineConfig::default())
    }

    pub fn with_config(mode: GameMode, strict: bool, config: EngineConfig) -> Self {
        let mut session = Session::with_config(config);
        session.set_strict_mode(strict);
        match mode {
            GameMode::PvE { human_color } => {
                session.set_ai_mode(true, HUMAN);
                // Join order fixes colours when the computer plays
                let (first, second) = if human_color == Stone::Black {
                    (HUMAN, COMPUTER)
                } else {
                    (COMPUTER, HUMAN)
                };
                session.add_player(first);
                session.add_player(second);
            }
            GameMode::PvP => {
                session.add_player(PLAYER_ONE);
                session.add_player(PLAYER_TWO);
            }
        }

        Self {
            session,
            mode,
            strict,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
        }
    }

    /// Same players and rules, empty board
    pub fn reset(&mut self) {
        self.session.reset();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
    }

    pub fn current_turn(&self) -> Stone {
        self.session.current_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        !self.session.is_ai_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone for whoever is to move
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.play(pos)
    }

    fn play(&mut self, pos: Pos) -> Result<(), String> {
        let mover = self
            .session
            .player_name(self.current_turn())
            .ok_or_else(|| "No player for this colour".to_string())?
            .to_owned();
        if !self.session.process_move(&mover, pos.row as i32, pos.col as i32) {
            return Err("Invalid move (forbidden or occupied)".to_string());
        }

        self.suggested_move = None;
        self.message = None;
        if self.is_game_over() {
            self.move_timer.stop();
        } else {
            self.move_timer.start();
        }
        Ok(())
    }

    /// Start AI thinking on a copy of the session.
    ///
    /// The worker sends its engine back so the search cache carries over.
    pub fn start_ai_thinking(&mut self) {
        if !self.session.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let mut session = self.session.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = session.ai_move_with_stats();
            let _ = tx.send((result, session.into_engine()));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let (result, elapsed) = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok((result, engine)) => {
                    self.session.restore_engine(engine);
                    (result, start_time.elapsed())
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    warn!("AI worker exited without a result");
                    return;
                }
            },
            AiState::Idle => return,
        };

        self.ai_state = AiState::Idle;
        self.move_timer.ai_thinking_time = Some(elapsed);

        match result.as_ref().and_then(|r| r.best_move) {
            Some(pos) => {
                if let Err(msg) = self.play(pos) {
                    warn!(?pos, %msg, "AI move rejected");
                    self.message = Some(msg);
                }
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
        self.last_ai_result = result;
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Quick engine suggestion for the side to move (hotseat hint)
    pub fn request_suggestion(&mut self) {
        if self.is_game_over() || self.is_ai_thinking() {
            return;
        }

        let mut probe = self.session.clone();
        probe.set_engine_config(EngineConfig {
            max_depth: 2,
            time_budget_ms: 200,
            ..EngineConfig::default()
        });
        let result = probe.ai_move_with_stats();
        self.suggested_move = result.as_ref().and_then(|r| r.best_move);
        debug!(suggestion = ?self.suggested_move, "hint computed");
        self.last_ai_result = result;
    }

    pub fn can_undo(&self) -> bool {
        !self.is_ai_thinking() && self.session.can_undo()
    }

    /// Take back the last human move and the computer's reply
    pub fn undo(&mut self) {
        if !self.can_undo() {
            return;
        }
        if self.session.undo_move() {
            self.suggested_move = None;
            self.message = None;
            self.move_timer.start();
        }
    }

    /// Per-move search budget of the engine, in seconds
    pub fn session_budget_secs(&self) -> f32 {
        self.session.engine_config().time_budget_ms as f32 / 1000.0
    }

    /// Display name bound to `color`
    pub fn name_of(&self, color: Stone) -> &str {
        self.session.player_name(color).unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> EngineConfig {
        EngineConfig {
            max_depth: 1,
            time_budget_ms: 200,
            max_candidates: 8,
            tt_size_mb: 1,
        }
    }

    #[test]
    fn test_pve_colours_follow_mode() {
        let state = GameState::with_config(GameMode::PvE { human_color: Stone::White }, false, quick());
        assert_eq!(state.session.color_of(HUMAN), Some(Stone::White));
        assert_eq!(state.session.color_of(COMPUTER), Some(Stone::Black));
        assert!(!state.is_human_turn());
    }

    #[test]
    fn test_human_move_then_ai_reply() {
        let mut state = GameState::with_config(GameMode::default(), false, quick());
        assert!(state.try_place_stone(Pos::new(7, 7)).is_ok());
        assert!(state.try_place_stone(Pos::new(7, 8)).is_err(), "computer's turn");

        state.start_ai_thinking();
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
        assert_eq!(state.session.board().move_count(), 2);
        assert!(state.is_human_turn());
        assert!(state.can_undo());
        state.undo();
        assert_eq!(state.session.board().move_count(), 0);
    }

    #[test]
    fn test_search_cache_survives_worker() {
        let mut state = GameState::with_config(GameMode::default(), false, quick());
        assert!(state.try_place_stone(Pos::new(7, 7)).is_ok());
        assert!(state.play(Pos::new(7, 8)).is_ok());
        assert!(state.try_place_stone(Pos::new(8, 8)).is_ok());
        assert_eq!(state.session.tt_stats().used, 0);

        state.start_ai_thinking();
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
        assert_eq!(state.session.board().move_count(), 4);
        assert!(state.session.tt_stats().used > 0);
    }

    #[test]
    fn test_hotseat_hint() {
        let mut state = GameState::with_config(GameMode::PvP, true, quick());
        assert!(state.try_place_stone(Pos::new(7, 7)).is_ok());
        state.request_suggestion();
        assert!(state.suggested_move.is_some());
        assert!(!state.can_undo());
    }
}
