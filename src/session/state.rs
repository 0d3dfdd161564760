//! Serializable session snapshot and import validation

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::rules::{is_legal_move, winning_lines, RuleSet};
use crate::search::ZobristTable;

use super::GameResult;

/// Everything needed to rebuild a session elsewhere.
///
/// Zobrist keys and cached search results are not part of the record;
/// the importing side recomputes the key and starts with an empty cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Row-major cell contents, `BOARD_SIZE * BOARD_SIZE` entries
    pub cells: Vec<Stone>,
    pub move_count: usize,
    pub current_player: Stone,
    pub game_over: bool,
    pub result: Option<GameResult>,
    pub black_player: Option<String>,
    pub white_player: Option<String>,
    pub strict_mode: bool,
    #[serde(default = "default_restricted")]
    pub restricted_side: Stone,
    pub ai_enabled: bool,
    pub human_player: Option<String>,
    /// Placement order; absent when the sender did not keep one
    #[serde(default)]
    pub history: Option<Vec<Pos>>,
}

fn default_restricted() -> Stone {
    Stone::Black
}

/// Why an imported record was refused.
#[derive(Debug, Display, Error, From)]
pub enum StateError {
    #[display("malformed session JSON: {_0}")]
    #[from]
    Json(serde_json::Error),

    #[display("board must have {TOTAL_CELLS} cells, found {found}")]
    CellCount { found: usize },

    #[display("move count {move_count} does not match {stones} stones on the board")]
    MoveCount { move_count: usize, stones: usize },

    #[display("stone balance {black} black / {white} white is unreachable")]
    StoneBalance { black: usize, white: usize },

    #[display("turn belongs to {expected:?}, record says {found:?}")]
    Turn { expected: Stone, found: Stone },

    #[display("history holds {len} moves for a move count of {move_count}")]
    HistoryLength { len: usize, move_count: usize },

    #[display("history entry {index} does not match the board")]
    HistoryEntry { index: usize },

    #[display("game-over flag and result disagree")]
    ResultMismatch,

    #[display("restricted side must be a colour, found {found:?}")]
    RestrictedSide { found: Stone },

    #[display("stones on the board but a side has no player")]
    MissingPlayers,

    #[display("computer game needs the human to hold a seat, found {name:?}")]
    HumanPlayer { name: Option<String> },

    #[display("board holds a winning run for {winner:?} but the game is not over")]
    UnfinishedWin { winner: Stone },

    #[display("recorded result {result} does not match the board")]
    ResultBoard { result: GameResult },
}

impl SessionState {
    /// Check the record for internal consistency.
    ///
    /// Returns the cells as a fixed array on success.
    pub fn validate(&self) -> Result<[Stone; TOTAL_CELLS], StateError> {
        let cells: [Stone; TOTAL_CELLS] = self
            .cells
            .as_slice()
            .try_into()
            .map_err(|_| StateError::CellCount {
                found: self.cells.len(),
            })?;

        let black = cells.iter().filter(|&&s| s == Stone::Black).count();
        let white = cells.iter().filter(|&&s| s == Stone::White).count();
        if self.move_count != black + white {
            return Err(StateError::MoveCount {
                move_count: self.move_count,
                stones: black + white,
            });
        }
        if black != white && black != white + 1 {
            return Err(StateError::StoneBalance { black, white });
        }

        let expected = if self.move_count % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        };
        if self.current_player != expected {
            return Err(StateError::Turn {
                expected,
                found: self.current_player,
            });
        }

        if let Some(history) = &self.history {
            self.validate_history(history, &cells)?;
        }

        let winner_ok = match &self.result {
            Some(GameResult::Win { winner, .. }) => *winner != Stone::Empty,
            _ => true,
        };
        if self.game_over != self.result.is_some() || !winner_ok {
            return Err(StateError::ResultMismatch);
        }

        if self.restricted_side == Stone::Empty {
            return Err(StateError::RestrictedSide {
                found: self.restricted_side,
            });
        }

        if self.move_count > 0 && (self.black_player.is_none() || self.white_player.is_none()) {
            return Err(StateError::MissingPlayers);
        }

        if self.ai_enabled {
            let human = self.human_player.as_deref();
            let seats = [self.black_player.as_deref(), self.white_player.as_deref()];
            let seated = seats.iter().all(Option::is_some);
            if human.is_none() || (seated && !seats.contains(&human)) {
                return Err(StateError::HumanPlayer {
                    name: self.human_player.clone(),
                });
            }
        }

        self.validate_result(&cells)?;
        Ok(cells)
    }

    /// The recorded result must be what the stones show.
    fn validate_result(&self, cells: &[Stone; TOTAL_CELLS]) -> Result<(), StateError> {
        let rules = RuleSet {
            strict: self.strict_mode,
            restricted: self.restricted_side,
        };
        let mut board = Board::with_zobrist(ZobristTable::from_seed(0));
        board.load(*cells, Vec::new());
        let wins = winning_lines(&board, rules);

        let Some(result) = self.result else {
            return match wins.first() {
                Some(&(winner, _)) => Err(StateError::UnfinishedWin { winner }),
                None => Ok(()),
            };
        };
        let consistent = match result {
            GameResult::Win { winner, line } => wins
                .iter()
                .any(|&(color, run)| color == winner && line.map_or(true, |l| l == run)),
            GameResult::Draw => {
                let next = board.side_to_move();
                let stuck = board.is_full() || !board.empty_cells().any(|p| is_legal_move(&board, p, next, rules));
                stuck && wins.is_empty()
            }
        };
        if consistent {
            Ok(())
        } else {
            Err(StateError::ResultBoard { result })
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }
}
