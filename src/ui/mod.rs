//! GUI module for the Gobang game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GobangApp;
pub use game_state::{GameMode, GameState};
