//! Evaluation module for Gobang positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (twos, threes, fours, fives) and their open ends
//! - Positional bonuses (center control)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, move_score, score_cell};
pub use patterns::{line_value, PatternScore, POSITION_WEIGHTS};
