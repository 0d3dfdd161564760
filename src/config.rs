//! Tunable engine parameters

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search limits
    pub max_depth: i8,
    pub time_budget_ms: u64,
    pub max_candidates: usize,

    // Memory
    pub tt_size_mb: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_budget_ms: 2500,
            max_candidates: 20,
            tt_size_mb: 8,
        }
    }
}

impl EngineConfig {
    /// Parse a config, filling missing fields from the defaults.
    ///
    /// Zero depth or width is raised to 1 so the engine always searches.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json_str)?;
        Ok(config.sanitized())
    }

    /// Search budget per AI move
    #[must_use]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            max_depth: self.max_depth.max(1),
            max_candidates: self.max_candidates.max(1),
            tt_size_mb: self.tt_size_mb.max(1),
            ..self
        }
    }
}
