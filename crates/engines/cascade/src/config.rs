//! Engine configuration, loadable from TOML.

use std::path::Path;
use std::time::Duration;

use chess_core::SearchLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Which scoring stages run between mate detection and the random tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// One minimax stage over the weighted sum of every counter.
    #[default]
    Combined,
    /// Material, king safety, development and centre control, one stage each.
    Cascade,
}

/// Integer weights for the combined evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub checkmate: i64,
    pub material: i64,
    pub king_safety: i64,
    pub development: i64,
    pub centre_control: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            checkmate: 100,
            material: 80,
            king_safety: 10,
            development: 6,
            centre_control: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimax depth of the combined stage, in plies after the candidate move
    pub depth: u8,
    /// Node budget per move; 0 disables it
    pub node_limit: Option<u64>,
    /// Wall-clock budget per move in milliseconds
    pub move_time_ms: Option<u64>,
    /// Transposition cache entries per search
    pub cache_capacity: usize,
    /// Score candidates on the rayon pool
    pub parallel: bool,
    /// Fixed seed for the random tie-break (None = entropy)
    pub seed: Option<u64>,
    pub mode: EvaluationMode,
    /// Minimax depth of each stage in cascade mode
    pub cascade_depth: u8,
    pub weights: Weights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 7,
            node_limit: Some(200_000),
            move_time_ms: None,
            cache_capacity: 65_536,
            parallel: true,
            seed: None,
            mode: EvaluationMode::Combined,
            cascade_depth: 2,
            weights: Weights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Depth and budgets as [`SearchLimits`] for one move.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::new(
            self.depth,
            self.move_time_ms.map(Duration::from_millis),
            self.node_limit.filter(|&n| n > 0),
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
