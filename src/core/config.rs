//! Engine configuration.
//!
//! The board size is fixed at 4×4; everything else that the rules depend on
//! is configured here and validated once at session construction.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::grid::CELL_COUNT;

/// Default key under which the best score is persisted.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Rejected configuration.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum ConfigError {
    /// Spawn probability outside `[0, 1]`.
    #[display("four_probability must be within [0, 1], got {_0}")]
    FourProbability(#[error(not(source))] f64),
    /// Win value that no merge can produce.
    #[display("win_value must be a power of two >= 4, got {_0}")]
    WinValue(#[error(not(source))] u32),
    /// Initial tile count that cannot fit the board.
    #[display("initial_tiles must be within 1..=16, got {_0}")]
    InitialTiles(#[error(not(source))] usize),
}

/// Rules configuration for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A tile with exactly this value wins the game.
    pub win_value: u32,

    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,

    /// Tiles spawned into the empty grid on start and restart.
    pub initial_tiles: usize,

    /// Key used with the score store.
    pub high_score_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_value: 2048,
            four_probability: 0.1,
            initial_tiles: 2,
            high_score_key: HIGH_SCORE_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the winning tile value.
    #[must_use]
    pub fn with_win_value(mut self, value: u32) -> Self {
        self.win_value = value;
        self
    }

    /// Set the probability of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Set the number of tiles spawned on start.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the persistence key for the best score.
    #[must_use]
    pub fn with_high_score_key(mut self, key: impl Into<String>) -> Self {
        self.high_score_key = key.into();
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::WinValue(self.win_value));
        }
        if self.initial_tiles == 0 || self.initial_tiles > CELL_COUNT {
            return Err(ConfigError::InitialTiles(self.initial_tiles));
        }
        Ok(())
    }
}
