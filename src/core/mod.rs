//! Core value types: tiles, grid, directions, RNG, configuration.
//!
//! These are shared by the move resolver and the session; none of them
//! hold game-progress state.

pub mod config;
pub mod direction;
pub mod grid;
pub mod rng;

pub use config::{ConfigError, EngineConfig, HIGH_SCORE_KEY};
pub use direction::Direction;
pub use grid::{Cell, Grid, InvalidTile, Position, Row, Tile, CELL_COUNT, SIZE};
pub use rng::{GameRng, GameRngState};
