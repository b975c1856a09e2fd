//! # rust-2048
//!
//! Move/merge engine for the 2048 sliding-tile puzzle.
//!
//! ## Design Principles
//!
//! 1. **Pure moves**: Resolving a direction is a function of the grid alone.
//!    It never mutates its input, so a no-op move is detected by comparing
//!    grids.
//!
//! 2. **Values only in the grid**: `is_new`/`merged` animation cues live in a
//!    separate per-move overlay and never affect grid equality.
//!
//! 3. **Injected collaborators**: Spawn randomness ([`Spawner`]) and
//!    best-score persistence ([`ScoreStore`]) are passed in, so tests run
//!    with deterministic fakes.
//!
//! ## Modules
//!
//! - `core`: Tiles, grid, directions, RNG, configuration
//! - `moves`: Transform primitives and the direction resolver
//! - `session`: State machine, spawning, render hints, persistence
//! - `input`: Key and swipe translation into directions
//!
//! ## Example
//!
//! ```
//! use rust_2048::{Direction, GameRng, MemoryStore, Session, Status};
//!
//! let mut session = Session::new(MemoryStore::new(), GameRng::new(7));
//! while session.status() == Status::Playing {
//!     let moved = Direction::ALL
//!         .into_iter()
//!         .any(|direction| session.make_move(direction).is_applied());
//!     if !moved {
//!         break;
//!     }
//! }
//! assert!(session.status().is_terminal());
//! ```

pub mod core;
pub mod input;
pub mod moves;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Cell, ConfigError, Direction, EngineConfig, GameRng, GameRngState, Grid, Position, Row, Tile,
    CELL_COUNT, SIZE,
};

pub use crate::moves::{available_moves, can_move, resolve, Resolution};

pub use crate::session::{
    JsonFileStore, MemoryStore, MoveOutcome, Rejection, RenderHints, ScoreStore, ScriptedSpawner,
    Session, SharedSession, Snapshot, Spawner, Status, StoreError, TileHint,
};

pub use crate::input::{InputEvent, Swipe};
