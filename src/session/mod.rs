//! Game session: state machine, spawning, render hints and persistence.
//!
//! - `game`: [`Session`] and its move/restart transitions
//! - `spawn`: [`Spawner`] seam for random tile placement
//! - `hints`: per-move `is_new`/`merged` overlay
//! - `store`: [`ScoreStore`] port for the best score
//! - `shared`: mutex-serialized handle for multi-threaded callers

pub mod game;
pub mod hints;
pub mod shared;
pub mod spawn;
pub mod store;

pub use game::{MoveOutcome, Rejection, Session, Snapshot, Status};
pub use hints::{RenderHints, TileHint};
pub use shared::SharedSession;
pub use spawn::{spawn_tile, ScriptedSpawner, Spawner};
pub use store::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
