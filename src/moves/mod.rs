//! Move/merge logic: transform primitives and the direction resolver.
//!
//! Nothing in this module touches randomness or session state; a move is a
//! pure function from `(Grid, Direction)` to a [`Resolution`].

pub mod primitives;
pub mod resolver;

pub use primitives::{compress, merge_row, reverse, transpose, transpose_cells};
pub use resolver::{available_moves, can_move, resolve, CellMask, Resolution};
