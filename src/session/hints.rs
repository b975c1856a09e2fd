//! One-frame render hints.
//!
//! `is_new`/`merged` are animation cues for the view layer. They are
//! rebuilt from scratch for every committed move and never stored in the
//! canonical [`Grid`](crate::core::Grid), so a tile merged on one move can
//! never still read as merged on the next.

use serde::{Deserialize, Serialize};

use crate::core::{Position, SIZE};
use crate::moves::CellMask;

/// Presentation flags for a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileHint {
    /// Tile was spawned by the last transition.
    pub is_new: bool,
    /// Tile was produced by a merge in the last move.
    pub merged: bool,
}

/// Per-cell hints aligned with the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderHints {
    cells: [[TileHint; SIZE]; SIZE],
}

impl RenderHints {
    /// All flags cleared.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Hints with `merged` set wherever `mask` is set.
    #[must_use]
    pub fn from_merged(mask: CellMask) -> Self {
        Self {
            cells: mask.map(|row| {
                row.map(|merged| TileHint {
                    is_new: false,
                    merged,
                })
            }),
        }
    }

    /// Mark a freshly spawned tile.
    pub fn mark_new(&mut self, (r, c): Position) {
        self.cells[r][c] = TileHint {
            is_new: true,
            merged: false,
        };
    }

    /// Hint for one cell.
    #[must_use]
    pub fn get(&self, (r, c): Position) -> TileHint {
        self.cells[r][c]
    }

    /// Positions flagged `is_new`, row-major.
    pub fn new_tiles(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions(|hint| hint.is_new)
    }

    /// Positions flagged `merged`, row-major.
    pub fn merged_tiles(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions(|hint| hint.merged)
    }

    fn positions(&self, pred: impl Fn(&TileHint) -> bool + 'static) -> impl Iterator<Item = Position> + '_ {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(move |&(r, c)| pred(&self.cells[r][c]))
    }
}
