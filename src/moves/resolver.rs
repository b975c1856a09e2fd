//! Move resolution.
//!
//! Every direction is reduced to "slide left" on each row:
//! - left: slide each row
//! - right: reverse, slide, reverse back
//! - up: transpose, slide, transpose back
//! - down: transpose, reverse, slide, reverse back, transpose back
//!
//! Rows never interact. The input grid is never mutated, so the caller can
//! compare the result with its input to detect a no-op move.

use smallvec::SmallVec;

use super::primitives::{compress, merge_row_marked, reverse, transpose_cells};
use crate::core::{Direction, Grid, Row, SIZE};

/// Per-cell marks aligned with a grid.
pub type CellMask = [[bool; SIZE]; SIZE];

/// Result of resolving one direction against a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The candidate grid.
    pub grid: Grid,
    /// Sum of all tile values produced by merges.
    pub gained: u64,
    /// Cells of `grid` that hold a tile produced by a merge.
    pub merged: CellMask,
}

impl Resolution {
    /// Check whether the candidate differs from `before`.
    #[must_use]
    pub fn changed_from(&self, before: &Grid) -> bool {
        self.grid != *before
    }
}

/// Compress then merge one row toward index 0.
fn slide(row: Row, gained: &mut u64) -> (Row, [bool; SIZE]) {
    merge_row_marked(compress(row), |tile| *gained += u64::from(tile.value()))
}

/// Compute the grid that results from moving in `direction`.
///
/// ```
/// use rust_2048::core::{Direction, Grid};
/// use rust_2048::moves::resolve;
///
/// let grid = Grid::from_values([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
/// let first = resolve(&grid, Direction::Left);
/// assert_eq!(first.grid.values()[0], [4, 4, 0, 0]);
/// assert_eq!(first.gained, 4);
///
/// let second = resolve(&first.grid, Direction::Left);
/// assert_eq!(second.grid.values()[0], [8, 0, 0, 0]);
/// assert_eq!(second.gained, 8);
/// ```
#[must_use]
pub fn resolve(grid: &Grid, direction: Direction) -> Resolution {
    let rows = if direction.is_vertical() {
        transpose_cells(*grid.rows())
    } else {
        *grid.rows()
    };

    let mut gained = 0;
    let mut out_rows = [[None; SIZE]; SIZE];
    let mut out_mask = [[false; SIZE]; SIZE];

    for (i, row) in rows.into_iter().enumerate() {
        let (slid, mask) = if direction.is_reversed() {
            let (slid, mask) = slide(reverse(row), &mut gained);
            (reverse(slid), reverse(mask))
        } else {
            slide(row, &mut gained)
        };
        out_rows[i] = slid;
        out_mask[i] = mask;
    }

    if direction.is_vertical() {
        out_rows = transpose_cells(out_rows);
        out_mask = transpose_cells(out_mask);
    }

    Resolution {
        grid: Grid::from_rows(out_rows),
        gained,
        merged: out_mask,
    }
}

/// Check whether moving in `direction` would change the grid.
#[must_use]
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    resolve(grid, direction).changed_from(grid)
}

/// Directions that would change the grid, in [`Direction::ALL`] order.
#[must_use]
pub fn available_moves(grid: &Grid) -> SmallVec<[Direction; 4]> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| can_move(grid, direction))
        .collect()
}
