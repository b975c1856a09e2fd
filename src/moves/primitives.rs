//! Grid transform primitives.
//!
//! Pure functions over a single row or a whole grid. The only side channel
//! is the `on_merge` callback of [`merge_row`], used for score accounting.
//!
//! `compress`, `reverse` and `transpose_cells` are generic over the cell
//! payload so the resolver can carry per-cell marks through the same
//! transformations as the tiles themselves.

use crate::core::{Grid, Row, Tile, SIZE};

/// Shift all occupied cells toward index 0, keeping their relative order.
///
/// ```
/// use rust_2048::core::Tile;
/// use rust_2048::moves::compress;
///
/// let t = Tile::new(2);
/// assert_eq!(compress([None, t, None, t]), [t, t, None, None]);
/// ```
#[must_use]
pub fn compress<T: Copy>(row: [Option<T>; SIZE]) -> [Option<T>; SIZE] {
    let mut out = [None; SIZE];
    for (slot, item) in out.iter_mut().zip(row.into_iter().flatten()) {
        *slot = Some(item);
    }
    out
}

/// Merge equal adjacent pairs in an already-compressed row, left to right.
///
/// Each merge calls `on_merge` once with the new tile. A tile produced by a
/// merge is never merged again in the same pass, so `[2,2,2,2]` becomes
/// `[4,4,_,_]`, not `[8,_,_,_]`. Two [`Tile::MAX`] tiles stay apart. The
/// result is compressed.
#[must_use]
pub fn merge_row(row: Row, on_merge: impl FnMut(Tile)) -> Row {
    merge_row_marked(row, on_merge).0
}

/// [`merge_row`], also returning which cells of the result came from a merge.
pub(crate) fn merge_row_marked(row: Row, mut on_merge: impl FnMut(Tile)) -> (Row, [bool; SIZE]) {
    let mut marked: [Option<(Tile, bool)>; SIZE] = row.map(|cell| cell.map(|tile| (tile, false)));

    let mut i = 0;
    while i + 1 < SIZE {
        if let (Some((a, _)), Some((b, _))) = (marked[i], marked[i + 1]) {
            if let Some(merged) = a.doubled().filter(|_| a == b) {
                marked[i] = Some((merged, true));
                marked[i + 1] = None;
                on_merge(merged);
                i += 2;
                continue;
            }
        }
        i += 1;
    }

    let compressed = compress(marked);
    (
        compressed.map(|cell| cell.map(|(tile, _)| tile)),
        compressed.map(|cell| cell.is_some_and(|(_, merged)| merged)),
    )
}

/// Reverse the order of a row.
#[must_use]
pub fn reverse<T: Copy>(mut row: [T; SIZE]) -> [T; SIZE] {
    row.reverse();
    row
}

/// Swap rows and columns of a square matrix.
#[must_use]
pub fn transpose_cells<T: Copy>(cells: [[T; SIZE]; SIZE]) -> [[T; SIZE]; SIZE] {
    std::array::from_fn(|r| std::array::from_fn(|c| cells[c][r]))
}

/// Swap rows and columns of the grid.
#[must_use]
pub fn transpose(grid: &Grid) -> Grid {
    Grid::from_rows(transpose_cells(*grid.rows()))
}
