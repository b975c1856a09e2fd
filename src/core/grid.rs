//! Tiles, cells and the fixed 4×4 grid.
//!
//! ## Canonical Grid
//!
//! The grid stores tile values only. Per-move presentation flags
//! (`is_new`, `merged`) live in a separate overlay (see
//! [`crate::session::RenderHints`]), so comparing two grids with `==` is
//! always a pure value comparison.
//!
//! ## Layout
//!
//! Rows are indexed top to bottom, columns left to right. Positions are
//! `(row, col)` pairs; "row-major order" means `(0,0), (0,1), ..., (3,3)`.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Width and height of the board.
pub const SIZE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// A numbered tile. The value is always a power of two ≥ 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tile(u32);

impl Tile {
    /// The smallest spawnable tile.
    pub const TWO: Tile = Tile(2);

    /// The larger spawnable tile.
    pub const FOUR: Tile = Tile(4);

    /// The largest tile a `u32` can hold. Two of these never merge.
    pub const MAX: Tile = Tile(1 << 31);

    /// Create a tile, returning `None` unless `value` is a power of two ≥ 2.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The tile produced by merging two tiles of this value, `None` for
    /// [`Tile::MAX`].
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Check whether this tile merges with `other`.
    #[must_use]
    pub fn merges_with(self, other: Cell) -> bool {
        other == Some(self) && self.doubled().is_some()
    }
}

/// A value that cannot be a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display("{_0} is not a power of two >= 2")]
pub struct InvalidTile(#[error(not(source))] pub u32);

impl TryFrom<u32> for Tile {
    type Error = InvalidTile;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidTile(value))
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One grid position: empty or holding a tile.
pub type Cell = Option<Tile>;

/// One row (or, after transposition, one column) of the grid.
pub type Row = [Cell; SIZE];

/// A cell position as `(row, col)`.
pub type Position = (usize, usize);

/// Fixed-size 4×4 grid of cells.
///
/// `Grid` is `Copy`; every transformation returns a new grid and never
/// mutates its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: [Row; SIZE],
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: [[None; SIZE]; SIZE],
        }
    }

    /// Create a grid from its rows.
    #[must_use]
    pub const fn from_rows(rows: [Row; SIZE]) -> Self {
        Self { rows }
    }

    /// Create a grid from raw values, where `0` means empty.
    ///
    /// ```
    /// use rust_2048::core::Grid;
    ///
    /// let grid = Grid::from_values([
    ///     [2, 2, 4, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 8],
    /// ]);
    /// assert_eq!(grid.tile_count(), 4);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a non-zero value is not a power of two ≥ 2.
    #[must_use]
    pub fn from_values(values: [[u32; SIZE]; SIZE]) -> Self {
        let mut grid = Self::empty();
        for (r, row) in values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    let tile = Tile::new(value)
                        .unwrap_or_else(|| panic!("invalid tile value {value} at ({r}, {c})"));
                    grid.rows[r][c] = Some(tile);
                }
            }
        }
        grid
    }

    /// Raw values, `0` for empty cells.
    #[must_use]
    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        self.rows.map(|row| row.map(|cell| cell.map_or(0, Tile::value)))
    }

    /// All rows, top to bottom.
    #[must_use]
    pub const fn rows(&self) -> &[Row; SIZE] {
        &self.rows
    }

    /// Get a single row.
    #[must_use]
    pub const fn row(&self, r: usize) -> &Row {
        &self.rows[r]
    }

    /// Get a cell.
    #[must_use]
    pub const fn get(&self, (r, c): Position) -> Cell {
        self.rows[r][c]
    }

    /// Set a cell.
    pub fn set(&mut self, (r, c): Position, cell: Cell) {
        self.rows[r][c] = cell;
    }

    /// Build a new grid by transforming every row independently.
    #[must_use]
    pub fn map_rows(&self, f: impl FnMut(Row) -> Row) -> Self {
        Self {
            rows: self.rows.map(f),
        }
    }

    /// Iterate over `(position, tile)` for every occupied cell, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|tile| ((r, c), tile)))
        })
    }

    /// Empty positions in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[Position; CELL_COUNT]> {
        let mut empty = SmallVec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    empty.push((r, c));
                }
            }
        }
        empty
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Check whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    /// Check whether any tile has exactly the given value.
    #[must_use]
    pub fn contains_value(&self, value: u32) -> bool {
        self.tiles().any(|(_, tile)| tile.value() == value)
    }

    /// The largest tile on the board.
    #[must_use]
    pub fn max_tile(&self) -> Option<Tile> {
        self.tiles().map(|(_, tile)| tile).max()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|(_, tile)| u64::from(tile.value())).sum()
    }

    /// Check whether at least one move can still change the grid.
    ///
    /// Scans every cell once: a cell keeps the game alive if it is empty
    /// or merges with its right or bottom neighbor.
    #[must_use]
    pub fn has_open_cell_or_pair(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let Some(tile) = self.rows[r][c] else {
                    return true;
                };
                if c + 1 < SIZE && tile.merges_with(self.rows[r][c + 1]) {
                    return true;
                }
                if r + 1 < SIZE && tile.merges_with(self.rows[r + 1][c]) {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{:>5}", tile.value())?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_new() {
        assert_eq!(Tile::new(2), Some(Tile::TWO));
        assert_eq!(Tile::new(2048).map(Tile::value), Some(2048));
        assert_eq!(Tile::new(0), None);
        assert_eq!(Tile::new(1), None);
        assert_eq!(Tile::new(6), None);
    }

    #[test]
    fn test_tile_doubled() {
        assert_eq!(Tile::TWO.doubled(), Some(Tile::FOUR));
        assert_eq!(Tile::FOUR.doubled().map(Tile::value), Some(8));
        assert_eq!(Tile::new(1 << 30).and_then(Tile::doubled), Some(Tile::MAX));
        assert_eq!(Tile::MAX.doubled(), None);
    }

    #[test]
    fn test_max_tiles_do_not_merge() {
        assert_eq!(Tile::new(1 << 31), Some(Tile::MAX));
        assert!(!Tile::MAX.merges_with(Some(Tile::MAX)));
        assert!(Tile::TWO.merges_with(Some(Tile::TWO)));
        assert!(!Tile::TWO.merges_with(None));

        let max = 1 << 31;
        let mut values = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        values[3][2] = max;
        values[3][3] = max;
        let grid = Grid::from_values(values);
        assert!(!grid.has_open_cell_or_pair());
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty();
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.empty_cells().len(), CELL_COUNT);
        assert!(!grid.is_full());
        assert_eq!(grid.max_tile(), None);
    }

    #[test]
    fn test_values_roundtrip() {
        let values = [[2, 0, 0, 4], [0, 8, 0, 0], [0, 0, 16, 0], [32, 0, 0, 2048]];
        assert_eq!(Grid::from_values(values).values(), values);
    }

    #[test]
    #[should_panic(expected = "invalid tile value 3")]
    fn test_from_values_rejects_non_power() {
        let _ = Grid::from_values([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let grid = Grid::from_values([[2, 2, 2, 0], [2, 2, 2, 2], [0, 2, 2, 2], [2, 2, 2, 2]]);
        assert_eq!(grid.empty_cells().as_slice(), &[(0, 3), (2, 0)]);
    }

    #[test]
    fn test_queries() {
        let grid = Grid::from_values([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        assert!(grid.contains_value(2048));
        assert!(!grid.contains_value(8));
        assert_eq!(grid.max_tile().map(Tile::value), Some(2048));
        assert_eq!(grid.total_value(), 2054);
        assert_eq!(grid.tile_count(), 3);
    }

    #[test]
    fn test_checkerboard_is_blocked() {
        let grid = Grid::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(grid.is_full());
        assert!(!grid.has_open_cell_or_pair());
    }

    #[test]
    fn test_full_grid_with_vertical_pair_is_open() {
        let grid = Grid::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 16, 32]]);
        assert!(grid.is_full());
        assert!(grid.has_open_cell_or_pair());
    }

    #[test]
    fn test_full_grid_with_horizontal_pair_is_open() {
        let grid = Grid::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);
        assert!(grid.has_open_cell_or_pair());
    }

    #[test]
    fn test_tile_serde_rejects_invalid() {
        assert_eq!(serde_json::to_string(&Tile::FOUR).unwrap(), "4");
        assert!(serde_json::from_str::<Tile>("6").is_err());
        assert_eq!(Tile::try_from(3), Err(InvalidTile(3)));
        assert_eq!(InvalidTile(3).to_string(), "3 is not a power of two >= 2");
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        let text = grid.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), SIZE);
        assert_eq!(lines[0], "    2     .     .     .");
        assert_eq!(lines[3], "    .     .     .  1024");
    }

    #[test]
    fn test_serde() {
        let grid = Grid::from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with("{\"rows\":[[2,null,null,null]"));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
