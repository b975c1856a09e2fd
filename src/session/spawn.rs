//! Random tile spawning.
//!
//! The session never calls an entropy source directly; it asks a
//! [`Spawner`] which empty cell to fill and with what value. [`GameRng`]
//! is the production spawner, [`ScriptedSpawner`] replays a fixed sequence.

use std::collections::VecDeque;

use crate::core::{GameRng, Grid, Position, Tile};

/// Source of spawn decisions.
pub trait Spawner {
    /// Pick an index into the `empty_count` empty cells (row-major order)
    /// and the tile to place there.
    ///
    /// `empty_count` is always at least 1. Implementations must return an
    /// index below `empty_count`.
    fn pick(&mut self, empty_count: usize, four_probability: f64) -> (usize, Tile);
}

impl Spawner for GameRng {
    fn pick(&mut self, empty_count: usize, four_probability: f64) -> (usize, Tile) {
        let index = self.gen_range_usize(0..empty_count);
        let tile = if self.gen_bool(four_probability) {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        (index, tile)
    }
}

impl<S: Spawner + ?Sized> Spawner for &mut S {
    fn pick(&mut self, empty_count: usize, four_probability: f64) -> (usize, Tile) {
        (**self).pick(empty_count, four_probability)
    }
}

impl<S: Spawner + ?Sized> Spawner for Box<S> {
    fn pick(&mut self, empty_count: usize, four_probability: f64) -> (usize, Tile) {
        (**self).pick(empty_count, four_probability)
    }
}

/// Replays a fixed list of `(index, tile)` picks.
///
/// Indices wrap modulo the number of empty cells. Once the script runs out
/// every spawn is a 2 in the first empty cell.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSpawner {
    picks: VecDeque<(usize, Tile)>,
}

impl ScriptedSpawner {
    /// Create a spawner from a script.
    pub fn new(picks: impl IntoIterator<Item = (usize, Tile)>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Append a pick to the script.
    pub fn push(&mut self, index: usize, tile: Tile) {
        self.picks.push_back((index, tile));
    }

    /// Picks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl Spawner for ScriptedSpawner {
    fn pick(&mut self, empty_count: usize, _four_probability: f64) -> (usize, Tile) {
        match self.picks.pop_front() {
            Some((index, tile)) => (index % empty_count, tile),
            None => (0, Tile::TWO),
        }
    }
}

/// Place one spawned tile into a uniformly chosen empty cell.
///
/// `four_probability` is clamped to `[0, 1]`; NaN counts as `0`.
///
/// Returns the filled position, or `None` (grid untouched) when the grid is
/// full.
pub fn spawn_tile(grid: &mut Grid, spawner: &mut impl Spawner, four_probability: f64) -> Option<Position> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let four_probability = if four_probability.is_nan() {
        0.0
    } else {
        four_probability.clamp(0.0, 1.0)
    };
    let (index, tile) = spawner.pick(empty.len(), four_probability);
    let position = empty[index.min(empty.len() - 1)];
    grid.set(position, Some(tile));
    Some(position)
}
