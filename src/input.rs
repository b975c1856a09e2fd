//! Input translation boundary.
//!
//! Raw key presses and swipe gestures are mapped to exactly one
//! [`Direction`] or to nothing. Unrecognized input never reaches the
//! session.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// Swipe classification.
pub struct Swipe;

impl Swipe {
    /// Minimum travel, in pixels, for a gesture to count as a swipe.
    pub const DEFAULT_MIN_DISTANCE: f64 = 10.0;

    /// Classify a gesture by its total displacement.
    ///
    /// The dominant axis wins; screen coordinates grow downward. Gestures
    /// shorter than `min_distance` along the dominant axis are ignored.
    ///
    /// ```
    /// use rust_2048::core::Direction;
    /// use rust_2048::input::Swipe;
    ///
    /// assert_eq!(Swipe::classify(-40.0, 5.0, 10.0), Some(Direction::Left));
    /// assert_eq!(Swipe::classify(3.0, 25.0, 10.0), Some(Direction::Down));
    /// assert_eq!(Swipe::classify(4.0, 2.0, 10.0), None);
    /// ```
    #[must_use]
    pub fn classify(dx: f64, dy: f64, min_distance: f64) -> Option<Direction> {
        let (ax, ay) = (dx.abs(), dy.abs());
        if ax > ay {
            if ax < min_distance {
                return None;
            }
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            if ay < min_distance || ay == 0.0 {
                return None;
            }
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// A raw input event from the view layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Keyboard key name, e.g. `"ArrowLeft"`.
    Key(String),
    /// Completed touch gesture displacement in pixels.
    Swipe { dx: f64, dy: f64 },
}

impl InputEvent {
    /// The direction this event stands for, if any.
    #[must_use]
    pub fn to_direction(&self) -> Option<Direction> {
        match self {
            InputEvent::Key(key) => Direction::from_key(key),
            InputEvent::Swipe { dx, dy } => Swipe::classify(*dx, *dy, Swipe::DEFAULT_MIN_DISTANCE),
        }
    }
}
