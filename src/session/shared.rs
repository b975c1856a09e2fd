//! Thread-safe session handle.
//!
//! All transitions go through one mutex, so concurrent callers observe
//! moves as a strict sequence of whole transitions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::game::{MoveOutcome, Session, Snapshot};
use super::spawn::Spawner;
use super::store::ScoreStore;
use crate::core::{Direction, GameRng};

/// Cloneable handle serializing access to one [`Session`].
#[derive(Debug)]
pub struct SharedSession<S, R = GameRng> {
    inner: Arc<Mutex<Session<S, R>>>,
}

impl<S, R> Clone for SharedSession<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ScoreStore, R: Spawner> SharedSession<S, R> {
    /// Wrap a session.
    pub fn new(session: Session<S, R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // Spawner calls run before a move commits and store writes run after,
    // so a panic inside either leaves a whole transition behind and a
    // poisoned lock still guards a consistent session.
    fn lock(&self) -> MutexGuard<'_, Session<S, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Session::make_move`].
    pub fn make_move(&self, direction: Direction) -> MoveOutcome {
        self.lock().make_move(direction)
    }

    /// See [`Session::restart`].
    pub fn restart(&self) {
        self.lock().restart();
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<T>(&self, f: impl FnOnce(&mut Session<S, R>) -> T) -> T {
        f(&mut self.lock())
    }
}
