//! Session state machine.
//!
//! ## States
//!
//! - `Playing`: moves are accepted
//! - `Won`: a tile reached the win value; absorbs moves until restart
//! - `Lost`: full grid with no equal neighbors; absorbs moves until restart
//!
//! ## One Move
//!
//! 1. Resolve the direction against the current grid.
//! 2. If the candidate equals the current grid (values only), reject.
//! 3. Otherwise rebuild render hints, spawn one tile, then commit the grid
//!    and the score.
//! 4. Evaluate win, then loss.
//! 5. Update and persist the best score.
//!
//! A move is either fully applied or fully rejected; there is no
//! intermediate state visible to callers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::hints::RenderHints;
use super::spawn::{spawn_tile, Spawner};
use super::store::ScoreStore;
use crate::core::{ConfigError, Direction, EngineConfig, GameRng, Grid, Position};
use crate::input::InputEvent;
use crate::moves::resolve;

/// Session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Game in progress.
    #[default]
    Playing,
    /// Win tile reached.
    Won,
    /// No legal move remains.
    Lost,
}

impl Status {
    /// Check if this state absorbs further moves.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// Why a move left the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The session is in `Won` or `Lost`.
    Terminal,
    /// No tile could shift or merge in that direction.
    NoChange,
}

/// Result of [`Session::make_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Rejected(Rejection),
    /// The move was committed.
    Applied {
        /// Points gained from merges.
        gained: u64,
        /// Where the new tile landed, if there was room.
        spawned: Option<Position>,
        /// Status after the move.
        status: Status,
    },
}

impl MoveOutcome {
    /// Check if the move was committed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }

    /// Points gained, zero when rejected.
    #[must_use]
    pub fn gained(&self) -> u64 {
        match self {
            MoveOutcome::Applied { gained, .. } => *gained,
            MoveOutcome::Rejected(_) => 0,
        }
    }
}

/// Read-only view of a session between moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tile values.
    pub grid: Grid,
    /// Animation flags from the last transition.
    pub hints: RenderHints,
    /// Score of the current game.
    pub score: u64,
    /// Best score seen so far.
    pub high_score: u64,
    /// Current state.
    pub status: Status,
}

impl Snapshot {
    /// Check if the game is lost.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == Status::Lost
    }

    /// Check if the game is won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.status == Status::Won
    }
}

/// One game: grid, score, best score and terminal flags.
///
/// `S` persists the best score, `R` decides spawns.
///
/// ## Example
///
/// ```
/// use rust_2048::core::{Direction, GameRng};
/// use rust_2048::session::{MemoryStore, Session};
///
/// let mut session = Session::new(MemoryStore::new(), GameRng::new(42));
/// assert_eq!(session.grid().tile_count(), 2);
///
/// for direction in Direction::ALL {
///     session.make_move(direction);
/// }
/// assert!(session.high_score() >= session.score());
/// ```
#[derive(Debug)]
pub struct Session<S, R = GameRng> {
    config: EngineConfig,
    grid: Grid,
    hints: RenderHints,
    score: u64,
    high_score: u64,
    status: Status,
    store: S,
    rng: R,
}

impl<S: ScoreStore, R: Spawner> Session<S, R> {
    /// Start a session with the standard rules.
    pub fn new(store: S, rng: R) -> Self {
        Self::start(EngineConfig::default(), store, rng)
    }

    /// Start a session with custom rules.
    pub fn try_new(config: EngineConfig, store: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, store, rng))
    }

    /// Continue a saved game from `grid` and `score`.
    ///
    /// The status is evaluated from the grid, so a saved won or lost board
    /// resumes in its terminal state.
    pub fn resume(
        config: EngineConfig,
        grid: Grid,
        score: u64,
        store: S,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = load_high_score(&store, &config.high_score_key);

        let mut session = Self {
            config,
            grid,
            hints: RenderHints::cleared(),
            score,
            high_score,
            status: Status::Playing,
            store,
            rng,
        };
        session.record_high_score();
        session.status = session.evaluate();
        Ok(session)
    }

    fn start(config: EngineConfig, store: S, rng: R) -> Self {
        let high_score = load_high_score(&store, &config.high_score_key);

        let mut session = Self {
            config,
            grid: Grid::empty(),
            hints: RenderHints::cleared(),
            score: 0,
            high_score,
            status: Status::Playing,
            store,
            rng,
        };
        session.reset_board();
        session
    }

    // === Accessors ===

    /// Current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Animation hints for the last transition.
    #[must_use]
    pub fn hints(&self) -> &RenderHints {
        &self.hints
    }

    /// Score of the current game.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen by this process (seeded from the store).
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if the game is lost.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == Status::Lost
    }

    /// Check if the game is won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.status == Status::Won
    }

    /// Rules in effect.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The score store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the externally visible state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            hints: self.hints,
            score: self.score,
            high_score: self.high_score,
            status: self.status,
        }
    }

    /// End-of-game message, `None` while playing.
    #[must_use]
    pub fn outcome_message(&self) -> Option<String> {
        match self.status {
            Status::Playing => None,
            Status::Won => Some(format!(
                "You reached {}! Score: {}",
                self.config.win_value, self.score
            )),
            Status::Lost => Some(format!("Game over. You scored {} points.", self.score)),
        }
    }

    // === Transitions ===

    /// Move all tiles in `direction`.
    ///
    /// No-op in a terminal state or when nothing would shift or merge.
    #[instrument(level = "debug", skip(self), fields(score = self.score))]
    pub fn make_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "move ignored in terminal state");
            return MoveOutcome::Rejected(Rejection::Terminal);
        }

        let resolution = resolve(&self.grid, direction);
        if !resolution.changed_from(&self.grid) {
            debug!("move rejected, grid unchanged");
            return MoveOutcome::Rejected(Rejection::NoChange);
        }

        let mut grid = resolution.grid;
        let mut hints = RenderHints::from_merged(resolution.merged);
        let spawned = spawn_tile(&mut grid, &mut self.rng, self.config.four_probability);
        match spawned {
            Some(position) => hints.mark_new(position),
            None => warn!("no empty cell after a committed move, spawn skipped"),
        }

        self.grid = grid;
        self.hints = hints;
        self.score += resolution.gained;
        self.status = self.evaluate();
        self.record_high_score();

        debug!(gained = resolution.gained, ?spawned, status = ?self.status, "move applied");
        match self.status {
            Status::Won => info!(score = self.score, "game won"),
            Status::Lost => info!(score = self.score, "game lost"),
            Status::Playing => {}
        }

        MoveOutcome::Applied {
            gained: resolution.gained,
            spawned,
            status: self.status,
        }
    }

    /// Translate a raw input event and apply it.
    ///
    /// Returns `None`, touching nothing, for unrecognized input.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<MoveOutcome> {
        event.to_direction().map(|direction| self.make_move(direction))
    }

    /// Start a new game. The best score is kept.
    #[instrument(level = "debug", skip(self))]
    pub fn restart(&mut self) {
        info!(final_score = self.score, high_score = self.high_score, "restarting");
        self.reset_board();
        self.score = 0;
        self.status = Status::Playing;
    }

    fn reset_board(&mut self) {
        let mut grid = Grid::empty();
        let mut hints = RenderHints::cleared();
        for _ in 0..self.config.initial_tiles {
            if let Some(position) = spawn_tile(&mut grid, &mut self.rng, self.config.four_probability) {
                hints.mark_new(position);
            }
        }
        self.grid = grid;
        self.hints = hints;
    }

    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        debug!(high_score = self.high_score, "new high score");
        if let Err(err) = self.store.set(&self.config.high_score_key, self.high_score) {
            warn!(error = %err, "could not persist high score");
        }
    }

    fn evaluate(&self) -> Status {
        if self.grid.contains_value(self.config.win_value) {
            Status::Won
        } else if !self.grid.has_open_cell_or_pair() {
            Status::Lost
        } else {
            Status::Playing
        }
    }
}

fn load_high_score(store: &impl ScoreStore, key: &str) -> u64 {
    match store.get(key) {
        Ok(value) => value.unwrap_or(0),
        Err(err) => {
            warn!(error = %err, "could not read high score, starting from 0");
            0
        }
    }
}
