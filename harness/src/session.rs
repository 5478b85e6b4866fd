//! Search session: the externally clocked driver around one engine.
//!
//! # Lifecycle
//!
//! ```text
//! new(config, policy, obstacles) → [step() | undo()]* → reset(obstacles) → ...
//! ```
//!
//! `step()` snapshots the live state, then advances the engine by one unit.
//! `undo()` restores the most recent snapshot. `reset()` rebuilds the grid
//! and the engine and clears history down to the new root.

use std::collections::BTreeSet;

use rand::Rng;

use gridstep_kernel::grid::{Grid, GridConfig, GridError, Position};
use gridstep_kernel::maze;
use gridstep_kernel::proof::canon::{canonical_json_bytes, CanonError};
use gridstep_kernel::proof::hash::{canonical_hash, ContentHash};
use gridstep_kernel::proof::hash_domain::HashDomain;
use gridstep_search::contract::{SearchStatus, StepOutcome, StepStrategy};
use gridstep_search::error::SearchError;
use gridstep_search::policy::SearchPolicyV1;
use gridstep_search::state::StrategyState;

use crate::history::History;

/// Error raised by session construction, reset, or digesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Config or obstacle set rejected by the grid.
    Grid(GridError),
    /// Engine construction failed.
    Search(SearchError),
    /// State projection could not be canonicalized.
    Canon(CanonError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
            Self::Canon(e) => write!(f, "canon: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for SessionError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// What one `step()` call reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based index of the step, or the current count if nothing advanced.
    pub step_index: u64,
    pub outcome: StepOutcome,
    pub status: SearchStatus,
    pub found: bool,
    /// Start-to-goal route; empty until found.
    pub final_path: Vec<Position>,
}

impl StepReport {
    #[must_use]
    pub fn made_progress(&self) -> bool {
        self.outcome.made_progress()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "final_path": self.final_path.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "found": self.found,
            "outcome": self.outcome.to_json_value(),
            "status": self.status.as_str(),
            "step_index": self.step_index,
        })
    }
}

/// Result of an `undo()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// A snapshot was restored; `depth` is the history depth afterwards.
    Restored { depth: usize },
    /// Only the root snapshot remained; nothing changed.
    AtRoot,
}

impl UndoOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restored { .. } => "restored",
            Self::AtRoot => "at_root",
        }
    }
}

/// One interactive search over one grid configuration.
#[derive(Debug, Clone)]
pub struct SearchSession {
    config: GridConfig,
    policy: SearchPolicyV1,
    grid: Grid,
    state: StrategyState,
    history: History<StrategyState>,
    steps_taken: u64,
}

impl SearchSession {
    /// Build a session and take the root snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] for a bad config or an obstacle on an
    /// endpoint, and [`SessionError::Search`] if the engine rejects the
    /// endpoints.
    pub fn new(
        config: GridConfig,
        policy: SearchPolicyV1,
        obstacles: BTreeSet<Position>,
    ) -> Result<Self, SessionError> {
        let grid = config.grid(obstacles)?;
        let state = StrategyState::new(&policy, &grid, config.start, config.goal)?;
        tracing::info!(
            strategy = policy.strategy.as_str(),
            rows = config.rows,
            cols = config.cols,
            obstacles = grid.obstacles().len(),
            "session created"
        );
        Ok(Self {
            config,
            policy,
            grid,
            history: History::new(state.snapshot()),
            state,
            steps_taken: 0,
        })
    }

    /// Session on [`GridConfig::default`] with the default obstacle layout.
    ///
    /// # Errors
    ///
    /// See [`SearchSession::new`].
    pub fn with_defaults(policy: SearchPolicyV1) -> Result<Self, SessionError> {
        Self::new(GridConfig::default(), policy, GridConfig::default_obstacles())
    }

    /// Rebuild grid and engine from `obstacles`; history collapses to the new
    /// root. On error the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`SearchSession::new`].
    pub fn reset(&mut self, obstacles: BTreeSet<Position>) -> Result<(), SessionError> {
        let grid = self.config.grid(obstacles)?;
        let state = StrategyState::new(&self.policy, &grid, self.config.start, self.config.goal)?;
        self.history.reset(state.snapshot());
        self.grid = grid;
        self.state = state;
        self.steps_taken = 0;
        tracing::info!(
            strategy = self.policy.strategy.as_str(),
            obstacles = self.grid.obstacles().len(),
            "session reset"
        );
        Ok(())
    }

    /// Reset to the default obstacle layout.
    ///
    /// # Errors
    ///
    /// Same as [`SearchSession::new`].
    pub fn reset_default(&mut self) -> Result<(), SessionError> {
        self.reset(GridConfig::default_obstacles())
    }

    /// Reset to a freshly generated solvable maze with `count` obstacles.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if `count` cannot fit on the grid.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let obstacles = maze::generate(&self.config, count, rng)?;
        self.reset(obstacles)
    }

    /// Advance the engine by one unit of work.
    ///
    /// A terminal session reports [`StepOutcome::Terminal`] and records no
    /// snapshot, so repeated steps after termination change nothing.
    pub fn step(&mut self) -> StepReport {
        let outcome = if self.state.is_terminal() {
            StepOutcome::Terminal
        } else {
            self.history.push(self.state.snapshot());
            self.steps_taken += 1;
            self.state.advance(&self.grid)
        };
        if self.state.is_terminal() && outcome != StepOutcome::Terminal {
            tracing::info!(
                status = self.state.status().as_str(),
                steps = self.steps_taken,
                path_len = self.state.final_path().len(),
                "search finished"
            );
        }
        StepReport {
            step_index: self.steps_taken,
            outcome,
            status: self.state.status(),
            found: self.state.found(),
            final_path: self.state.final_path().to_vec(),
        }
    }

    /// Step until terminal or until `max_steps` calls have been made.
    pub fn run(&mut self, max_steps: usize) -> Vec<StepReport> {
        let mut reports = Vec::new();
        while !self.state.is_terminal() && reports.len() < max_steps {
            reports.push(self.step());
        }
        reports
    }

    /// Restore the state as it was before the most recent step.
    pub fn undo(&mut self) -> UndoOutcome {
        match self.history.undo() {
            Some(snapshot) => {
                self.state.restore(snapshot);
                self.steps_taken = self.steps_taken.saturating_sub(1);
                tracing::debug!(depth = self.history.depth(), "undo");
                UndoOutcome::Restored {
                    depth: self.history.depth(),
                }
            }
            None => UndoOutcome::AtRoot,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read-only view of the live engine state.
    #[must_use]
    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.state.status()
    }

    #[must_use]
    pub fn found(&self) -> bool {
        self.state.found()
    }

    #[must_use]
    pub fn final_path(&self) -> &[Position] {
        self.state.final_path()
    }

    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// JSON projection of config, policy, grid, and engine state.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "config": self.config.to_json_value(),
            "grid": self.grid.to_json_value(),
            "policy": self.policy.to_json_value(),
            "state": self.state.to_json_value(),
        })
    }

    /// Digest of [`SearchSession::to_json_value`] under the search-state domain.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Canon`] if the projection is not canonicalizable.
    pub fn state_digest(&self) -> Result<ContentHash, SessionError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchState, &bytes))
    }
}
