//! Typed search errors.
//!
//! `SearchError` covers construction-time failures only. Running out of
//! frontier or agenda is a terminal [`crate::contract::SearchStatus`], never
//! an error.

use gridstep_kernel::grid::{Grid, GridError, Position};

/// Typed failure for engine construction and policy parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid rejected an endpoint.
    Grid(GridError),
    /// A strategy name did not match any engine.
    UnknownStrategy { name: String },
    /// An agenda policy name did not match any policy.
    UnknownAgendaPolicy { name: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid error: {e}"),
            Self::UnknownStrategy { name } => write!(f, "unknown strategy: {name}"),
            Self::UnknownAgendaPolicy { name } => write!(f, "unknown agenda policy: {name}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Pre-flight check shared by every engine constructor.
///
/// # Errors
///
/// Returns [`GridError::OutOfBoundsPosition`] for an off-grid endpoint,
/// [`GridError::InvalidObstacleSet`] for an obstructed endpoint, and
/// [`GridError::CoincidentEndpoints`] when start equals goal.
pub fn check_endpoints(grid: &Grid, start: Position, goal: Position) -> Result<(), SearchError> {
    for endpoint in [start, goal] {
        grid.check_in_bounds(endpoint)?;
        if grid.is_obstacle(endpoint) {
            return Err(GridError::InvalidObstacleSet { blocked: endpoint }.into());
        }
    }
    if start == goal {
        return Err(GridError::CoincidentEndpoints { position: start }.into());
    }
    Ok(())
}
