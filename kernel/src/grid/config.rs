//! Session geometry: grid size and endpoints.

use std::collections::BTreeSet;

use super::{Grid, GridError, Position};

/// The obstacle layout of the built-in "default maze".
pub const DEFAULT_OBSTACLES: [(i32, i32); 6] = [(0, 1), (2, 1), (3, 1), (2, 3), (3, 4), (4, 4)];

/// Obstacle count used when randomizing a default-sized grid.
pub const DEFAULT_RANDOM_OBSTACLE_COUNT: usize = 8;

/// Grid geometry shared by every search session.
///
/// Replaces process-wide row/column/start/goal constants: each session owns
/// its own config, so independent sessions never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Position,
    pub goal: Position,
}

impl GridConfig {
    /// Validate dimensions and endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for non-positive sizes,
    /// [`GridError::OutOfBoundsPosition`] for off-grid endpoints, and
    /// [`GridError::CoincidentEndpoints`] when start equals goal.
    pub fn validate(&self) -> Result<(), GridError> {
        let empty = Grid::new(self.rows, self.cols, BTreeSet::new())?;
        empty.check_in_bounds(self.start)?;
        empty.check_in_bounds(self.goal)?;
        if self.start == self.goal {
            return Err(GridError::CoincidentEndpoints {
                position: self.start,
            });
        }
        Ok(())
    }

    /// Build the grid for one reset.
    ///
    /// # Errors
    ///
    /// Everything [`GridConfig::validate`] rejects, plus
    /// [`GridError::InvalidObstacleSet`] when an obstacle covers the start
    /// or the goal.
    pub fn grid(&self, obstacles: BTreeSet<Position>) -> Result<Grid, GridError> {
        self.validate()?;
        for endpoint in [self.start, self.goal] {
            if obstacles.contains(&endpoint) {
                return Err(GridError::InvalidObstacleSet { blocked: endpoint });
            }
        }
        Grid::new(self.rows, self.cols, obstacles)
    }

    /// [`DEFAULT_OBSTACLES`] as a position set.
    #[must_use]
    pub fn default_obstacles() -> BTreeSet<Position> {
        DEFAULT_OBSTACLES.iter().copied().map(Position::from).collect()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cols": self.cols,
            "goal": self.goal.to_json_value(),
            "rows": self.rows,
            "start": self.start.to_json_value(),
        })
    }
}

impl Default for GridConfig {
    /// 5 rows x 6 columns, start top-left, goal bottom-right.
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 6,
            start: Position::new(0, 0),
            goal: Position::new(4, 5),
        }
    }
}
