//! Grid model: bounds, obstacles, validity, and 4-connected adjacency.
//!
//! A [`Grid`] is built once per reset from a [`GridConfig`] and an obstacle
//! set, and is never mutated afterwards. Construction is the single place
//! where caller-supplied positions are checked; everything downstream may
//! assume in-bounds positions and unobstructed endpoints.

pub mod config;
pub mod position;

use std::collections::BTreeSet;

use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

pub use config::{GridConfig, DEFAULT_OBSTACLES, DEFAULT_RANDOM_OBSTACLE_COUNT};
pub use position::Position;

/// Neighbor offsets in expansion order: up, down, left, right.
///
/// Every engine and the rule generator iterate neighbors in this order, so it
/// is part of the deterministic contract.
pub const MOVES: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Typed failure for grid construction and maze generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// `rows` or `cols` is not strictly positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// A caller-supplied position lies outside the grid.
    OutOfBoundsPosition { position: Position, rows: i32, cols: i32 },
    /// The obstacle set covers the start or the goal.
    InvalidObstacleSet { blocked: Position },
    /// Start and goal are the same cell.
    CoincidentEndpoints { position: Position },
    /// More obstacles requested than there are free cells to place them in.
    ObstacleCountInfeasible { requested: usize, available: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::OutOfBoundsPosition {
                position,
                rows,
                cols,
            } => write!(f, "position {position} is outside the {rows}x{cols} grid"),
            Self::InvalidObstacleSet { blocked } => {
                write!(f, "obstacle set covers endpoint {blocked}")
            }
            Self::CoincidentEndpoints { position } => {
                write!(f, "start and goal are both {position}")
            }
            Self::ObstacleCountInfeasible {
                requested,
                available,
            } => write!(
                f,
                "cannot place {requested} obstacles in {available} free cells"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size obstacle grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    obstacles: BTreeSet<Position>,
}

impl Grid {
    /// Build a grid, rejecting non-positive dimensions and off-grid obstacles.
    ///
    /// Endpoint checks live in [`GridConfig::grid`], which is the constructor
    /// sessions use.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] or
    /// [`GridError::OutOfBoundsPosition`].
    pub fn new(rows: i32, cols: i32, obstacles: BTreeSet<Position>) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let grid = Self {
            rows,
            cols,
            obstacles,
        };
        if let Some(&position) = grid.obstacles.iter().find(|p| !grid.in_bounds(**p)) {
            return Err(GridError::OutOfBoundsPosition {
                position,
                rows,
                cols,
            });
        }
        Ok(grid)
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub fn obstacles(&self) -> &BTreeSet<Position> {
        &self.obstacles
    }

    /// Total number of cells (`rows * cols`).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        // Both dimensions are positive by construction.
        self.rows.unsigned_abs() as usize * self.cols.unsigned_abs() as usize
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.cols).contains(&pos.col)
    }

    #[must_use]
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// In bounds and not an obstacle.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_obstacle(pos)
    }

    /// In-bounds neighbors in [`MOVES`] order. Obstacles are NOT filtered.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        MOVES
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// In-bounds, non-obstacle neighbors in [`MOVES`] order.
    #[must_use]
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        MOVES
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|n| self.is_valid(*n))
            .collect()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Check that `pos` is on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBoundsPosition`] for off-grid positions.
    pub fn check_in_bounds(&self, pos: Position) -> Result<(), GridError> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBoundsPosition {
                position: pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// JSON projection: dimensions plus obstacles in row-major order.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let obstacles: Vec<serde_json::Value> =
            self.obstacles.iter().map(|p| p.to_json_value()).collect();
        serde_json::json!({
            "cols": self.cols,
            "obstacles": obstacles,
            "rows": self.rows,
        })
    }

    /// Digest of [`Grid::to_json_value`] under [`HashDomain::GridLayout`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the projection is not canonicalizable.
    pub fn layout_digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::GridLayout, &bytes))
    }
}
