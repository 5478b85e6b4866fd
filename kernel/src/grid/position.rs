//! Grid coordinates.

/// A `(row, col)` cell coordinate, 0-indexed.
///
/// Ordering is row-major (`row` first, then `col`), which is the iteration
/// order of every `BTreeMap`/`BTreeSet` keyed by position in this workspace.
/// Signed components let callers describe off-grid cells; the grid rejects
/// them at its boundary instead of the type making them unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset this position by `(d_row, d_col)`. No bounds check.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Manhattan distance `|Δrow| + |Δcol|`.
    ///
    /// Admissible and consistent on a 4-connected unit-cost grid.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// JSON projection `[row, col]` used by every canonical state rendering.
    #[must_use]
    pub fn to_json_value(self) -> serde_json::Value {
        serde_json::json!([self.row, self.col])
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
