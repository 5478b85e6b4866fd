//! Random solvable obstacle sets and breadth-first reachability.
//!
//! Generation is rejection sampling: draw `count` distinct free cells, keep
//! the first draw whose goal is reachable from start. The caller chooses a
//! count that is feasible for the grid; only counts that cannot even be
//! sampled are rejected.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, GridConfig, GridError, Position};

/// Generate an obstacle set for `config` with `count` obstacles, guaranteed
/// solvable from `config.start` to `config.goal`.
///
/// Deterministic for a fixed RNG state. Never includes start or goal.
///
/// # Errors
///
/// Returns the config's validation errors, or
/// [`GridError::ObstacleCountInfeasible`] if `count` exceeds the number of
/// non-endpoint cells.
///
/// Does not return if no solvable sample exists for `count` (for example a
/// count that necessarily walls off the goal).
pub fn generate<R: Rng + ?Sized>(
    config: &GridConfig,
    count: usize,
    rng: &mut R,
) -> Result<BTreeSet<Position>, GridError> {
    let empty = config.grid(BTreeSet::new())?;
    let candidates: Vec<Position> = empty
        .cells()
        .filter(|p| *p != config.start && *p != config.goal)
        .collect();
    if count > candidates.len() {
        return Err(GridError::ObstacleCountInfeasible {
            requested: count,
            available: candidates.len(),
        });
    }

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let sample: BTreeSet<Position> = candidates.choose_multiple(rng, count).copied().collect();
        let grid = Grid::new(config.rows, config.cols, sample)?;
        if is_solvable(&grid, config.start, config.goal) {
            tracing::debug!(count, attempts, "generated solvable obstacle set");
            return Ok(grid.obstacles().clone());
        }
        tracing::trace!(attempts, "rejected unsolvable obstacle sample");
    }
}

/// Breadth-first reachability: `true` iff `goal` is dequeued.
#[must_use]
pub fn is_solvable(grid: &Grid, start: Position, goal: Position) -> bool {
    bfs_distance(grid, start, goal).is_some()
}

/// Number of unit moves on a shortest 4-connected route, or `None` if the
/// goal is unreachable (or either endpoint is blocked).
#[must_use]
pub fn bfs_distance(grid: &Grid, start: Position, goal: Position) -> Option<u32> {
    if !grid.is_valid(start) || !grid.is_valid(goal) {
        return None;
    }
    let mut queue = VecDeque::from([start]);
    let mut distance: BTreeMap<Position, u32> = BTreeMap::from([(start, 0)]);
    while let Some(current) = queue.pop_front() {
        let d = distance[&current];
        if current == goal {
            return Some(d);
        }
        for next in grid.open_neighbors(current) {
            if let std::collections::btree_map::Entry::Vacant(slot) = distance.entry(next) {
                slot.insert(d + 1);
                queue.push_back(next);
            }
        }
    }
    None
}
