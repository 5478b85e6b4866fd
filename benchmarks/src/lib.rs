//! Shared helpers for gridstep benchmark suites.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use gridstep_kernel::grid::{GridConfig, Position};
use gridstep_kernel::maze;

/// Open square grid config with corner endpoints.
#[must_use]
pub fn square_config(side: i32) -> GridConfig {
    GridConfig {
        rows: side,
        cols: side,
        start: Position::new(0, 0),
        goal: Position::new(side - 1, side - 1),
    }
}

/// Solvable obstacle set covering roughly `density_pct` percent of cells,
/// reproducible from `seed`.
///
/// # Panics
///
/// Panics if `config` is invalid.
#[must_use]
pub fn seeded_obstacles(config: &GridConfig, density_pct: usize, seed: u64) -> BTreeSet<Position> {
    let cells = usize::try_from(config.rows * config.cols).unwrap_or(0);
    let count = cells * density_pct / 100;
    let mut rng = StdRng::seed_from_u64(seed);
    maze::generate(config, count, &mut rng).expect("benchmark config is valid")
}
