//! Route reconstruction from parent maps.

use std::collections::BTreeMap;

use gridstep_kernel::grid::Position;

/// Per-position back-pointers; `None` marks a root.
pub type ParentMap = BTreeMap<Position, Option<Position>>;

/// Follow parent pointers from `from` until a root or an unknown position.
///
/// Returns `from` first. The walk is capped at `parents.len() + 1` positions,
/// so a malformed (cyclic) map truncates instead of looping.
fn walk_to_root(parents: &ParentMap, from: Position) -> Vec<Position> {
    let mut chain = Vec::new();
    let mut current = Some(from);
    while let Some(pos) = current {
        if chain.len() > parents.len() {
            break;
        }
        chain.push(pos);
        current = parents.get(&pos).copied().flatten();
    }
    chain
}

/// Root-to-`target` route through a single parent tree.
///
/// Empty if `target` was never reached.
#[must_use]
pub fn reconstruct_path(parents: &ParentMap, target: Position) -> Vec<Position> {
    if !parents.contains_key(&target) {
        return Vec::new();
    }
    let mut path = walk_to_root(parents, target);
    path.reverse();
    path
}

/// Start-to-goal route through a meeting node.
///
/// The forward part (start → meeting) is the reversed forward chain. The
/// backward part is the backward chain after the meeting node, already
/// ordered goal-ward because backward parents point toward the goal.
#[must_use]
pub fn reconstruct_bidirectional(
    meeting: Position,
    forward: &ParentMap,
    backward: &ParentMap,
) -> Vec<Position> {
    if !forward.contains_key(&meeting) || !backward.contains_key(&meeting) {
        return Vec::new();
    }
    let mut path = reconstruct_path(forward, meeting);
    let tail = walk_to_root(backward, meeting);
    path.extend(tail.into_iter().skip(1));
    path
}

/// Number of unit moves along `path` (nodes minus one).
#[must_use]
pub fn path_cost(path: &[Position]) -> usize {
    path.len().saturating_sub(1)
}

/// Render a route as `(r, c) -> (r, c) -> ...`.
#[must_use]
pub fn render_path(path: &[Position]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
