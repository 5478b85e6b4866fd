//! Bidirectional uniform-cost search with strict direction alternation.
//!
//! Each step advances exactly one half: forward, backward, forward, ...
//! The turn passes even when the active half has nothing to pop.
//!
//! A meeting node is adopted eagerly, per relaxed neighbor, whenever the
//! neighbor is already known to the opposite half and the combined cost beats
//! the current meeting node. There is no stopping bound, so the first meeting
//! found is not guaranteed optimal on every grid; that is the inherited
//! behavior and it is kept as is.

use std::collections::BTreeMap;

use gridstep_kernel::grid::{Grid, Position};

use crate::astar::{cost_map_json, parent_map_json};
use crate::contract::{Direction, SearchStatus, StepOutcome, StepStrategy, StrategyKind};
use crate::error::{check_endpoints, SearchError};
use crate::frontier::BestFirstFrontier;
use crate::path::{reconstruct_bidirectional, ParentMap};

/// One half of the search: a uniform-cost tree rooted at start or goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfSearch {
    root: Position,
    frontier: BestFirstFrontier<Position>,
    cost: BTreeMap<Position, u32>,
    parents: ParentMap,
}

impl HalfSearch {
    fn rooted_at(root: Position) -> Self {
        let mut frontier = BestFirstFrontier::new();
        frontier.push(0, root);
        Self {
            root,
            frontier,
            cost: BTreeMap::from([(root, 0)]),
            parents: BTreeMap::from([(root, None)]),
        }
    }

    #[must_use]
    pub fn root(&self) -> Position {
        self.root
    }

    /// Frontier keyed by cumulative cost `g`.
    #[must_use]
    pub fn frontier(&self) -> &BestFirstFrontier<Position> {
        &self.frontier
    }

    /// Best known cost from this half's root; a key here means "visited by
    /// this direction".
    #[must_use]
    pub fn cost_map(&self) -> &BTreeMap<Position, u32> {
        &self.cost
    }

    #[must_use]
    pub fn parents(&self) -> &ParentMap {
        &self.parents
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cost": cost_map_json(&self.cost),
            "frontier": self.frontier.to_json_value(|p| p.to_json_value()),
            "parents": parent_map_json(&self.parents),
            "root": self.root.to_json_value(),
        })
    }
}

/// Live bidirectional state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidirectionalState {
    forward: HalfSearch,
    backward: HalfSearch,
    next_direction: Direction,
    meeting: Option<Position>,
    status: SearchStatus,
    last_expanded: Option<(Direction, Position)>,
    final_path: Vec<Position>,
}

impl BidirectionalState {
    /// Initial state: each half holds only its root at cost 0; forward moves first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Grid`] if either endpoint is off-grid,
    /// obstructed, or they coincide.
    pub fn new(grid: &Grid, start: Position, goal: Position) -> Result<Self, SearchError> {
        check_endpoints(grid, start, goal)?;
        Ok(Self {
            forward: HalfSearch::rooted_at(start),
            backward: HalfSearch::rooted_at(goal),
            next_direction: Direction::Forward,
            meeting: None,
            status: SearchStatus::Ready,
            last_expanded: None,
            final_path: Vec::new(),
        })
    }

    #[must_use]
    pub fn forward(&self) -> &HalfSearch {
        &self.forward
    }

    #[must_use]
    pub fn backward(&self) -> &HalfSearch {
        &self.backward
    }

    /// The half the next `advance` will move.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    #[must_use]
    pub fn meeting(&self) -> Option<Position> {
        self.meeting
    }

    /// Combined cost through the current meeting node.
    #[must_use]
    pub fn meeting_cost(&self) -> Option<u32> {
        let m = self.meeting?;
        Some(self.forward.cost.get(&m)? + self.backward.cost.get(&m)?)
    }

    #[must_use]
    pub fn last_expanded(&self) -> Option<(Direction, Position)> {
        self.last_expanded
    }
}

/// Pop and expand one node of `own`, adopting meeting nodes against `other`.
fn expand_half(
    own: &mut HalfSearch,
    other: &HalfSearch,
    meeting: &mut Option<Position>,
    grid: &Grid,
    direction: Direction,
) -> StepOutcome {
    let Some((key, position)) = own.frontier.pop() else {
        return StepOutcome::Idle { direction };
    };
    let g = key.priority;
    if own.cost.get(&position).is_some_and(|&best| g > best) {
        tracing::trace!(direction = direction.as_str(), %position, g, "discarded stale entry");
        return StepOutcome::Stale {
            position,
            direction: Some(direction),
        };
    }

    let mut discovered = Vec::new();
    for neighbor in grid.open_neighbors(position) {
        let tentative = g + 1;
        if own.cost.get(&neighbor).is_some_and(|&best| tentative >= best) {
            continue;
        }
        own.cost.insert(neighbor, tentative);
        own.parents.insert(neighbor, Some(position));
        own.frontier.push(tentative, neighbor);
        discovered.push(neighbor);

        if let Some(other_cost) = other.cost.get(&neighbor) {
            let total = tentative + other_cost;
            let best = meeting.and_then(|m| Some(own.cost.get(&m)? + other.cost.get(&m)?));
            if best.is_none_or(|b| total < b) {
                tracing::trace!(direction = direction.as_str(), %neighbor, total, "meeting node adopted");
                *meeting = Some(neighbor);
            }
        }
    }

    StepOutcome::Expanded {
        position,
        direction: Some(direction),
        discovered,
    }
}

impl StepStrategy for BidirectionalState {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bidirectional
    }

    fn advance(&mut self, grid: &Grid) -> StepOutcome {
        if self.status.is_terminal() {
            return StepOutcome::Terminal;
        }
        if self.forward.frontier.is_empty() && self.backward.frontier.is_empty() {
            self.status = SearchStatus::Exhausted;
            return StepOutcome::Terminal;
        }
        self.status = SearchStatus::Running;

        let direction = self.next_direction;
        self.next_direction = direction.opposite();

        let Self {
            forward,
            backward,
            meeting,
            ..
        } = self;
        let outcome = match direction {
            Direction::Forward => expand_half(forward, backward, meeting, grid, direction),
            Direction::Backward => expand_half(backward, forward, meeting, grid, direction),
        };
        if let StepOutcome::Expanded { position, .. } = outcome {
            self.last_expanded = Some((direction, position));
        }

        if let Some(m) = self.meeting {
            self.status = SearchStatus::Found;
            self.final_path =
                reconstruct_bidirectional(m, &self.forward.parents, &self.backward.parents);
            tracing::debug!(
                meeting = %m,
                cost = self.meeting_cost(),
                "bidirectional halves met"
            );
        } else if self.forward.frontier.is_empty() && self.backward.frontier.is_empty() {
            self.status = SearchStatus::Exhausted;
            tracing::debug!("bidirectional frontiers exhausted");
        }
        outcome
    }

    fn status(&self) -> SearchStatus {
        self.status
    }

    fn meeting_or_goal(&self) -> Option<Position> {
        self.meeting
    }

    fn final_path(&self) -> &[Position] {
        &self.final_path
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "backward": self.backward.to_json_value(),
            "final_path": self.final_path.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "forward": self.forward.to_json_value(),
            "last_expanded": self
                .last_expanded
                .map(|(d, p)| serde_json::json!([d.as_str(), p.to_json_value()])),
            "meeting": self.meeting.map(Position::to_json_value),
            "next_direction": self.next_direction.as_str(),
            "status": self.status.as_str(),
            "strategy": StrategyKind::Bidirectional.as_str(),
        })
    }
}
