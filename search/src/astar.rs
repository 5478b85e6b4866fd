//! A* engine: one frontier pop per step, Manhattan heuristic.

use std::collections::{BTreeMap, BTreeSet};

use gridstep_kernel::grid::{Grid, Position};

use crate::contract::{SearchStatus, StepOutcome, StepStrategy, StrategyKind};
use crate::error::{check_endpoints, SearchError};
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNode;
use crate::path::{reconstruct_path, ParentMap};

/// Live A* state.
///
/// The cost map holds the best `g` ever pushed for each position; any popped
/// node whose position is visited, or whose `g` exceeds that best, is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarState {
    start: Position,
    goal: Position,
    frontier: BestFirstFrontier<SearchNode>,
    cost: BTreeMap<Position, u32>,
    visited: BTreeSet<Position>,
    parents: ParentMap,
    status: SearchStatus,
    last_expanded: Option<Position>,
    final_path: Vec<Position>,
}

impl AStarState {
    /// Initial state: only the start node (`g = 0`, `h = manhattan(start, goal)`)
    /// on the frontier, nothing visited.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Grid`] if either endpoint is off-grid,
    /// obstructed, or they coincide.
    pub fn new(grid: &Grid, start: Position, goal: Position) -> Result<Self, SearchError> {
        check_endpoints(grid, start, goal)?;
        let mut frontier = BestFirstFrontier::new();
        let root = SearchNode::new(start, 0, start.manhattan(goal), None);
        frontier.push(root.f(), root);
        Ok(Self {
            start,
            goal,
            frontier,
            cost: BTreeMap::from([(start, 0)]),
            visited: BTreeSet::new(),
            parents: BTreeMap::from([(start, None)]),
            status: SearchStatus::Ready,
            last_expanded: None,
            final_path: Vec::new(),
        })
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Position {
        self.goal
    }

    #[must_use]
    pub fn frontier(&self) -> &BestFirstFrontier<SearchNode> {
        &self.frontier
    }

    /// Best known cost per discovered position.
    #[must_use]
    pub fn cost_map(&self) -> &BTreeMap<Position, u32> {
        &self.cost
    }

    #[must_use]
    pub fn visited(&self) -> &BTreeSet<Position> {
        &self.visited
    }

    #[must_use]
    pub fn parents(&self) -> &ParentMap {
        &self.parents
    }

    /// Position expanded by the most recent progressing step.
    #[must_use]
    pub fn last_expanded(&self) -> Option<Position> {
        self.last_expanded
    }

    /// Discovered, not yet expanded positions with their best `g`.
    ///
    /// This is what a renderer labels as the open set.
    #[must_use]
    pub fn open_costs(&self) -> BTreeMap<Position, u32> {
        self.cost
            .iter()
            .filter(|(p, _)| !self.visited.contains(*p))
            .map(|(p, g)| (*p, *g))
            .collect()
    }

    /// Open, unvisited neighbors of the last expanded position, in neighbor
    /// order. Empty before the first expansion.
    #[must_use]
    pub fn candidate_moves(&self, grid: &Grid) -> Vec<Position> {
        self.last_expanded
            .map(|current| {
                grid.open_neighbors(current)
                    .into_iter()
                    .filter(|n| !self.visited.contains(n))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl StepStrategy for AStarState {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AStar
    }

    fn advance(&mut self, grid: &Grid) -> StepOutcome {
        if self.status.is_terminal() {
            return StepOutcome::Terminal;
        }
        let Some((_, node)) = self.frontier.pop() else {
            self.status = SearchStatus::Exhausted;
            return StepOutcome::Terminal;
        };
        self.status = SearchStatus::Running;

        let position = node.position();
        let dominated = self.cost.get(&position).is_some_and(|&best| node.g() > best);
        if self.visited.contains(&position) || dominated {
            tracing::trace!(%position, g = node.g(), "discarded stale frontier entry");
            self.settle_exhaustion();
            return StepOutcome::Stale {
                position,
                direction: None,
            };
        }

        self.visited.insert(position);
        self.last_expanded = Some(position);

        let mut discovered = Vec::new();
        for neighbor in grid.open_neighbors(position) {
            if self.visited.contains(&neighbor) {
                continue;
            }
            let tentative = node.g() + 1;
            if self.cost.get(&neighbor).is_some_and(|&best| tentative >= best) {
                continue;
            }
            let child = SearchNode::new(
                neighbor,
                tentative,
                neighbor.manhattan(self.goal),
                Some(position),
            );
            self.frontier.push(child.f(), child);
            self.cost.insert(neighbor, tentative);
            self.parents.insert(neighbor, Some(position));
            tracing::trace!(%neighbor, g = tentative, f = child.f(), "pushed");
            discovered.push(neighbor);
        }

        if position == self.goal {
            self.status = SearchStatus::Found;
            self.final_path = reconstruct_path(&self.parents, self.goal);
            tracing::debug!(
                cost = self.final_path.len().saturating_sub(1),
                visited = self.visited.len(),
                "astar reached goal"
            );
        } else {
            self.settle_exhaustion();
        }

        StepOutcome::Expanded {
            position,
            direction: None,
            discovered,
        }
    }

    fn status(&self) -> SearchStatus {
        self.status
    }

    fn meeting_or_goal(&self) -> Option<Position> {
        (self.status == SearchStatus::Found).then_some(self.goal)
    }

    fn final_path(&self) -> &[Position] {
        &self.final_path
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cost": cost_map_json(&self.cost),
            "final_path": self.final_path.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "frontier": self.frontier.to_json_value(SearchNode::to_json_value),
            "goal": self.goal.to_json_value(),
            "last_expanded": self.last_expanded.map(Position::to_json_value),
            "parents": parent_map_json(&self.parents),
            "start": self.start.to_json_value(),
            "status": self.status.as_str(),
            "strategy": StrategyKind::AStar.as_str(),
            "visited": self.visited.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
        })
    }
}

impl AStarState {
    fn settle_exhaustion(&mut self) {
        if self.frontier.is_empty() {
            self.status = SearchStatus::Exhausted;
            tracing::debug!(visited = self.visited.len(), "astar frontier exhausted");
        }
    }
}

/// `[[[r, c], cost], ...]` in position order.
pub(crate) fn cost_map_json(cost: &BTreeMap<Position, u32>) -> serde_json::Value {
    cost.iter()
        .map(|(p, g)| serde_json::json!([p.to_json_value(), g]))
        .collect()
}

/// `[[[r, c], [pr, pc] | null], ...]` in position order.
pub(crate) fn parent_map_json(parents: &ParentMap) -> serde_json::Value {
    parents
        .iter()
        .map(|(p, parent)| serde_json::json!([p.to_json_value(), parent.map(Position::to_json_value)]))
        .collect()
}
