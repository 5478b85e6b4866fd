//! Forward-chaining engine: reachability as production-rule deduction.
//!
//! Facts are positions proven reachable from start. The only rule family is
//! `At(x) ∧ CanMove(x, y) ⇒ At(y)`, generated on demand from the current grid
//! in neighbor order. Each step fires at most one rule.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use gridstep_kernel::grid::{Grid, Position};

use crate::astar::parent_map_json;
use crate::contract::{MoveRule, SearchStatus, StepOutcome, StepStrategy, StrategyKind};
use crate::error::{check_endpoints, SearchError};
use crate::path::{reconstruct_path, ParentMap};
use crate::policy::AgendaPolicyV1;

/// Rules with antecedent `x`, in neighbor order.
pub fn rules_for(grid: &Grid, x: Position) -> impl Iterator<Item = MoveRule> + '_ {
    let neighbors = if grid.is_valid(x) {
        grid.open_neighbors(x)
    } else {
        Vec::new()
    };
    neighbors.into_iter().map(move |y| MoveRule {
        antecedent: x,
        consequent: y,
    })
}

/// Every rule instance on `grid`, antecedents in row-major order.
#[must_use]
pub fn rule_base(grid: &Grid) -> Vec<MoveRule> {
    grid.cells().flat_map(|x| rules_for(grid, x)).collect()
}

/// Live forward-chaining state.
///
/// Invariants: `facts` never shrinks, every agenda entry is a fact, and every
/// consequent in `chain` is a fact that appears there exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardChainingState {
    start: Position,
    goal: Position,
    policy: AgendaPolicyV1,
    facts: BTreeSet<Position>,
    agenda: VecDeque<Position>,
    parents: ParentMap,
    chain: Vec<MoveRule>,
    last_rule: Option<MoveRule>,
    status: SearchStatus,
    final_path: Vec<Position>,
}

impl ForwardChainingState {
    /// Initial state: `facts = {start}`, `agenda = [start]`, empty chain.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Grid`] if either endpoint is off-grid,
    /// obstructed, or they coincide.
    pub fn new(
        grid: &Grid,
        start: Position,
        goal: Position,
        policy: AgendaPolicyV1,
    ) -> Result<Self, SearchError> {
        check_endpoints(grid, start, goal)?;
        Ok(Self {
            start,
            goal,
            policy,
            facts: BTreeSet::from([start]),
            agenda: VecDeque::from([start]),
            parents: BTreeMap::from([(start, None)]),
            chain: Vec::new(),
            last_rule: None,
            status: SearchStatus::Ready,
            final_path: Vec::new(),
        })
    }

    #[must_use]
    pub fn policy(&self) -> AgendaPolicyV1 {
        self.policy
    }

    #[must_use]
    pub fn facts(&self) -> &BTreeSet<Position> {
        &self.facts
    }

    #[must_use]
    pub fn agenda(&self) -> &VecDeque<Position> {
        &self.agenda
    }

    #[must_use]
    pub fn parents(&self) -> &ParentMap {
        &self.parents
    }

    /// Every rule fired so far, in firing order.
    #[must_use]
    pub fn inference_chain(&self) -> &[MoveRule] {
        &self.chain
    }

    /// Rule fired by the most recent step, if that step fired one.
    #[must_use]
    pub fn last_rule(&self) -> Option<MoveRule> {
        self.last_rule
    }

    fn first_unproven(&self, grid: &Grid, antecedent: Position) -> Option<MoveRule> {
        rules_for(grid, antecedent).find(|rule| !self.facts.contains(&rule.consequent))
    }

    fn settle_exhaustion(&mut self) {
        if self.status != SearchStatus::Found && self.agenda.is_empty() {
            self.status = SearchStatus::Exhausted;
            tracing::debug!(facts = self.facts.len(), "agenda exhausted");
        }
    }
}

impl StepStrategy for ForwardChainingState {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ForwardChaining
    }

    fn advance(&mut self, grid: &Grid) -> StepOutcome {
        if self.status.is_terminal() {
            return StepOutcome::Terminal;
        }
        let Some(&head) = self.agenda.front() else {
            self.status = SearchStatus::Exhausted;
            return StepOutcome::Terminal;
        };
        self.status = SearchStatus::Running;
        if self.policy == AgendaPolicyV1::SingleFiring {
            self.agenda.pop_front();
        }

        let Some(rule) = self.first_unproven(grid, head) else {
            if self.policy == AgendaPolicyV1::Saturating {
                self.agenda.pop_front();
            }
            self.last_rule = None;
            tracing::trace!(antecedent = %head, "antecedent retired");
            self.settle_exhaustion();
            return StepOutcome::Retired { antecedent: head };
        };

        let y = rule.consequent;
        self.facts.insert(y);
        self.agenda.push_back(y);
        self.parents.insert(y, Some(head));
        self.chain.push(rule);
        self.last_rule = Some(rule);
        tracing::trace!(%rule, "rule fired");

        if y == self.goal {
            self.status = SearchStatus::Found;
            self.final_path = reconstruct_path(&self.parents, self.goal);
            tracing::debug!(
                firings = self.chain.len(),
                cost = self.final_path.len().saturating_sub(1),
                "goal deduced"
            );
        }
        StepOutcome::Fired(rule)
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
            "agenda": self.agenda.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "chain": self.chain.iter().map(MoveRule::to_json_value).collect::<Vec<_>>(),
            "facts": self.facts.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "final_path": self.final_path.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
            "goal": self.goal.to_json_value(),
            "last_rule": self.last_rule.as_ref().map(MoveRule::to_json_value),
            "parents": parent_map_json(&self.parents),
            "policy": self.policy.as_str(),
            "start": self.start.to_json_value(),
            "status": self.status.as_str(),
            "strategy": StrategyKind::ForwardChaining.as_str(),
        })
    }
}
