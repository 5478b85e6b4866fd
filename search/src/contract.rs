//! The stepwise strategy contract shared by every engine.

use std::str::FromStr;

use gridstep_kernel::grid::{Grid, Position};

use crate::error::SearchError;

/// Which engine a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    #[default]
    AStar,
    Bidirectional,
    ForwardChaining,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::AStar, Self::Bidirectional, Self::ForwardChaining];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Bidirectional => "bidirectional",
            Self::ForwardChaining => "forward_chaining",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SearchError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

/// Lifecycle of a search: `Ready → Running → {Found, Exhausted}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Freshly reset; no step taken.
    Ready,
    Running,
    /// Goal reached (or meeting node settled); `final_path` is populated.
    Found,
    /// Nothing left to expand and the goal was never reached.
    Exhausted,
}

impl SearchStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Found => "found",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Which half of a bidirectional search a step advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rooted at start.
    Forward,
    /// Rooted at goal.
    Backward,
}

impl Direction {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// The production rule `At(x) ∧ CanMove(x, y) ⇒ At(y)`.
///
/// Also the element type of a forward-chaining inference chain: each firing
/// is recorded as the rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoveRule {
    pub antecedent: Position,
    pub consequent: Position,
}

impl MoveRule {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!([
            self.antecedent.to_json_value(),
            self.consequent.to_json_value()
        ])
    }
}

impl std::fmt::Display for MoveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y) = (self.antecedent, self.consequent);
        write!(f, "At{x} ∧ CanMove({x}, {y}) ⇒ At{y}")
    }
}

/// What a single `advance` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A node was popped and expanded. `discovered` lists neighbors whose
    /// cost improved (and were pushed), in neighbor order.
    Expanded {
        position: Position,
        direction: Option<Direction>,
        discovered: Vec<Position>,
    },
    /// A dominated frontier entry was popped and discarded.
    Stale {
        position: Position,
        direction: Option<Direction>,
    },
    /// The bidirectional half whose turn it was had an empty frontier.
    Idle { direction: Direction },
    /// A forward-chaining rule fired and proved a new fact.
    Fired(MoveRule),
    /// A forward-chaining antecedent left the agenda without firing.
    Retired { antecedent: Position },
    /// The search was already terminal; nothing changed.
    Terminal,
}

impl StepOutcome {
    /// Whether the step expanded a node or proved a fact.
    #[must_use]
    pub fn made_progress(&self) -> bool {
        matches!(self, Self::Expanded { .. } | Self::Fired(_))
    }

    /// The rule that fired, for forward chaining.
    #[must_use]
    pub fn fired_rule(&self) -> Option<MoveRule> {
        match self {
            Self::Fired(rule) => Some(*rule),
            _ => None,
        }
    }

    /// The direction advanced, for bidirectional search.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Expanded { direction, .. } | Self::Stale { direction, .. } => *direction,
            Self::Idle { direction } => Some(*direction),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let dir = |d: &Option<Direction>| d.map(Direction::as_str);
        match self {
            Self::Expanded {
                position,
                direction,
                discovered,
            } => serde_json::json!({
                "direction": dir(direction),
                "discovered": discovered.iter().map(|p| p.to_json_value()).collect::<Vec<_>>(),
                "position": position.to_json_value(),
                "type": "expanded",
            }),
            Self::Stale {
                position,
                direction,
            } => serde_json::json!({
                "direction": dir(direction),
                "position": position.to_json_value(),
                "type": "stale",
            }),
            Self::Idle { direction } => serde_json::json!({
                "direction": direction.as_str(),
                "type": "idle",
            }),
            Self::Fired(rule) => serde_json::json!({
                "rule": rule.to_json_value(),
                "text": rule.to_string(),
                "type": "fired",
            }),
            Self::Retired { antecedent } => serde_json::json!({
                "antecedent": antecedent.to_json_value(),
                "type": "retired",
            }),
            Self::Terminal => serde_json::json!({ "type": "terminal" }),
        }
    }
}

/// Trait for engines that advance one unit of work per call.
///
/// # Contract
///
/// - `advance` never loops internally; it does at most one expansion or one
///   rule firing.
/// - Once `status().is_terminal()`, `advance` returns
///   [`StepOutcome::Terminal`] and leaves the state untouched.
/// - `snapshot` returns a copy sharing no mutable structure with `self`;
///   `restore(snapshot())` after any number of steps yields a state equal to
///   the one snapshotted.
/// - `grid` must be the same grid the state was constructed against.
pub trait StepStrategy: Clone + PartialEq {
    fn kind(&self) -> StrategyKind;

    /// Advance by exactly one unit of work.
    fn advance(&mut self, grid: &Grid) -> StepOutcome;

    fn status(&self) -> SearchStatus;

    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    fn found(&self) -> bool {
        self.status() == SearchStatus::Found
    }

    /// Goal (A*, forward chaining) or meeting node (bidirectional), once known.
    fn meeting_or_goal(&self) -> Option<Position>;

    /// Start-to-goal route; empty until found.
    fn final_path(&self) -> &[Position];

    fn snapshot(&self) -> Self {
        self.clone()
    }

    fn restore(&mut self, snapshot: Self) {
        *self = snapshot;
    }

    /// Full JSON projection, the input to state digests.
    fn to_json_value(&self) -> serde_json::Value;
}
