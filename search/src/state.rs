//! Strategy state chosen at construction.

use gridstep_kernel::grid::{Grid, Position};

use crate::astar::AStarState;
use crate::bidirectional::BidirectionalState;
use crate::contract::{SearchStatus, StepOutcome, StepStrategy, StrategyKind};
use crate::error::SearchError;
use crate::forward_chaining::ForwardChainingState;
use crate::policy::SearchPolicyV1;

/// The live state of whichever engine the policy selected.
///
/// A session owns exactly one of these; the variant never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyState {
    AStar(AStarState),
    Bidirectional(BidirectionalState),
    ForwardChaining(ForwardChainingState),
}

impl StrategyState {
    /// Fresh state for `policy.strategy` on `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Grid`] if the endpoints are unusable on `grid`.
    pub fn new(
        policy: &SearchPolicyV1,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<Self, SearchError> {
        Ok(match policy.strategy {
            StrategyKind::AStar => Self::AStar(AStarState::new(grid, start, goal)?),
            StrategyKind::Bidirectional => {
                Self::Bidirectional(BidirectionalState::new(grid, start, goal)?)
            }
            StrategyKind::ForwardChaining => Self::ForwardChaining(ForwardChainingState::new(
                grid,
                start,
                goal,
                policy.agenda,
            )?),
        })
    }

    #[must_use]
    pub fn as_astar(&self) -> Option<&AStarState> {
        match self {
            Self::AStar(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bidirectional(&self) -> Option<&BidirectionalState> {
        match self {
            Self::Bidirectional(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_forward_chaining(&self) -> Option<&ForwardChainingState> {
        match self {
            Self::ForwardChaining(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! delegate {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            StrategyState::AStar($s) => $body,
            StrategyState::Bidirectional($s) => $body,
            StrategyState::ForwardChaining($s) => $body,
        }
    };
}

impl StepStrategy for StrategyState {
    fn kind(&self) -> StrategyKind {
        delegate!(self, s => s.kind())
    }

    fn advance(&mut self, grid: &Grid) -> StepOutcome {
        delegate!(self, s => s.advance(grid))
    }

    fn status(&self) -> SearchStatus {
        delegate!(self, s => s.status())
    }

    fn meeting_or_goal(&self) -> Option<Position> {
        delegate!(self, s => s.meeting_or_goal())
    }

    fn final_path(&self) -> &[Position] {
        delegate!(self, s => s.final_path())
    }

    fn to_json_value(&self) -> serde_json::Value {
        delegate!(self, s => s.to_json_value())
    }
}
