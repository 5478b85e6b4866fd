//! Search policy types.

use std::str::FromStr;

use crate::contract::StrategyKind;
use crate::error::SearchError;

/// Strategy selection and strategy-specific knobs, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicyV1 {
    /// Which engine drives the session.
    pub strategy: StrategyKind,
    /// How the forward-chaining engine consumes its agenda. Ignored by the
    /// other engines.
    pub agenda: AgendaPolicyV1,
}

impl SearchPolicyV1 {
    #[must_use]
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "agenda": self.agenda.as_str(),
            "strategy": self.strategy.as_str(),
        })
    }
}

/// Agenda consumption for forward chaining.
///
/// [`AgendaPolicyV1::SingleFiring`] is the reference behavior of the
/// generalized-modus-ponens step: dequeue the head, fire at most one rule.
/// The default is [`AgendaPolicyV1::Saturating`], which trades more steps for
/// a shortest route (default maze: 45 steps and cost 9, against 19 steps and
/// cost 19 under the reference rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgendaPolicyV1 {
    /// The head fact stays at the head while it still proves new facts and is
    /// retired by the first step that finds nothing left to prove. Complete
    /// breadth-first deduction. Default.
    #[default]
    Saturating,
    /// Reference behavior. The head fact is dequeued before scanning and
    /// fires at most one rule. Cheaper per step but can strand the goal on a
    /// solvable grid.
    SingleFiring,
}

impl AgendaPolicyV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saturating => "saturating",
            Self::SingleFiring => "single_firing",
        }
    }
}

impl FromStr for AgendaPolicyV1 {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saturating" => Ok(Self::Saturating),
            "single_firing" => Ok(Self::SingleFiring),
            other => Err(SearchError::UnknownAgendaPolicy {
                name: other.to_string(),
            }),
        }
    }
}
