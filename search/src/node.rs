//! A* search node and the frontier ordering key.

use gridstep_kernel::grid::Position;

/// An immutable A* node.
///
/// `f = g + h` is computed once in [`SearchNode::new`]; fields are private so
/// it can never drift from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    position: Position,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<Position>,
}

impl SearchNode {
    #[must_use]
    pub fn new(position: Position, g: u32, h: u32, parent: Option<Position>) -> Self {
        Self {
            position,
            g,
            h,
            f: g.saturating_add(h),
            parent,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Cost from start.
    #[must_use]
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Heuristic estimate to goal.
    #[must_use]
    pub fn h(&self) -> u32 {
        self.h
    }

    /// `g + h`, the frontier priority.
    #[must_use]
    pub fn f(&self) -> u32 {
        self.f
    }

    #[must_use]
    pub fn parent(&self) -> Option<Position> {
        self.parent
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "f": self.f,
            "g": self.g,
            "h": self.h,
            "parent": self.parent.map(Position::to_json_value),
            "position": self.position.to_json_value(),
        })
    }
}

/// The frontier ordering key: `(priority, creation_order)`.
///
/// Lower priority first, then older `creation_order`. Creation order is
/// stamped by the frontier on push, so ties resolve first-created-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub priority: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
