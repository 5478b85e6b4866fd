//! Undo stack of independent state snapshots.

/// Snapshot stack with a permanent root.
///
/// The root is pushed on construction and on every reset and is never
/// popped. A snapshot pushed with [`History::push`] is restored verbatim by
/// the next [`History::undo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<S> {
    stack: Vec<S>,
}

impl<S> History<S> {
    #[must_use]
    pub fn new(root: S) -> Self {
        Self { stack: vec![root] }
    }

    /// Record the state as it was before a step.
    pub fn push(&mut self, snapshot: S) {
        self.stack.push(snapshot);
    }

    /// Pop the most recent snapshot, or `None` when only the root is left.
    pub fn undo(&mut self) -> Option<S> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Discard every snapshot and start over from `root`.
    pub fn reset(&mut self, root: S) {
        self.stack.clear();
        self.stack.push(root);
    }

    /// Number of stored snapshots, root included. Always at least 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stack.len() > 1
    }

    /// The snapshot taken at the last reset.
    #[must_use]
    pub fn root(&self) -> Option<&S> {
        self.stack.first()
    }
}
