//! Best-first frontier with creation-order tie-breaking.
//!
//! Entries are never updated in place. An engine that finds a cheaper route
//! pushes a new entry and leaves the old one to be discarded when popped
//! (lazy deletion), so the heap only ever needs push and pop-min.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::FrontierKey;

/// A frontier entry wrapping an item with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest priority first).
#[derive(Debug, Clone)]
struct FrontierEntry<T> {
    key: Reverse<FrontierKey>,
    item: T,
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for FrontierEntry<T> {}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best entry
/// - A monotonic creation counter stamped onto every push
/// - A high-water mark of the heap size
///
/// Cloning yields a fully independent frontier.
#[derive(Debug, Clone)]
pub struct BestFirstFrontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_creation_order: u64,
    high_water: u64,
}

impl<T> BestFirstFrontier<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_creation_order: 0,
            high_water: 0,
        }
    }

    /// Push an item with the given priority. Returns the key it was filed under.
    pub fn push(&mut self, priority: u32, item: T) -> FrontierKey {
        let key = FrontierKey {
            priority,
            creation_order: self.next_creation_order,
        };
        self.next_creation_order += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            item,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        key
    }

    /// Pop the entry with the lowest key.
    #[must_use]
    pub fn pop(&mut self) -> Option<(FrontierKey, T)> {
        self.heap.pop().map(|e| (e.key.0, e.item))
    }

    /// Key of the entry [`BestFirstFrontier::pop`] would return.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// All entries in pop order (stale ones included).
    #[must_use]
    pub fn entries(&self) -> Vec<(FrontierKey, &T)> {
        let mut entries: Vec<(FrontierKey, &T)> =
            self.heap.iter().map(|e| (e.key.0, &e.item)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// JSON projection: `[[priority, creation_order, item], ...]` in pop order.
    pub fn to_json_value(&self, item_json: impl Fn(&T) -> serde_json::Value) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = self
            .entries()
            .into_iter()
            .map(|(key, item)| serde_json::json!([key.priority, key.creation_order, item_json(item)]))
            .collect();
        serde_json::json!({
            "entries": entries,
            "high_water": self.high_water,
            "next_creation_order": self.next_creation_order,
        })
    }
}

impl<T> Default for BestFirstFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two frontiers are equal when they would pop the same keyed items in the
/// same order and stamp the same keys on future pushes.
impl<T: PartialEq> PartialEq for BestFirstFrontier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.next_creation_order == other.next_creation_order
            && self.high_water == other.high_water
            && self.entries() == other.entries()
    }
}

impl<T: Eq> Eq for BestFirstFrontier<T> {}
