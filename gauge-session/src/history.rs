//! Bounded conversion history, most recent first

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

/// Number of entries kept when no capacity is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One successful conversion. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
    #[serde(rename = "category")]
    pub category_key: String,
    #[serde(rename = "fromUnit")]
    pub from_unit_key: String,
    #[serde(rename = "toUnit")]
    pub to_unit_key: String,
    #[serde(rename = "fromValue")]
    pub input_value: f64,
    #[serde(rename = "toValue")]
    pub output_value: f64,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        History::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// A zero capacity is treated as one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Record an entry as the newest. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the content with `entries` (newest first), keeping at most `capacity`
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
