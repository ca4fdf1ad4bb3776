//! In-session history of completed binary computations
//!
//! Every time a pending operator is applied (by chaining or by `=`) the
//! engine records a line such as `7 + 3 = 10`. The history is bounded and
//! lives only as long as the engine.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the session, starting at 1
    pub sequence: u64,
    /// Operands and operator, e.g. `"7 + 3"`
    pub expression: String,
    /// Result as it appeared on the display
    pub result: String,
}

impl HistoryEntry {
    /// Returns `"<expression> = <result>"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Bounded FIFO of history entries
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
    next_sequence: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history keeping at most `max_entries` entries
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(Self::DEFAULT_MAX_ENTRIES)),
            max_entries,
            next_sequence: 1,
        }
    }

    /// Records a computation, evicting the oldest entry when full
    pub fn record(&mut self, expression: String, result: String) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            sequence,
            expression,
            result,
        });
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all entries; sequence numbers keep counting
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Serializes the entries to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restores a history from JSON produced by [`History::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: VecDeque<HistoryEntry> = serde_json::from_str(json)?;
        let next_sequence = entries.iter().map(|e| e.sequence).max().unwrap_or(0) + 1;
        let max_entries = entries.len().max(Self::DEFAULT_MAX_ENTRIES);
        Ok(Self {
            entries,
            max_entries,
            next_sequence,
        })
    }

    /// One line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
