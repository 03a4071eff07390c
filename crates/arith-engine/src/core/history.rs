//! Bounded log of processed expressions
//!
//! Entries are numbered from 1 in the order they were recorded. Numbers are
//! never reused, so a listing keeps its numbering after old entries are
//! evicted.

use crate::core::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One processed expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Sequence number, starting at 1
    pub number: usize,
    /// Expression as sent for evaluation, after placeholder substitution
    pub expression: String,
    /// What processing produced
    pub outcome: Outcome,
}

impl HistoryEntry {
    /// `expression = summary`
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("{} = {}", self.expression, self.outcome.summary())
    }
}

/// Most recent entries up to a fixed capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    recorded: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl History {
    /// Entries kept unless configured otherwise
    pub const DEFAULT_CAPACITY: usize = 100;

    /// History with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `capacity` entries; zero keeps none
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
            recorded: 0,
        }
    }

    /// Records an expression, evicting the oldest entry when full.
    /// Returns the number given to it.
    pub fn record(&mut self, expression: impl Into<String>, outcome: Outcome) -> usize {
        self.recorded += 1;
        let number = self.recorded;
        if self.capacity == 0 {
            return number;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            number,
            expression: expression.into(),
            outcome,
        });
        number
    }

    /// Entries currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum entries held
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries ever recorded, evicted ones included
    #[must_use]
    pub const fn total_recorded(&self) -> usize {
        self.recorded
    }

    /// Drops every held entry; numbering continues
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Newest entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entry with the given sequence number, if still held
    #[must_use]
    pub fn get(&self, number: usize) -> Option<&HistoryEntry> {
        let first = self.entries.front()?.number;
        self.entries.get(number.checked_sub(first)?)
    }

    /// Numbered listing, oldest first, one entry per line
    #[must_use]
    pub fn listing(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("{:>3}  {}", entry.number, entry.summary_line()))
            .collect();
        lines.join("\n")
    }

    /// JSON snapshot including capacity and numbering
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a snapshot, dropping the oldest entries if it exceeds its capacity
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut history: Self = serde_json::from_str(json)?;
        while history.entries.len() > history.capacity {
            history.entries.pop_front();
        }
        Ok(history)
    }
}
