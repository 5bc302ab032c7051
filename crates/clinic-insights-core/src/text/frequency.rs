//! Frequency tables and top-N ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A label with its occurrence count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

/// Label → count table that remembers first-encounter order.
///
/// Encounter order is what breaks ties when ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<RankedEntry>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn increment(&mut self, label: &str) {
        self.add(label, 1);
    }

    /// Count `n` occurrences of `label`. Adding zero is a no-op.
    pub fn add(&mut self, label: &str, n: u64) {
        if n == 0 {
            return;
        }
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += n,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(RankedEntry {
                    name: label.to_string(),
                    count: n,
                });
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.index.get(label).map(|&i| self.entries[i].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.count))
    }

    /// Sort by count descending (stable, so ties keep encounter order) and keep the first `n`.
    pub fn rank_top(&self, n: usize) -> Vec<RankedEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for label in iter {
            table.increment(label.as_ref());
        }
        table
    }
}
