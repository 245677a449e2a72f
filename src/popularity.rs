//! Artist popularity accumulator.
//!
//! Filled while identities are extracted, then read as a frozen snapshot by
//! the naming pass and the report. Counts only ever grow during a run.

use std::collections::HashMap;

/// Artist name → occurrence count for the whole collection.
#[derive(Debug, Default)]
pub struct PopularityTable {
    counts: HashMap<String, u32>,
}

impl PopularityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence for `artist`, creating the entry on first sight.
    pub fn bump(&mut self, artist: &str) {
        *self.counts.entry(artist.to_string()).or_insert(0) += 1;
    }

    /// Current count. Artists never seen rank at zero.
    pub fn count(&self, artist: &str) -> u32 {
        self.counts.get(artist).copied().unwrap_or(0)
    }

    /// All entries, most popular first, ties broken by ascending name.
    /// The ordering is total, so repeated runs print identically.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}
