//! Measurement counts and execution results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count per measured bit-string.
///
/// Backed by a `BTreeMap`, so iteration is in lexicographic bit-string order
/// and every consumer sees the same enumeration for the same data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a count table from `(bitstring, count)` pairs.
    ///
    /// Repeated bit-strings accumulate.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Add `count` occurrences of `bitstring`, saturating at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.counts.entry(bitstring.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Occurrences of `bitstring`, zero when it was never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate in lexicographic bit-string order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Number of distinct bit-strings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    ///
    /// Use [`Counts::try_total_shots`] when an overflowing table must be
    /// told apart from a full one.
    pub fn total_shots(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    /// Sum of all counts, `None` if it does not fit in a `u64`.
    pub fn try_total_shots(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// The bit-string with the highest count.
    ///
    /// Ties go to the bit-string that comes first in iteration order, i.e.
    /// the lexicographically smallest one.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        let mut best: Option<(&String, u64)> = None;
        for (bitstring, &count) in &self.counts {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((bitstring, count)),
            }
        }
        best
    }

    /// Fraction of shots that produced `bitstring`.
    ///
    /// `None` when the table is empty or its total overflows.
    pub fn probability(&self, bitstring: &str) -> Option<f64> {
        match self.try_total_shots()? {
            0 => None,
            total => Some(self.get(bitstring) as f64 / total as f64),
        }
    }

    /// Entries sorted by descending count, ties in bit-string order.
    pub fn sorted(&self) -> Vec<(&String, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Output of one backend run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach an execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
