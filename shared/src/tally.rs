use std::collections::HashMap;

use crate::candidates::CANDIDATES;
use crate::models::AggregateRow;

/// Live vote totals keyed by candidate id.
///
/// Two producers feed this state: a best-effort insert notification per new
/// vote, and a periodic full snapshot of the backend aggregate view. The
/// snapshot always replaces everything, so drift from missed or duplicated
/// notifications lasts at most one poll period. The registry is the closed
/// key set: every known id is always present, ids the backend reports that
/// the registry does not know are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<&'static str, u64>,
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

impl Tally {
    pub fn new() -> Self {
        Self {
            counts: CANDIDATES.iter().map(|c| (c.id, 0)).collect(),
        }
    }

    /// Full replace from the backend aggregate view.
    pub fn apply_snapshot(&mut self, rows: &[AggregateRow]) {
        let mut counts: HashMap<&'static str, u64> =
            CANDIDATES.iter().map(|c| (c.id, 0)).collect();
        for row in rows {
            if let Some(c) = CANDIDATES.iter().find(|c| c.id == row.candidate_id) {
                counts.insert(c.id, row.total);
            }
        }
        self.counts = counts;
    }

    /// Optimistic increment for one freshly inserted vote.
    pub fn record_insert(&mut self, candidate_id: &str) {
        if let Some(c) = CANDIDATES.iter().find(|c| c.id == candidate_id) {
            *self.counts.entry(c.id).or_insert(0) += 1;
        }
    }

    pub fn counts(&self) -> &HashMap<&'static str, u64> {
        &self.counts
    }

    pub fn count(&self, candidate_id: &str) -> u64 {
        self.counts.get(candidate_id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whole-number share of the total, 0 when no ballots are in yet.
    pub fn percentage(&self, candidate_id: &str) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.count(candidate_id) as f64 / total as f64) * 100.0).round() as u8
    }
}
