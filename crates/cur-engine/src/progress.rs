//! Progress derived from dataset size and ledger membership.

use std::collections::BTreeSet;

use cur_core::entities::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Review progress counts. Re-derived from a ledger read, never tracked
/// incrementally, so they are only as fresh as that read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressCounts {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl ProgressCounts {
    /// Counts from the dataset and the set of already-judged record ids.
    ///
    /// Ledger ids not present in the dataset do not count as completed.
    #[must_use]
    pub fn derive(dataset: &[Record], judged: &BTreeSet<String>) -> Self {
        let total = dataset.len();
        let completed = dataset.iter().filter(|r| judged.contains(&r.id)).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

/// Expanded progress view: which records are done and which remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressDetail {
    pub completed: Vec<String>,
    /// Remaining records as `(id, title)` pairs, in dataset order.
    pub remaining: Vec<(String, String)>,
}

impl ProgressDetail {
    #[must_use]
    pub fn derive(dataset: &[Record], judged: &BTreeSet<String>) -> Self {
        let mut completed = Vec::new();
        let mut remaining = Vec::new();
        for record in dataset {
            if judged.contains(&record.id) {
                completed.push(record.id.clone());
            } else {
                remaining.push((record.id.clone(), record.title.clone()));
            }
        }
        Self { completed, remaining }
    }
}
