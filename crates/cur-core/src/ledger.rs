//! The ledger row/column contract.
//!
//! A ledger is the per-reviewer, append-only collection of judgments in the
//! remote tabular store: one header row plus one data row per judgment. The
//! column order here is the wire contract — the persistence writer derives
//! headers from it and the membership check locates [`RECORD_ID_COLUMN`]
//! by name, not position.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Judgment;

/// Identity column the idempotent append protocol keys on.
pub const RECORD_ID_COLUMN: &str = "record_id";

/// Trailing column, present only when the batch contains a `NonHuman`
/// reclassification.
pub const SUBCATEGORIES_COLUMN: &str = "axis_a_subcategories";

/// Fixed columns of every ledger row, in order.
pub const BASE_COLUMNS: [&str; 15] = [
    "reviewer",
    "timestamp",
    RECORD_ID_COLUMN,
    "title",
    "abstract",
    "original_axis_a",
    "original_axis_a_reason",
    "original_axis_b",
    "original_axis_b_reason",
    "axis_a_action",
    "axis_a_new_value",
    "axis_a_new_reason",
    "axis_b_action",
    "axis_b_new_value",
    "axis_b_new_reason",
];

/// Ledger cell format for judgment timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derive the header row for a batch of judgments.
///
/// The subcategories column is appended only when at least one judgment in
/// the batch carries subcategories.
#[must_use]
pub fn header_for(batch: &[Judgment]) -> Vec<String> {
    let mut header: Vec<String> = BASE_COLUMNS.iter().map(ToString::to_string).collect();
    if batch.iter().any(|j| j.axis_a_subcategories.is_some()) {
        header.push(SUBCATEGORIES_COLUMN.to_string());
    }
    header
}

impl Judgment {
    /// Serialize this judgment as a ledger data row, in [`BASE_COLUMNS`]
    /// order. Subcategories, when present, are a comma-joined trailing cell.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.reviewer.clone(),
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.record_id.clone(),
            self.title.clone(),
            self.abstract_text.clone(),
            self.original_axis_a.as_str().to_string(),
            self.original_axis_a_reason.clone(),
            self.original_axis_b.as_str().to_string(),
            self.original_axis_b_reason.clone(),
            self.axis_a_action.as_str().to_string(),
            self.axis_a_new_value.as_str().to_string(),
            self.axis_a_new_reason.clone(),
            self.axis_b_action.as_str().to_string(),
            self.axis_b_new_value.as_str().to_string(),
            self.axis_b_new_reason.clone(),
        ];
        if let Some(subcategories) = &self.axis_a_subcategories {
            let joined = subcategories
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            row.push(joined);
        }
        row
    }
}

/// A point-in-time read of a ledger: header row plus data rows.
///
/// Shared external state — other processes may append between reads, so a
/// snapshot is only as fresh as the read that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LedgerSnapshot {
    /// Index of the identity column, located by name (case-insensitive).
    ///
    /// `None` indicates schema drift — the caller degrades to empty
    /// membership rather than failing the save.
    #[must_use]
    pub fn record_id_index(&self) -> Option<usize> {
        self.header
            .iter()
            .position(|c| c.eq_ignore_ascii_case(RECORD_ID_COLUMN))
    }

    /// Set of record ids already present in the snapshot.
    ///
    /// Rows too short to reach the identity column are skipped.
    #[must_use]
    pub fn record_ids(&self) -> BTreeSet<String> {
        let Some(idx) = self.record_id_index() else {
            return BTreeSet::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(idx))
            .filter(|id| !id.is_empty())
            .cloned()
            .collect()
    }

    /// Cell lookup by column name for a data row.
    #[must_use]
    pub fn cell<'a>(&self, row: &'a [String], column: &str) -> Option<&'a str> {
        let idx = self
            .header
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))?;
        row.get(idx).map(String::as_str)
    }
}
