//! Idempotent append protocol for the per-reviewer ledger.
//!
//! Every save re-reads current ledger membership before appending; a cached
//! set from earlier in the session is never trusted. This guarantees
//! at-most-one judgment per record id per ledger under retries and process
//! restarts. The read-filter-append sequence is not atomic across
//! processes: two concurrent saves for the same reviewer can both pass the
//! membership check and both append. Known race, accepted; no lock is
//! taken.

use std::collections::BTreeSet;

use cur_core::entities::Judgment;
use cur_core::ledger::header_for;
use cur_store::{RecordStore, StoreError};

/// What a committed save did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Rows appended to an existing ledger.
    Appended(usize),
    /// The ledger did not exist; it was created with these initial rows.
    Created(usize),
    /// Every pending judgment was already in the ledger. Not an error.
    NothingToAdd,
}

/// Commit a batch of judgments to the reviewer's ledger.
///
/// Fresh read, membership filter, then append; falls back to the creation
/// path when the ledger does not exist or cannot be read. Within-batch
/// duplicates keep the first occurrence.
///
/// # Errors
///
/// Propagates append/create failures. The caller treats them as retryable
/// warnings and keeps the reviewer's drafts.
pub async fn commit_batch<S: RecordStore>(
    store: &S,
    reviewer: &str,
    batch: &[Judgment],
) -> Result<SaveOutcome, StoreError> {
    if batch.is_empty() {
        return Ok(SaveOutcome::NothingToAdd);
    }

    let existing = match store.read_ledger(reviewer).await {
        Ok(snapshot) => {
            if snapshot.record_id_index().is_none() {
                // Schema drift: the ledger exists but has no identity
                // column. Degrade to empty membership instead of failing
                // the save, but this should not happen.
                tracing::error!(
                    reviewer,
                    header = ?snapshot.header,
                    "ledger has no record id column, treating membership as empty"
                );
            }
            Some(snapshot.record_ids())
        }
        Err(StoreError::NotFound { .. }) => None,
        Err(e) => {
            tracing::warn!(reviewer, error = %e, "ledger read failed, taking creation path");
            None
        }
    };

    match existing {
        Some(judged) => {
            let fresh = dedup_batch(batch, &judged);
            if fresh.is_empty() {
                tracing::debug!(reviewer, "all pending judgments already in ledger");
                return Ok(SaveOutcome::NothingToAdd);
            }
            let rows: Vec<Vec<String>> = fresh.iter().map(|j| j.to_row()).collect();
            let appended = store.append_rows(reviewer, &rows).await?;
            tracing::info!(reviewer, appended, "appended judgments to ledger");
            Ok(SaveOutcome::Appended(appended))
        }
        None => {
            let fresh: Vec<Judgment> = dedup_batch(batch, &BTreeSet::new())
                .into_iter()
                .cloned()
                .collect();
            let header = header_for(&fresh);
            let rows: Vec<Vec<String>> = fresh.iter().map(Judgment::to_row).collect();
            store.create_ledger(reviewer, &header, &rows).await?;
            tracing::info!(reviewer, rows = rows.len(), "created ledger");
            Ok(SaveOutcome::Created(rows.len()))
        }
    }
}

/// Drop judgments already in the ledger, and later within-batch repeats of
/// the same record id.
fn dedup_batch<'a>(batch: &'a [Judgment], judged: &BTreeSet<String>) -> Vec<&'a Judgment> {
    let mut seen = BTreeSet::new();
    batch
        .iter()
        .filter(|j| !judged.contains(&j.record_id) && seen.insert(j.record_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use cur_core::enums::{AxisAValue, AxisBValue, ReviewAction};
    use pretty_assertions::assert_eq;

    use super::*;

    fn judgment(record_id: &str) -> Judgment {
        Judgment {
            reviewer: "ada".into(),
            timestamp: chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
            record_id: record_id.into(),
            title: "t".into(),
            abstract_text: "a.".into(),
            original_axis_a: AxisAValue::Human,
            original_axis_a_reason: String::new(),
            original_axis_b: AxisBValue::Original,
            original_axis_b_reason: String::new(),
            axis_a_action: ReviewAction::KeepOriginal,
            axis_a_new_value: AxisAValue::Human,
            axis_a_new_reason: String::new(),
            axis_b_action: ReviewAction::KeepOriginal,
            axis_b_new_value: AxisBValue::Original,
            axis_b_new_reason: String::new(),
            axis_a_subcategories: None,
        }
    }

    #[test]
    fn dedup_drops_already_judged_ids() {
        let batch = [judgment("a"), judgment("b")];
        let judged = BTreeSet::from(["a".to_string()]);
        let fresh = dedup_batch(&batch, &judged);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].record_id, "b");
    }

    #[test]
    fn dedup_keeps_first_within_batch_occurrence() {
        let mut later = judgment("a");
        later.title = "second copy".into();
        let batch = [judgment("a"), later, judgment("b")];
        let fresh = dedup_batch(&batch, &BTreeSet::new());
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[0].title, "t");
    }
}
