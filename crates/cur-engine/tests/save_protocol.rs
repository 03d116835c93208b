//! The idempotent append protocol against the in-memory store.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use cur_core::entities::{Judgment, Record};
use cur_core::enums::{AxisAValue, AxisBValue, ReviewAction, Subcategory};
use cur_core::ledger::{BASE_COLUMNS, LedgerSnapshot, SUBCATEGORIES_COLUMN};
use cur_engine::writer::{SaveOutcome, commit_batch};
use cur_store::MemoryStore;
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

fn record(id: &str) -> Record {
    Record {
        id: id.into(),
        title: format!("Title {id}"),
        abstract_text: "One. Two.".into(),
        original_axis_a: AxisAValue::Human,
        original_axis_a_reason: "cohort study".into(),
        original_axis_b: AxisBValue::Original,
        original_axis_b_reason: String::new(),
    }
}

fn keep_original(id: &str) -> Judgment {
    let r = record(id);
    Judgment {
        reviewer: "ada".into(),
        timestamp: now(),
        record_id: r.id.clone(),
        title: r.title.clone(),
        abstract_text: r.abstract_text.clone(),
        original_axis_a: r.original_axis_a,
        original_axis_a_reason: r.original_axis_a_reason.clone(),
        original_axis_b: r.original_axis_b,
        original_axis_b_reason: r.original_axis_b_reason,
        axis_a_action: ReviewAction::KeepOriginal,
        axis_a_new_value: r.original_axis_a,
        axis_a_new_reason: r.original_axis_a_reason,
        axis_b_action: ReviewAction::KeepOriginal,
        axis_b_new_value: r.original_axis_b,
        axis_b_new_reason: String::new(),
        axis_a_subcategories: None,
    }
}

#[tokio::test]
async fn first_save_creates_the_ledger_with_header() {
    let store = MemoryStore::new(vec![]);
    let outcome = commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Created(1));

    let ledger = store.ledger("ada").expect("ledger created");
    assert_eq!(ledger.header.len(), BASE_COLUMNS.len());
    assert_eq!(ledger.header[2], "record_id");
    assert_eq!(ledger.rows.len(), 1);
    assert_eq!(ledger.rows[0][2], "pm1");
}

#[tokio::test]
async fn non_human_batch_gets_the_subcategories_column() {
    let store = MemoryStore::new(vec![]);
    let mut judgment = keep_original("pm1");
    judgment.axis_a_action = ReviewAction::ChangeClassification;
    judgment.axis_a_new_value = AxisAValue::NonHuman;
    judgment.axis_a_subcategories = Some(BTreeSet::from([Subcategory::Animal]));

    commit_batch(&store, "ada", &[judgment]).await.unwrap();

    let ledger = store.ledger("ada").unwrap();
    assert_eq!(ledger.header.last().unwrap(), SUBCATEGORIES_COLUMN);
    assert_eq!(ledger.rows[0].last().unwrap(), "animal");
}

#[tokio::test]
async fn retrying_a_save_never_duplicates_a_record() {
    let store = MemoryStore::new(vec![]);
    commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();

    // Retry of the same record, then a mixed batch containing it again.
    let retry = commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    assert_eq!(retry, SaveOutcome::NothingToAdd);

    let mixed = commit_batch(&store, "ada", &[keep_original("pm1"), keep_original("pm2")])
        .await
        .unwrap();
    assert_eq!(mixed, SaveOutcome::Appended(1));

    let ledger = store.ledger("ada").unwrap();
    let pm1_rows = ledger.rows.iter().filter(|r| r[2] == "pm1").count();
    assert_eq!(pm1_rows, 1);
    assert_eq!(ledger.rows.len(), 2);
}

#[tokio::test]
async fn every_save_rereads_membership() {
    let store = MemoryStore::new(vec![]);
    commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    let after_create = store.ledger_read_count();

    commit_batch(&store, "ada", &[keep_original("pm2")])
        .await
        .unwrap();
    commit_batch(&store, "ada", &[keep_original("pm3")])
        .await
        .unwrap();

    assert_eq!(store.ledger_read_count(), after_create + 2);
}

#[tokio::test]
async fn ledger_without_identity_column_degrades_to_empty_membership() {
    let store = MemoryStore::new(vec![]);
    store.seed_ledger(
        "ada",
        LedgerSnapshot {
            header: vec!["who".into(), "what".into()],
            rows: vec![vec!["ada".into(), "pm1".into()]],
        },
    );

    // The save proceeds as an append even though pm1 appears in the rows;
    // without an identity column there is no membership to filter on.
    let outcome = commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Appended(1));
}

#[tokio::test]
async fn write_failure_propagates_and_changes_nothing() {
    let store = MemoryStore::new(vec![]);
    commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();

    store.set_fail_writes(true);
    let err = commit_batch(&store, "ada", &[keep_original("pm2")]).await;
    assert!(err.is_err());
    assert_eq!(store.ledger("ada").unwrap().rows.len(), 1);

    store.set_fail_writes(false);
    let outcome = commit_batch(&store, "ada", &[keep_original("pm2")])
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Appended(1));
}

#[tokio::test]
async fn unreadable_ledger_routes_to_creation_path() {
    let store = MemoryStore::new(vec![]);
    store.set_fail_reads(true);

    // Read fails, creation is attempted; the ledger does not exist yet so
    // creation succeeds.
    let outcome = commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Created(1));
}

#[tokio::test]
async fn ledgers_are_isolated_per_reviewer() {
    let store = MemoryStore::new(vec![]);
    commit_batch(&store, "ada", &[keep_original("pm1")])
        .await
        .unwrap();
    let outcome = commit_batch(&store, "grace", &[keep_original("pm1")])
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Created(1));
    assert_eq!(store.ledger("ada").unwrap().rows.len(), 1);
    assert_eq!(store.ledger("grace").unwrap().rows.len(), 1);
}
