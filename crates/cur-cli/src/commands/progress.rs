use std::collections::BTreeSet;

use serde::Serialize;

use crate::cli::{OutputFormat, ProgressArgs};
use crate::commands::{build_store, resolve_reviewer};
use crate::output::output;
use cur_config::CuratorConfig;
use cur_engine::{ProgressCounts, ProgressDetail};
use cur_store::{RecordStore, StoreError};

#[derive(Serialize)]
struct ProgressReport {
    reviewer: String,
    total: usize,
    completed: usize,
    remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<ProgressDetail>,
}

pub async fn handle(
    config: &CuratorConfig,
    reviewer_flag: Option<&str>,
    args: &ProgressArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let reviewer = resolve_reviewer(config, reviewer_flag)?;
    let store = build_store(config)?;
    let report = report(&store, &reviewer, args.detail).await?;
    output(&report, format)
}

async fn report<S: RecordStore>(
    store: &S,
    reviewer: &str,
    detail: bool,
) -> anyhow::Result<ProgressReport> {
    let dataset = store.load_dataset().await?;
    let judged = match store.read_ledger(reviewer).await {
        Ok(snapshot) => snapshot.record_ids(),
        Err(StoreError::NotFound { .. }) => BTreeSet::new(),
        Err(e) => return Err(e.into()),
    };

    let counts = ProgressCounts::derive(&dataset, &judged);
    Ok(ProgressReport {
        reviewer: reviewer.to_string(),
        total: counts.total,
        completed: counts.completed,
        remaining: counts.remaining,
        detail: detail.then(|| ProgressDetail::derive(&dataset, &judged)),
    })
}

#[cfg(test)]
mod tests {
    use cur_core::entities::Record;
    use cur_core::enums::{AxisAValue, AxisBValue};
    use cur_core::ledger::LedgerSnapshot;
    use cur_store::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::report;

    fn dataset() -> Vec<Record> {
        (0..4)
            .map(|i| Record {
                id: format!("pm{i}"),
                title: format!("Title {i}"),
                abstract_text: String::new(),
                original_axis_a: AxisAValue::Human,
                original_axis_a_reason: String::new(),
                original_axis_b: AxisBValue::Original,
                original_axis_b_reason: String::new(),
            })
            .collect()
    }

    #[tokio::test]
    async fn report_with_no_ledger_counts_nothing_done() {
        let store = MemoryStore::new(dataset());
        let report = report(&store, "ada", false).await.unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.completed, 0);
        assert_eq!(report.remaining, 4);
        assert!(report.detail.is_none());
    }

    #[tokio::test]
    async fn report_detail_lists_both_partitions() {
        let store = MemoryStore::new(dataset());
        store.seed_ledger(
            "ada",
            LedgerSnapshot {
                header: vec!["record_id".into()],
                rows: vec![vec!["pm1".into()], vec!["pm3".into()]],
            },
        );

        let report = report(&store, "ada", true).await.unwrap();
        assert_eq!(report.completed, 2);
        let detail = report.detail.expect("detail requested");
        assert_eq!(detail.completed, vec!["pm1".to_string(), "pm3".to_string()]);
        assert_eq!(detail.remaining.len(), 2);
    }
}
