//! The review session: one reviewer stepping through one dataset.
//!
//! Owns the store handle and drives the pure pieces. Non-I/O actions go
//! through the reducer; saving assembles a judgment, runs the idempotent
//! append protocol, and commits the post-save transition only on success.

use chrono::{DateTime, Utc};
use cur_core::entities::Record;
use cur_store::{RecordStore, StoreError};
use std::collections::BTreeSet;

use crate::action::{Action, Notice};
use crate::error::EngineError;
use crate::evidence;
use crate::progress::{ProgressCounts, ProgressDetail};
use crate::reducer;
use crate::render::{AxisPanel, RenderPayload};
use crate::session::SessionState;
use crate::workflow;
use crate::writer::{self, SaveOutcome};

pub struct ReviewSession<S: RecordStore> {
    store: S,
    reviewer: String,
    dataset: Vec<Record>,
    /// Record ids known to be in the ledger, for progress display only.
    /// The save path never trusts this set; it re-reads the ledger.
    judged: BTreeSet<String>,
    state: SessionState,
}

impl<S: RecordStore> ReviewSession<S> {
    /// Load the dataset and the current ledger membership, and position the
    /// cursor at the first record.
    ///
    /// # Errors
    ///
    /// Fails when the dataset cannot be loaded or loads empty. A missing or
    /// unreadable ledger is not an error; membership starts empty.
    pub async fn start(store: S, reviewer: impl Into<String>) -> Result<Self, EngineError> {
        let reviewer = reviewer.into();
        let dataset = store.load_dataset().await?;
        if dataset.is_empty() {
            return Err(EngineError::EmptyDataset);
        }
        tracing::info!(%reviewer, records = dataset.len(), "session started");

        let judged = match store.read_ledger(&reviewer).await {
            Ok(snapshot) => snapshot.record_ids(),
            Err(StoreError::NotFound { .. }) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(%reviewer, error = %e, "ledger read failed, progress starts at zero");
                BTreeSet::new()
            }
        };

        Ok(Self {
            store,
            reviewer,
            dataset,
            judged,
            state: SessionState::default(),
        })
    }

    #[must_use]
    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    #[must_use]
    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The record under the cursor.
    #[must_use]
    pub fn current(&self) -> &Record {
        &self.dataset[self.state.index]
    }

    #[must_use]
    pub fn progress(&self) -> ProgressCounts {
        ProgressCounts::derive(&self.dataset, &self.judged)
    }

    /// Apply one non-I/O action.
    pub fn handle(&mut self, action: Action) -> Vec<Notice> {
        let (next, notices) = reducer::apply(&self.state, &self.dataset, action);
        self.state = next;
        notices
    }

    /// Assemble and commit the judgment for the current record, then
    /// advance.
    ///
    /// Drafts are cleared and the cursor advances only when the commit
    /// succeeds (a no-op commit counts as success). On failure the state is
    /// untouched so the reviewer can retry.
    ///
    /// # Errors
    ///
    /// Propagates store failures as retryable warnings.
    pub async fn save(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<(SaveOutcome, Vec<Notice>), EngineError> {
        let judgment = workflow::assemble_judgment(&self.reviewer, now, self.current(), &self.state);
        let record_id = judgment.record_id.clone();

        let outcome = writer::commit_batch(&self.store, &self.reviewer, &[judgment]).await?;

        self.judged.insert(record_id);
        let (next, notices) = reducer::advance_after_save(&self.state, &self.dataset);
        self.state = next;
        Ok((outcome, notices))
    }

    /// Derive the full display payload for the current state.
    #[must_use]
    pub fn render(&self) -> RenderPayload {
        let record = self.current();
        RenderPayload {
            index: self.state.index,
            total: self.dataset.len(),
            record: record.clone(),
            sentences: evidence::tagged_sentences(record, &self.state),
            axis_a: AxisPanel {
                action: self.state.axis_a.action,
                new_value: self.state.axis_a.new_value,
                reason: self.state.axis_a.reason.clone(),
            },
            axis_b: AxisPanel {
                action: self.state.axis_b.action,
                new_value: self.state.axis_b.new_value,
                reason: self.state.axis_b.reason.clone(),
            },
            subcategories: self.state.subcategories.clone(),
            progress: self.progress(),
            progress_detail: self
                .state
                .show_progress
                .then(|| ProgressDetail::derive(&self.dataset, &self.judged)),
        }
    }
}
