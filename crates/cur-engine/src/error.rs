//! Engine error types for cur-engine.

use thiserror::Error;

/// Errors from review engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dataset loaded empty; there is nothing to review.
    #[error("the dataset contains no records")]
    EmptyDataset,

    /// A store operation failed. Retryable from the reviewer's side; drafts
    /// for the current record are kept so no work is lost.
    #[error(transparent)]
    Store(#[from] cur_store::StoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
