//! Store error types for cur-store.

use thiserror::Error;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The reviewer's ledger sheet does not exist yet. Expected on first
    /// save; handled by the creation path, not user-visible as an error.
    #[error("no ledger exists yet for reviewer '{reviewer}'")]
    NotFound { reviewer: String },

    /// The HTTP request itself failed (network, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote store answered with a non-success status (auth, quota,
    /// bad range).
    #[error("remote store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Whether a retry of the same operation could plausibly succeed.
    /// `NotFound` is not retryable — it routes to the creation path instead.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }
}
