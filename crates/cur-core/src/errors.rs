//! Cross-cutting error types for Curator.
//!
//! Domain-specific errors (e.g., `StoreError`, `AuthError`) are defined in
//! their respective crates. The CLI converges everything through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by the core type layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not parse as a member of a fixed option set.
    #[error("Unknown {field}: '{value}'")]
    UnknownValue { field: &'static str, value: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
