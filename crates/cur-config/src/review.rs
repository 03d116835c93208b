//! Review session configuration.

use serde::{Deserialize, Serialize};

fn default_ledger_prefix() -> String {
    "Validation_".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Default reviewer identity. Overridable per run with `--reviewer`.
    #[serde(default)]
    pub reviewer: String,

    /// Path to the hashed-credentials users file. Empty means the default
    /// location under the home directory.
    #[serde(default)]
    pub users_file: String,

    /// Prefix for per-reviewer ledger sheet names
    /// (ledger = `{ledger_prefix}{reviewer}`).
    #[serde(default = "default_ledger_prefix")]
    pub ledger_prefix: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            reviewer: String::new(),
            users_file: String::new(),
            ledger_prefix: default_ledger_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReviewConfig::default();
        assert!(config.reviewer.is_empty());
        assert!(config.users_file.is_empty());
        assert_eq!(config.ledger_prefix, "Validation_");
    }
}
