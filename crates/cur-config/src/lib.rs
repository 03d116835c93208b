//! # cur-config
//!
//! Layered configuration loading for Curator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CURATOR_*` prefix, `__` as separator)
//! 2. Project-level `.curator/config.toml`
//! 3. User-level `~/.config/curator/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CURATOR_SHEETS__SPREADSHEET_ID` -> `sheets.spreadsheet_id`,
//! `CURATOR_REVIEW__REVIEWER` -> `review.reviewer`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use cur_config::CuratorConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = CuratorConfig::load_with_dotenv().expect("config");
//!
//! if config.sheets.is_configured() {
//!     println!("Spreadsheet: {}", config.sheets.spreadsheet_id);
//! }
//! ```

mod error;
mod review;
mod sheets;

pub use error::ConfigError;
pub use review::ReviewConfig;
pub use sheets::SheetsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CuratorConfig {
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

impl CuratorConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`CURATOR_*` prefix)
    /// 2. `.curator/config.toml` (project-local)
    /// 3. `~/.config/curator/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if figment extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI and
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if figment extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".curator/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("CURATOR_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("curator").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or the current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CuratorConfig::default();
        assert!(!config.sheets.is_configured());
        assert!(config.review.reviewer.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = CuratorConfig::figment();
        let config: CuratorConfig = figment.extract().expect("should extract defaults");
        assert!(!config.sheets.is_configured());
        assert_eq!(config.review.ledger_prefix, "Validation_");
    }
}
