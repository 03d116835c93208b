//! Remote spreadsheet store configuration.

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://sheets.googleapis.com".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Spreadsheet holding the dataset sheet and the per-reviewer ledgers.
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Name of the sheet containing the record dataset.
    #[serde(default)]
    pub dataset_sheet: String,

    /// OAuth bearer token for the spreadsheet API.
    #[serde(default)]
    pub api_token: String,

    /// API base URL. Overridable for tests against a local stub.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl SheetsConfig {
    /// Whether the section carries enough to reach the remote store.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.spreadsheet_id.is_empty() && !self.dataset_sheet.is_empty()
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            dataset_sheet: String::new(),
            api_token: String::new(),
            api_base: default_api_base(),
        }
    }
}
