//! Spreadsheet-backed record store.
//!
//! Talks to the Sheets v4 REST surface: `values.get` for reads,
//! `values.append` for ledger appends, `batchUpdate` (addSheet) plus
//! `values.update` for ledger creation. Authentication is a bearer token;
//! obtaining and refreshing it is the caller's concern.

use cur_core::entities::Record;
use cur_core::enums::{AxisAValue, AxisBValue};
use cur_core::ledger::LedgerSnapshot;
use serde::Deserialize;
use serde_json::json;

use crate::{RecordStore, StoreError};

// Column names of the externally-authored dataset sheet. Lookup is
// case-insensitive; the classification columns are optional.
const DATASET_ID_COLUMN: &str = "PMID";
const DATASET_TITLE_COLUMN: &str = "Title";
const DATASET_ABSTRACT_COLUMN: &str = "Abstract";
const DATASET_AXIS_A_COLUMN: &str = "Human_NonHuman_Classification";
const DATASET_AXIS_A_REASON_COLUMN: &str = "Human_NonHuman_Reason";
const DATASET_AXIS_B_COLUMN: &str = "Dataset_Type";
const DATASET_AXIS_B_REASON_COLUMN: &str = "Dataset_Type_Reason";

/// Remote spreadsheet store.
pub struct SheetsStore {
    client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    api_token: String,
    dataset_sheet: String,
    ledger_prefix: String,
}

impl SheetsStore {
    /// Build a store for one spreadsheet.
    ///
    /// `ledger_prefix` names per-reviewer ledger sheets:
    /// `{ledger_prefix}{reviewer}`.
    #[must_use]
    pub fn new(
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        api_token: impl Into<String>,
        dataset_sheet: impl Into<String>,
        ledger_prefix: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            spreadsheet_id: spreadsheet_id.into(),
            api_token: api_token.into(),
            dataset_sheet: dataset_sheet.into(),
            ledger_prefix: ledger_prefix.into(),
        }
    }

    /// Sheet name of a reviewer's ledger.
    #[must_use]
    pub fn ledger_sheet(&self, reviewer: &str) -> String {
        format!("{}{reviewer}", self.ledger_prefix)
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let response = self
            .client
            .get(self.values_url(range))
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: ValueRange = response.json().await?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    async fn batch_update(&self, body: serde_json::Value) -> Result<(), StoreError> {
        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.api_base, self.spreadsheet_id
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    fn record_from_row(header: &[String], row: &[String]) -> Option<Record> {
        let col = |name: &str| {
            header
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .and_then(|idx| row.get(idx))
                .map(String::as_str)
                .unwrap_or_default()
        };

        let id = col(DATASET_ID_COLUMN);
        if id.is_empty() {
            return None;
        }

        Some(Record {
            id: id.to_string(),
            title: col(DATASET_TITLE_COLUMN).to_string(),
            abstract_text: col(DATASET_ABSTRACT_COLUMN).to_string(),
            original_axis_a: AxisAValue::from_sheet_value(col(DATASET_AXIS_A_COLUMN)),
            original_axis_a_reason: col(DATASET_AXIS_A_REASON_COLUMN).to_string(),
            original_axis_b: AxisBValue::from_sheet_value(col(DATASET_AXIS_B_COLUMN)),
            original_axis_b_reason: col(DATASET_AXIS_B_REASON_COLUMN).to_string(),
        })
    }
}

impl RecordStore for SheetsStore {
    async fn load_dataset(&self) -> Result<Vec<Record>, StoreError> {
        let values = self.get_values(&self.dataset_sheet).await?;
        let Some((header, rows)) = values.split_first() else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Self::record_from_row(header, row) {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!("dataset row {} has no record id, skipping", i + 2);
                }
            }
        }
        Ok(records)
    }

    async fn read_ledger(&self, reviewer: &str) -> Result<LedgerSnapshot, StoreError> {
        let sheet = self.ledger_sheet(reviewer);
        let values = match self.get_values(&sheet).await {
            Ok(values) => values,
            // The API answers 400 ("unable to parse range") for a sheet that
            // does not exist; treat 404 the same way.
            Err(StoreError::Api { status: 400 | 404, .. }) => {
                return Err(StoreError::NotFound {
                    reviewer: reviewer.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let mut values = values.into_iter();
        let header = values.next().unwrap_or_default();
        Ok(LedgerSnapshot {
            header,
            rows: values.collect(),
        })
    }

    async fn append_rows(
        &self,
        reviewer: &str,
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError> {
        let sheet = self.ledger_sheet(reviewer);
        let url = format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.values_url(&sheet)
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: AppendResponse = response.json().await?;
        Ok(body
            .updates
            .map_or(rows.len(), |u| u.updated_rows as usize))
    }

    async fn create_ledger(
        &self,
        reviewer: &str,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        let sheet = self.ledger_sheet(reviewer);

        // Size the new sheet with headroom for future growth.
        let row_count = (rows.len() + 10).max(1000);
        let column_count = (header.len() + 2).max(10);
        self.batch_update(json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": sheet,
                        "gridProperties": {
                            "rowCount": row_count,
                            "columnCount": column_count,
                        }
                    }
                }
            }]
        }))
        .await?;

        let mut values: Vec<&[String]> = Vec::with_capacity(rows.len() + 1);
        values.push(header);
        values.extend(rows.iter().map(Vec::as_slice));

        let url = format!(
            "{}?valueInputOption=RAW",
            self.values_url(&format!("{sheet}!A1"))
        );
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "values": values }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Cells come back as JSON scalars; coerce everything to the string the
/// ledger contract works in.
fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    #[serde(default)]
    updated_rows: u32,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn header() -> Vec<String> {
        [
            "PMID",
            "Title",
            "Abstract",
            "Human_NonHuman_Classification",
            "Human_NonHuman_Reason",
            "Dataset_Type",
            "Dataset_Type_Reason",
        ]
        .map(String::from)
        .to_vec()
    }

    #[test]
    fn record_from_row_parses_lenient_values() {
        let row = [
            "12345",
            "A title",
            "An abstract.",
            "Non-Human",
            "mouse models",
            "Mixed",
            "",
        ]
        .map(String::from)
        .to_vec();

        let record = SheetsStore::record_from_row(&header(), &row).expect("record");
        assert_eq!(record.id, "12345");
        assert_eq!(record.original_axis_a, AxisAValue::NonHuman);
        assert_eq!(record.original_axis_a_reason, "mouse models");
        assert_eq!(record.original_axis_b, AxisBValue::Mixed);
        assert_eq!(record.original_axis_b_reason, "");
    }

    #[test]
    fn record_from_row_defaults_missing_classification_columns() {
        let header: Vec<String> = ["PMID", "Title", "Abstract"].map(String::from).to_vec();
        let row: Vec<String> = ["99", "t", "a."].map(String::from).to_vec();

        let record = SheetsStore::record_from_row(&header, &row).expect("record");
        assert_eq!(record.original_axis_a, AxisAValue::Unclear);
        assert_eq!(record.original_axis_b, AxisBValue::Unclear);
        assert!(record.original_axis_a_reason.is_empty());
    }

    #[test]
    fn record_from_row_rejects_missing_id() {
        let row = ["", "t", "a.", "Human", "", "Used", ""].map(String::from).to_vec();
        assert!(SheetsStore::record_from_row(&header(), &row).is_none());
    }

    #[test]
    fn ledger_sheet_uses_prefix() {
        let store = SheetsStore::new("https://example.test", "sid", "tok", "records", "Validation_");
        assert_eq!(store.ledger_sheet("ada"), "Validation_ada");
    }

    #[test]
    fn cell_coercion_handles_scalars() {
        assert_eq!(cell_to_string(&serde_json::json!("x")), "x");
        assert_eq!(cell_to_string(&serde_json::json!(7)), "7");
        assert_eq!(cell_to_string(&serde_json::Value::Null), "");
    }
}
