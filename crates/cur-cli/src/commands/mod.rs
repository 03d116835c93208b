pub mod progress;
pub mod review;
pub mod users;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use cur_auth::UserStore;
use cur_config::CuratorConfig;
use cur_store::SheetsStore;

/// Reviewer identity for this run: the `--reviewer` flag wins over config.
pub fn resolve_reviewer(config: &CuratorConfig, flag: Option<&str>) -> anyhow::Result<String> {
    let reviewer = flag
        .map(str::to_string)
        .unwrap_or_else(|| config.review.reviewer.clone());
    if reviewer.is_empty() {
        anyhow::bail!("no reviewer given — pass --reviewer or set CURATOR_REVIEW__REVIEWER");
    }
    Ok(reviewer)
}

pub fn build_store(config: &CuratorConfig) -> anyhow::Result<SheetsStore> {
    if !config.sheets.is_configured() {
        anyhow::bail!(
            "spreadsheet access is not configured — set CURATOR_SHEETS__SPREADSHEET_ID and CURATOR_SHEETS__DATASET_SHEET"
        );
    }
    Ok(SheetsStore::new(
        config.sheets.api_base.as_str(),
        config.sheets.spreadsheet_id.as_str(),
        config.sheets.api_token.as_str(),
        config.sheets.dataset_sheet.as_str(),
        config.review.ledger_prefix.as_str(),
    ))
}

pub fn open_user_store(config: &CuratorConfig) -> anyhow::Result<UserStore> {
    if config.review.users_file.is_empty() {
        Ok(UserStore::default_location()?)
    } else {
        Ok(UserStore::new(PathBuf::from(&config.review.users_file)))
    }
}

/// Read one line from stdin after printing a prompt to stderr.
pub fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
