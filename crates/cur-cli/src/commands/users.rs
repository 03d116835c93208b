use serde::Serialize;

use crate::cli::{OutputFormat, UserCommands};
use crate::commands::{open_user_store, prompt};
use crate::output::output;
use cur_config::CuratorConfig;

#[derive(Serialize)]
struct UserChangeResponse {
    username: String,
    users_file: String,
    changed: bool,
}

pub fn handle(
    action: &UserCommands,
    config: &CuratorConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let store = open_user_store(config)?;

    match action {
        UserCommands::Add { username } => {
            let password = prompt(&format!("Password for {username}: "))?;
            if password.is_empty() {
                anyhow::bail!("password must not be empty");
            }
            let repeat = prompt("Repeat password: ")?;
            if password != repeat {
                anyhow::bail!("passwords do not match");
            }

            store.upsert(username, &password)?;
            output(
                &UserChangeResponse {
                    username: username.clone(),
                    users_file: store.path().display().to_string(),
                    changed: true,
                },
                format,
            )
        }
        UserCommands::Remove { username } => {
            let removed = store.remove(username)?;
            if !removed {
                tracing::warn!(%username, "user was not in the users file");
            }
            output(
                &UserChangeResponse {
                    username: username.clone(),
                    users_file: store.path().display().to_string(),
                    changed: removed,
                },
                format,
            )
        }
        UserCommands::List => output(&store.list()?, format),
    }
}
