use clap::{Parser, Subcommand, ValueEnum};

/// Shared output mode for non-interactive commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI parser for the `cur` binary.
#[derive(Debug, Parser)]
#[command(name = "cur", version, about = "Curator - annotation review over a shared spreadsheet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reviewer identity (defaults to the configured reviewer)
    #[arg(short, long, global = true)]
    pub reviewer: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive review session
    Review,
    /// Show review progress for a reviewer
    Progress(ProgressArgs),
    /// Manage reviewer accounts
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Debug, clap::Args)]
pub struct ProgressArgs {
    /// List completed and remaining record ids, not just counts
    #[arg(long)]
    pub detail: bool,
}

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Add a reviewer account (prompts for a password)
    Add { username: String },
    /// Remove a reviewer account
    Remove { username: String },
    /// List reviewer accounts
    List,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["cur", "--format", "json", "--verbose", "review"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Review));
    }

    #[test]
    fn reviewer_flag_parses_after_subcommand() {
        let cli = Cli::try_parse_from(["cur", "progress", "--detail", "--reviewer", "ada"])
            .expect("cli should parse");
        assert_eq!(cli.reviewer.as_deref(), Some("ada"));
        match cli.command {
            Commands::Progress(args) => assert!(args.detail),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn users_subcommands_parse() {
        let cli = Cli::try_parse_from(["cur", "users", "add", "ada"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Users {
                action: super::UserCommands::Add { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["cur", "--format", "xml", "review"]).is_err());
    }
}
