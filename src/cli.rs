//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::CONFIG_ENV;

/// Top-level CLI parser for `swimlane-sync`.
#[derive(Debug, Parser)]
#[command(
    name = "swimlane-sync",
    version,
    about = "Keep dashboard swimlanes in step with issue labels"
)]
pub struct Cli {
    /// YAML config file.
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile the dashboard for one issue-updated event.
    ///
    /// Events that do not move the trigger label, or carry no routed team
    /// label, are answered with NOOP and need no tracker settings.
    Handle {
        /// Event JSON file, or `-` to read from stdin.
        event: String,
        /// Decide without creating or deleting anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print an issue's labels as the tracker reports them.
    Labels {
        /// Issue key, e.g. `PROJ-1`.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_handle_subcommand() {
        let cli = Cli::parse_from(["swimlane-sync", "handle", "event.json", "--dry-run"]);
        assert!(matches!(
            cli.command,
            Command::Handle { ref event, dry_run: true } if event == "event.json"
        ));
    }

    #[test]
    fn handle_accepts_stdin_marker() {
        let cli = Cli::parse_from(["swimlane-sync", "handle", "-"]);
        assert!(matches!(cli.command, Command::Handle { ref event, dry_run: false } if event == "-"));
    }

    #[test]
    fn parses_labels_with_global_flags() {
        let cli = Cli::parse_from(["swimlane-sync", "labels", "PROJ-1", "-vv", "--json-logs"]);
        assert!(matches!(cli.command, Command::Labels { ref key } if key == "PROJ-1"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_logs);
    }

    #[test]
    fn config_flag_is_a_path() {
        let cli = Cli::parse_from(["swimlane-sync", "--config", "rules.yaml", "labels", "X-1"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("rules.yaml")));
    }

    #[test]
    fn handle_requires_event() {
        assert!(Cli::try_parse_from(["swimlane-sync", "handle"]).is_err());
    }
}
