//! Core library entry for the `swimlane-sync` service.
//!
//! Watches issue label changes and keeps each team dashboard's swimlanes in
//! step: adding the trigger label to an issue gives it a swimlane, removing
//! the label takes the swimlane away.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod swimlane;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration loading, or
/// command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are not failures.
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    logging::init(cli.verbose, cli.json_logs);
    let config = config::Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    commands::dispatch(&cli.command, &config)
}
