//! Command dispatch and handlers.

pub mod handle;
pub mod labels;

use std::env;
use std::future::Future;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Environment variable naming a cassette to serve tracker calls from.
pub const REPLAY_ENV: &str = "SWIMLANE_REPLAY";

/// Environment variable naming a cassette to record live tracker calls into.
pub const RECORD_ENV: &str = "SWIMLANE_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `SWIMLANE_REPLAY` is set, tracker calls are answered from that
/// cassette. Otherwise, when `SWIMLANE_RECORD` is set, live tracker traffic
/// is recorded to that path. An event that needs no dashboard edit is
/// settled before any tracker is built.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the selected
/// command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    match command {
        Command::Handle { event, dry_run } => {
            let event = handle::read_event(event)?;
            if let Some(outcome) = handle::settle_without_tracker(&config.rules, &event) {
                println!("{outcome}");
                return Ok(());
            }
            let ctx = context_from_env(config)?;
            let result = block_on(handle::run(&ctx, &config.rules, &event, *dry_run));
            finish(ctx, result)
        }
        Command::Labels { key } => {
            let ctx = context_from_env(config)?;
            let result = block_on(labels::run(&ctx, key));
            finish(ctx, result)
        }
    }
}

fn block_on<F>(task: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?
        .block_on(task)
}

// Finish recording after command completes (even on error)
fn finish(ctx: ServiceContext, result: Result<(), String>) -> Result<(), String> {
    if let Some(path) = ctx.finish()? {
        eprintln!("Recording saved to: {}", path.display());
    }
    result
}

fn context_from_env(config: &Config) -> Result<ServiceContext, String> {
    if let Some(path) = env::var_os(REPLAY_ENV).map(PathBuf::from) {
        debug!(cassette = %path.display(), "replaying tracker calls");
        return ServiceContext::replaying(&path);
    }
    if let Some(path) = env::var_os(RECORD_ENV).map(PathBuf::from) {
        debug!(cassette = %path.display(), "recording tracker calls");
        return ServiceContext::recording(&config.tracker, &path);
    }
    ServiceContext::live(&config.tracker)
}
