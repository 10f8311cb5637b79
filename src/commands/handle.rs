//! `swimlane-sync handle` command.

use std::io::Read;
use std::path::Path;

use crate::config::RulesConfig;
use crate::context::ServiceContext;
use crate::swimlane::{reconcile, route, IssueEvent, Outcome};

/// Execute the `handle` command for a parsed event and print the outcome.
///
/// # Errors
///
/// Returns an error string if reconciling fails.
pub async fn run(
    ctx: &ServiceContext,
    rules: &RulesConfig,
    event: &IssueEvent,
    dry_run: bool,
) -> Result<(), String> {
    let outcome = run_with_event(ctx, rules, event, dry_run).await?;
    println!("{outcome}");
    Ok(())
}

/// The outcome of an event that leaves every dashboard alone, if it is one.
///
/// Needs no tracker, so tracker settings are not required for such events.
#[must_use]
pub fn settle_without_tracker(rules: &RulesConfig, event: &IssueEvent) -> Option<Outcome> {
    match route(rules, event) {
        Some(_) => None,
        None => Some(Outcome::untouched(&event.issue.key, None)),
    }
}

/// Reconcile one already-parsed event.
///
/// # Errors
///
/// Returns an error string if reconciling fails.
pub async fn run_with_event(
    ctx: &ServiceContext,
    rules: &RulesConfig,
    event: &IssueEvent,
    dry_run: bool,
) -> Result<Outcome, String> {
    reconcile(ctx.tracker.as_ref(), rules, event, dry_run).await.map_err(|e| e.to_string())
}

/// Read an event from a file, or from stdin when `source` is `-`.
///
/// # Errors
///
/// Returns an error string if the input cannot be read or is not an event.
pub fn read_event(source: &str) -> Result<IssueEvent, String> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read event from stdin: {e}"))?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))
            .map_err(|e| format!("Failed to read event file {source}: {e}"))?
    };
    parse_event(&content)
}

/// Parse an issue-updated event.
///
/// # Errors
///
/// Returns an error string if `content` is not a valid event.
pub fn parse_event(content: &str) -> Result<IssueEvent, String> {
    serde_json::from_str(content).map_err(|e| format!("Invalid issue event: {e}"))
}
