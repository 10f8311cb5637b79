//! `swimlane-sync labels` command.

use crate::context::ServiceContext;
use crate::swimlane::{extract_from_fields, LabelSet};

/// Execute the `labels` command, printing one label per line.
///
/// # Errors
///
/// Returns an error string if the issue cannot be fetched.
pub async fn run(ctx: &ServiceContext, key: &str) -> Result<(), String> {
    let labels = fetch_labels(ctx, key).await?;
    let text = format_labels(&labels);
    if text.is_empty() {
        eprintln!("{key} has no labels");
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Fetch an issue and split its labels field.
///
/// # Errors
///
/// Returns an error string if the issue cannot be fetched.
pub async fn fetch_labels(ctx: &ServiceContext, key: &str) -> Result<LabelSet, String> {
    let issue = ctx
        .tracker
        .fetch_issue(key)
        .await
        .map_err(|e| format!("Failed to fetch issue {key}: {e}"))?;
    Ok(extract_from_fields(&issue.fields))
}

/// Sorted, non-empty labels, one per line.
#[must_use]
pub fn format_labels(labels: &LabelSet) -> String {
    let mut shown: Vec<&str> = labels.iter().filter(|label| !label.is_empty()).collect();
    shown.sort_unstable();
    shown.join("\n")
}
