//! Swimlane name and query derivation.

use super::SUMMARY_FIELD;
use crate::ports::tracker::Issue;

/// Builds the display name of the swimlane owned by `issue`.
#[must_use]
pub fn name(issue: &Issue) -> String {
    match issue.field(SUMMARY_FIELD) {
        Some(summary) => format!("<{}> {}", issue.key, summary.text),
        None => format!("<{}> No summary", issue.key),
    }
}

/// Builds the filter selecting every issue linked to `issue_key`.
#[must_use]
pub fn query(issue_key: &str) -> String {
    format!("issue in linkedIssues({issue_key})")
}
