//! Swimlane decision for a single label transition.

use tracing::debug;

use super::labels::TriggerChange;
use super::lookup::{exists_by_name, find_by_name};
use super::naming::{name, query};
use super::{LabelSet, SwimlaneUpdate};
use crate::error::SyncError;
use crate::ports::tracker::{DashboardId, Issue, Swimlane, TrackerClient};

/// Decides what to do with the swimlane owned by `issue`.
///
/// Adding `trigger_label` creates the swimlane unless one with the same name
/// is already on the dashboard; dropping it removes the swimlane. A removal
/// whose swimlane cannot be found carries no identity.
#[must_use]
pub fn decide(
    trigger_label: &str,
    issue: &Issue,
    old_labels: &LabelSet,
    new_labels: &LabelSet,
    current: &[Swimlane],
) -> SwimlaneUpdate {
    let change = TriggerChange::classify(trigger_label, old_labels, new_labels);
    decide_change(change, issue, current)
}

/// Fetches the dashboard's swimlanes and decides against them.
///
/// # Errors
///
/// Returns [`SyncError::DashboardFetch`] if the swimlanes cannot be fetched.
pub async fn plan_update(
    tracker: &dyn TrackerClient,
    dashboard_id: DashboardId,
    trigger_label: &str,
    issue: &Issue,
    old_labels: &LabelSet,
    new_labels: &LabelSet,
) -> Result<SwimlaneUpdate, SyncError> {
    let current = tracker
        .fetch_dashboard_swimlanes(dashboard_id)
        .await
        .map_err(|source| SyncError::DashboardFetch { dashboard_id, source })?;

    let update = decide(trigger_label, issue, old_labels, new_labels, &current);
    debug!(dashboard_id, swimlanes = current.len(), %update, "decided swimlane update");
    Ok(update)
}

/// The duplicate-name guard runs first: an addition whose swimlane already
/// exists is a no-op even when removal is also flagged. Otherwise removal
/// wins over creation.
fn decide_change(change: TriggerChange, issue: &Issue, current: &[Swimlane]) -> SwimlaneUpdate {
    let swimlane_name = name(issue);

    if change.added && exists_by_name(current, &swimlane_name) {
        return SwimlaneUpdate::NoOp;
    }

    if change.removed {
        let id = find_by_name(current, &swimlane_name);
        return SwimlaneUpdate::Remove { id, name: swimlane_name };
    }

    if change.added {
        return SwimlaneUpdate::Create { name: swimlane_name, query: query(&issue.key) };
    }

    SwimlaneUpdate::NoOp
}
