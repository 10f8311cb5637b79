//! Per-event driver: label diff, routing, decision, then the tracker edit.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::decision::plan_update;
use super::labels::{diff, TriggerChange};
use super::{LabelSet, SwimlaneUpdate};
use crate::config::RulesConfig;
use crate::error::SyncError;
use crate::ports::tracker::{ChangelogEntry, DashboardId, TrackerClient};

/// Issue change notification as delivered by the tracker's webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    /// The issue that changed.
    pub issue: EventIssue,
    /// What changed.
    #[serde(default)]
    pub changelog: Changelog,
}

/// Issue reference inside an [`IssueEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventIssue {
    /// Issue key.
    pub key: String,
}

/// Field changes carried by an [`IssueEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// One entry per changed field.
    #[serde(default)]
    pub items: Vec<ChangelogEntry>,
}

/// What happened on the tracker as a result of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing needed doing.
    None,
    /// An edit was decided but not sent.
    DryRun,
    /// The swimlane was created.
    Created,
    /// The swimlane was deleted.
    Deleted,
    /// The swimlane to remove was already gone.
    AlreadyAbsent,
}

/// Result of reconciling one issue event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Issue the event was about.
    pub issue_key: String,
    /// Dashboard the issue routed to, if any.
    pub dashboard_id: Option<DashboardId>,
    /// The decision.
    pub update: SwimlaneUpdate,
    /// What was done with it.
    pub effect: Effect,
}

impl Outcome {
    /// An outcome that left the dashboard alone.
    #[must_use]
    pub fn untouched(issue_key: &str, dashboard_id: Option<DashboardId>) -> Self {
        Self {
            issue_key: issue_key.to_string(),
            dashboard_id,
            update: SwimlaneUpdate::NoOp,
            effect: Effect::None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.issue_key, self.update)?;
        if let Some(dashboard_id) = self.dashboard_id {
            write!(f, " on dashboard {dashboard_id}")?;
        }
        match self.effect {
            Effect::None | Effect::Created | Effect::Deleted => Ok(()),
            Effect::DryRun => write!(f, " [dry run]"),
            Effect::AlreadyAbsent => write!(f, " [already absent]"),
        }
    }
}

/// Label transition of an event that needs a dashboard edit decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Dashboard owning the issue's team.
    pub dashboard_id: DashboardId,
    /// Labels before the change.
    pub old_labels: LabelSet,
    /// Labels after the change.
    pub new_labels: LabelSet,
}

/// Works out whether `event` concerns a dashboard at all, without any I/O.
///
/// Returns `None` when the trigger label did not move or no team label
/// routes the issue to a dashboard.
#[must_use]
pub fn route(rules: &RulesConfig, event: &IssueEvent) -> Option<Route> {
    let (old_labels, new_labels) = diff(&event.changelog.items);

    if TriggerChange::classify(&rules.trigger_label, &old_labels, &new_labels)
        == TriggerChange::default()
    {
        info!(trigger = %rules.trigger_label, "trigger label unchanged; nothing to do");
        return None;
    }

    let Some(dashboard_id) = rules.routes.resolve(&new_labels) else {
        info!("no team label routes this issue to a dashboard");
        return None;
    };

    Some(Route { dashboard_id, old_labels, new_labels })
}

/// Brings the dashboard in line with the label change described by `event`.
///
/// Events that do not move the trigger label, or whose issue carries no
/// routed team label, return a no-op without touching the tracker. With
/// `dry_run` the decision is computed but not sent.
///
/// # Errors
///
/// Returns an error if fetching the issue or dashboard fails, or if the
/// create/delete call fails for any reason other than the swimlane being
/// already gone.
#[instrument(
    skip_all,
    fields(issue = %event.issue.key, event_id = %uuid::Uuid::new_v4())
)]
pub async fn reconcile(
    tracker: &dyn TrackerClient,
    rules: &RulesConfig,
    event: &IssueEvent,
    dry_run: bool,
) -> Result<Outcome, SyncError> {
    let key = event.issue.key.as_str();
    let Some(Route { dashboard_id, old_labels, new_labels }) = route(rules, event) else {
        return Ok(Outcome::untouched(key, None));
    };

    let issue = tracker
        .fetch_issue(key)
        .await
        .map_err(|source| SyncError::IssueFetch { key: key.to_string(), source })?;

    let update = plan_update(
        tracker,
        dashboard_id,
        &rules.trigger_label,
        &issue,
        &old_labels,
        &new_labels,
    )
    .await?;

    let effect = if dry_run {
        if update == SwimlaneUpdate::NoOp {
            Effect::None
        } else {
            Effect::DryRun
        }
    } else {
        apply(tracker, dashboard_id, &update).await?
    };

    info!(dashboard_id, %update, ?effect, "reconciled swimlane");
    Ok(Outcome { issue_key: key.to_string(), dashboard_id: Some(dashboard_id), update, effect })
}

/// Sends a decided update to the tracker.
///
/// A removal without an identity is skipped, and a delete that reports the
/// swimlane as missing counts as done.
///
/// # Errors
///
/// Returns an error if the create or delete call fails.
pub async fn apply(
    tracker: &dyn TrackerClient,
    dashboard_id: DashboardId,
    update: &SwimlaneUpdate,
) -> Result<Effect, SyncError> {
    match update {
        SwimlaneUpdate::NoOp => Ok(Effect::None),
        SwimlaneUpdate::Create { name, query } => {
            tracker.create_swimlane(dashboard_id, name, query).await.map_err(|source| {
                SyncError::Create { dashboard_id, name: name.clone(), source }
            })?;
            Ok(Effect::Created)
        }
        SwimlaneUpdate::Remove { id: None, name } => {
            warn!(dashboard_id, name, "swimlane to remove is not on the dashboard");
            Ok(Effect::AlreadyAbsent)
        }
        SwimlaneUpdate::Remove { id: Some(swimlane_id), name } => {
            match tracker.delete_swimlane(dashboard_id, *swimlane_id).await {
                Ok(()) => Ok(Effect::Deleted),
                Err(source) if source.is_not_found() => {
                    warn!(dashboard_id, %swimlane_id, name, "swimlane already deleted");
                    Ok(Effect::AlreadyAbsent)
                }
                Err(source) => {
                    Err(SyncError::Delete { dashboard_id, swimlane_id: *swimlane_id, source })
                }
            }
        }
    }
}
