//! Tracker port for reading issues and editing dashboard swimlanes.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a dashboard (a board configuration on the tracker).
pub type DashboardId = u64;

/// Identity the tracker assigns to a swimlane once it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwimlaneId(pub u64);

impl fmt::Display for SwimlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single field of an issue snapshot, e.g. `labels` or `summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field identifier.
    pub id: String,
    /// Rendered field value; composite values are comma separated.
    #[serde(default)]
    pub text: String,
}

/// An issue as observed at decision time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker key, unique per tracker (e.g. `PROJ-42`).
    pub key: String,
    /// Ordered field snapshot.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Issue {
    /// Returns the first field with the given id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// One recorded change of a single issue field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Name of the field that changed.
    pub field: String,
    /// Previous value. The tracker sends `null` for fields that were empty.
    #[serde(rename = "fromString", default)]
    pub from_value: Option<String>,
    /// New value.
    #[serde(rename = "toString", default)]
    pub to_value: Option<String>,
}

/// A named, query-filtered lane on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swimlane {
    /// Tracker identity; absent for swimlanes that were never created.
    #[serde(default)]
    pub id: Option<SwimlaneId>,
    /// Display name, unique within a dashboard.
    pub name: String,
    /// Filter expression selecting the issues shown in the lane.
    #[serde(default)]
    pub query: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Errors returned by tracker adapters.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Login was rejected or returned no session.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure talking to the tracker.
    #[error("tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("tracker returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("failed to decode tracker response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A recorded interaction could not be served.
    #[error("replayed tracker error: {0}")]
    Replay(String),
}

impl TrackerError {
    /// Whether this error means the target resource is already gone.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Boxed future type alias used by [`TrackerClient`] to keep the trait dyn-compatible.
pub type TrackerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TrackerError>> + Send + 'a>>;

/// Reads issues and dashboards from the tracker and edits swimlanes.
///
/// Authentication is an adapter concern: implementations obtain a session
/// before each request and fail the call if that is not possible.
pub trait TrackerClient: Send + Sync {
    /// Fetches the current field snapshot of an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue does not exist or the tracker is unreachable.
    fn fetch_issue<'a>(&'a self, key: &'a str) -> TrackerFuture<'a, Issue>;

    /// Fetches the swimlanes currently configured on a dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the dashboard is unreachable or unauthorized.
    fn fetch_dashboard_swimlanes(&self, dashboard_id: DashboardId)
        -> TrackerFuture<'_, Vec<Swimlane>>;

    /// Creates a swimlane on a dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error on conflict or if the tracker is unreachable.
    fn create_swimlane<'a>(
        &'a self,
        dashboard_id: DashboardId,
        name: &'a str,
        query: &'a str,
    ) -> TrackerFuture<'a, ()>;

    /// Deletes a swimlane from a dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the swimlane does not exist and
    /// other variants when the tracker is unreachable.
    fn delete_swimlane(
        &self,
        dashboard_id: DashboardId,
        swimlane_id: SwimlaneId,
    ) -> TrackerFuture<'_, ()>;
}
