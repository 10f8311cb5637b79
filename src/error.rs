//! Errors raised while synchronizing swimlanes for an issue event.

use thiserror::Error;

use crate::ports::tracker::{DashboardId, SwimlaneId, TrackerError};

/// A tracker call failed; carries the identifiers needed to diagnose it.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The issue snapshot could not be fetched.
    #[error("failed to fetch issue {key}: {source}")]
    IssueFetch {
        /// Issue key.
        key: String,
        /// Underlying tracker failure.
        #[source]
        source: TrackerError,
    },

    /// The dashboard's current swimlanes could not be fetched.
    #[error("failed to fetch swimlanes of dashboard {dashboard_id}: {source}")]
    DashboardFetch {
        /// Dashboard being read.
        dashboard_id: DashboardId,
        /// Underlying tracker failure.
        #[source]
        source: TrackerError,
    },

    /// The swimlane could not be created.
    #[error("failed to create swimlane {name:?} on dashboard {dashboard_id}: {source}")]
    Create {
        /// Dashboard being edited.
        dashboard_id: DashboardId,
        /// Name of the swimlane.
        name: String,
        /// Underlying tracker failure.
        #[source]
        source: TrackerError,
    },

    /// The swimlane could not be deleted.
    #[error("failed to delete swimlane {swimlane_id} from dashboard {dashboard_id}: {source}")]
    Delete {
        /// Dashboard being edited.
        dashboard_id: DashboardId,
        /// Swimlane being removed.
        swimlane_id: SwimlaneId,
        /// Underlying tracker failure.
        #[source]
        source: TrackerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_dashboard() {
        let err = SyncError::DashboardFetch {
            dashboard_id: 351,
            source: TrackerError::Status { status: 401, url: "http://x".into() },
        };
        let msg = err.to_string();
        assert!(msg.contains("dashboard 351"));
        assert!(msg.contains("401"));
        assert!(matches!(
            err,
            SyncError::DashboardFetch { source: TrackerError::Status { status: 401, .. }, .. }
        ));
    }

    #[test]
    fn messages_name_the_issue() {
        let err = SyncError::IssueFetch {
            key: "PROJ-1".into(),
            source: TrackerError::NotFound("PROJ-1".into()),
        };
        assert!(err.to_string().starts_with("failed to fetch issue PROJ-1"));
    }
}
