//! Recording adapter for the `TrackerClient` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::tracker::{
    DashboardId, Issue, Swimlane, SwimlaneId, TrackerClient, TrackerFuture,
};

/// Records tracker interactions while delegating to an inner implementation.
pub struct RecordingTracker {
    inner: Box<dyn TrackerClient>,
    recorder: SharedRecorder,
}

impl RecordingTracker {
    /// Creates a new recording tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn TrackerClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct FetchIssueInput<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct DashboardInput {
    dashboard_id: DashboardId,
}

#[derive(Serialize)]
struct CreateSwimlaneInput<'a> {
    dashboard_id: DashboardId,
    name: &'a str,
    query: &'a str,
}

#[derive(Serialize)]
struct DeleteSwimlaneInput {
    dashboard_id: DashboardId,
    swimlane_id: SwimlaneId,
}

impl TrackerClient for RecordingTracker {
    fn fetch_issue<'a>(&'a self, key: &'a str) -> TrackerFuture<'a, Issue> {
        Box::pin(async move {
            let result = self.inner.fetch_issue(key).await;
            record_result(&self.recorder, "fetch_issue", &FetchIssueInput { key }, &result);
            result
        })
    }

    fn fetch_dashboard_swimlanes(
        &self,
        dashboard_id: DashboardId,
    ) -> TrackerFuture<'_, Vec<Swimlane>> {
        Box::pin(async move {
            let result = self.inner.fetch_dashboard_swimlanes(dashboard_id).await;
            let input = DashboardInput { dashboard_id };
            record_result(&self.recorder, "fetch_dashboard_swimlanes", &input, &result);
            result
        })
    }

    fn create_swimlane<'a>(
        &'a self,
        dashboard_id: DashboardId,
        name: &'a str,
        query: &'a str,
    ) -> TrackerFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.create_swimlane(dashboard_id, name, query).await;
            let input = CreateSwimlaneInput { dashboard_id, name, query };
            record_result(&self.recorder, "create_swimlane", &input, &result);
            result
        })
    }

    fn delete_swimlane(
        &self,
        dashboard_id: DashboardId,
        swimlane_id: SwimlaneId,
    ) -> TrackerFuture<'_, ()> {
        Box::pin(async move {
            let result = self.inner.delete_swimlane(dashboard_id, swimlane_id).await;
            let input = DeleteSwimlaneInput { dashboard_id, swimlane_id };
            record_result(&self.recorder, "delete_swimlane", &input, &result);
            result
        })
    }
}
