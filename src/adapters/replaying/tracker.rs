//! Replaying adapter for the `TrackerClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::tracker::{
    DashboardId, Issue, Swimlane, SwimlaneId, TrackerClient, TrackerError, TrackerFuture,
};

/// Serves recorded tracker results from a cassette.
pub struct ReplayingTracker {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingTracker {
    /// Create a replaying tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    /// Create a replaying tracker that serves the interactions of `cassette`.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self::new(Arc::new(Mutex::new(CassetteReplayer::new(cassette))))
    }

    /// Number of recorded interactions not served yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().map_or(0, |guard| guard.remaining())
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, TrackerError> {
        replay_result(next_output(&self.replayer, method)?)
    }
}

impl TrackerClient for ReplayingTracker {
    fn fetch_issue<'a>(&'a self, _key: &'a str) -> TrackerFuture<'a, Issue> {
        let result = self.replay("fetch_issue");
        Box::pin(async move { result })
    }

    fn fetch_dashboard_swimlanes(
        &self,
        _dashboard_id: DashboardId,
    ) -> TrackerFuture<'_, Vec<Swimlane>> {
        let result = self.replay("fetch_dashboard_swimlanes");
        Box::pin(async move { result })
    }

    fn create_swimlane<'a>(
        &'a self,
        _dashboard_id: DashboardId,
        _name: &'a str,
        _query: &'a str,
    ) -> TrackerFuture<'a, ()> {
        let result = self.replay("create_swimlane");
        Box::pin(async move { result })
    }

    fn delete_swimlane(
        &self,
        _dashboard_id: DashboardId,
        _swimlane_id: SwimlaneId,
    ) -> TrackerFuture<'_, ()> {
        let result = self.replay("delete_swimlane");
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn tracker(interactions: Vec<(&str, serde_json::Value)>) -> ReplayingTracker {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tracker: String::new(),
            interactions: interactions
                .into_iter()
                .enumerate()
                .map(|(seq, (method, output))| Interaction {
                    seq: seq as u64,
                    method: method.into(),
                    input: json!({}),
                    output,
                })
                .collect(),
        };
        ReplayingTracker::from_cassette(&cassette)
    }

    #[tokio::test]
    async fn replays_issue_and_swimlanes() {
        let tracker = tracker(vec![
            (
                "fetch_issue",
                json!({"Ok": {"key": "PROJ-1", "fields": [{"id": "summary", "text": "Fix crash"}]}}),
            ),
            (
                "fetch_dashboard_swimlanes",
                json!({"Ok": [{"id": 7, "name": "<PROJ-1> Fix crash"}]}),
            ),
        ]);
        assert_eq!(tracker.remaining(), 2);

        let issue = tracker.fetch_issue("PROJ-1").await.unwrap();
        assert_eq!(issue.key, "PROJ-1");
        let lanes = tracker.fetch_dashboard_swimlanes(351).await.unwrap();
        assert_eq!(lanes[0].id, Some(SwimlaneId(7)));

        assert_eq!(tracker.remaining(), 0);
    }

    #[tokio::test]
    async fn replays_not_found_delete() {
        let tracker = tracker(vec![("delete_swimlane", json!({"NotFound": "swimlane 7"}))]);
        let err = tracker.delete_swimlane(351, SwimlaneId(7)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unrecorded_call_is_an_error_not_a_panic() {
        let tracker = tracker(vec![]);
        let err = tracker.create_swimlane(351, "x", "y").await.unwrap_err();
        assert!(matches!(err, TrackerError::Replay(ref m) if m.contains("Cassette exhausted")));
    }
}
