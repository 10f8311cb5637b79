//! Record-replay round-trip integration test.
//!
//! Proves that the record/replay system works end-to-end:
//! 1. Record a session against a mock tracker using `ServiceContext::recording()`.
//! 2. Replay the cassette using `ServiceContext::replaying()`.
//! 3. Assert identical outcomes between recording and replaying.
//! 4. Replay a second time and assert determinism.

use std::path::PathBuf;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use swimlane_sync::cassette::format::Cassette;
use swimlane_sync::config::{RulesConfig, TrackerConfig};
use swimlane_sync::context::ServiceContext;
use swimlane_sync::ports::tracker::{ChangelogEntry, SwimlaneId};
use swimlane_sync::swimlane::{
    reconcile, Changelog, Effect, EventIssue, IssueEvent, Outcome, SwimlaneUpdate,
};

fn label_event(key: &str, from: &str, to: &str) -> IssueEvent {
    IssueEvent {
        issue: EventIssue { key: key.into() },
        changelog: Changelog {
            items: vec![ChangelogEntry {
                field: "labels".into(),
                from_value: Some(from.into()),
                to_value: Some(to.into()),
            }],
        },
    }
}

async fn mock_tracker() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/1/session"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"session": {"name": "JSESSIONID", "value": "abc"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/greenhopper/1.0/xboard/issue/details.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "PROJ-1",
            "fields": [
                {"id": "summary", "text": "Fix crash"},
                {"id": "labels", "text": "recycling-nsk"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/greenhopper/1.0/xboard/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "currentViewConfig": {"swimlanes": [
                {"id": 7, "name": "<PROJ-1> Fix crash", "query": "issue in linkedIssues(PROJ-1)"}
            ]}
        })))
        .mount(&server)
        .await;
    // The swimlane was removed by someone else in the meantime.
    Mock::given(method("DELETE"))
        .and(path("/rest/greenhopper/1.0/swimlanes/351/7"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn run_once(ctx: &ServiceContext, event: &IssueEvent) -> Outcome {
    reconcile(ctx.tracker.as_ref(), &RulesConfig::default(), event, false)
        .await
        .expect("reconcile should succeed")
}

#[tokio::test]
async fn record_then_replay_produces_identical_outcomes() {
    let server = mock_tracker().await;
    let dir = std::env::temp_dir().join(format!("swimlane-rr-{}", uuid::Uuid::new_v4()));
    let cassette_path: PathBuf = dir.join("roundtrip.cassette.yaml");
    let event = label_event("PROJ-1", "recycling-nsk,swimline-story", "recycling-nsk");

    // --- Phase 1: Record against the mock tracker ---
    let config = TrackerConfig {
        base_url: Some(server.uri()),
        username: Some("bot".into()),
        password: Some("hunter2".into()),
        ..TrackerConfig::default()
    };
    let ctx = ServiceContext::recording(&config, &cassette_path).unwrap();
    let recorded = run_once(&ctx, &event).await;
    let written = ctx.finish().unwrap();
    assert_eq!(written.as_deref(), Some(cassette_path.as_path()));

    assert_eq!(
        recorded.update,
        SwimlaneUpdate::Remove {
            id: Some(SwimlaneId(7)),
            name: "<PROJ-1> Fix crash".into(),
        }
    );
    assert_eq!(recorded.effect, Effect::AlreadyAbsent);

    let cassette = Cassette::load(&cassette_path).unwrap();
    let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
    assert_eq!(methods, ["fetch_issue", "fetch_dashboard_swimlanes", "delete_swimlane"]);
    assert_eq!(cassette.interactions[2].output, json!({"NotFound": "swimlane 7 on dashboard 351"}));

    // --- Phase 2: Replay ---
    let replay = ServiceContext::replaying(&cassette_path).unwrap();
    let replayed = run_once(&replay, &event).await;
    assert_eq!(replayed, recorded);

    // --- Phase 3: Replay again for determinism ---
    let replay = ServiceContext::replaying(&cassette_path).unwrap();
    assert_eq!(run_once(&replay, &event).await, recorded);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn replay_detects_extra_tracker_calls() {
    let dir = std::env::temp_dir().join(format!("swimlane-rr-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("short.cassette.yaml");
    std::fs::write(
        &cassette_path,
        r#"
name: short
recorded_at: "2025-03-15T14:30:00Z"
tracker: ""
interactions:
  - seq: 0
    method: fetch_issue
    input: {key: PROJ-1}
    output:
      Ok: {key: PROJ-1, fields: [{id: summary, text: Fix crash}]}
"#,
    )
    .unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let event = label_event("PROJ-1", "recycling-nsk", "recycling-nsk,swimline-story");
    let err = reconcile(ctx.tracker.as_ref(), &RulesConfig::default(), &event, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Cassette exhausted"), "{err}");

    std::fs::remove_dir_all(dir).ok();
}
