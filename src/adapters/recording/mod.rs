//! Recording adapters that capture interactions to cassettes.

pub mod tracker;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::tracker::TrackerError;

pub use tracker::RecordingTracker;

/// Record a tracker `Result` using the `Ok`/`Err`/`NotFound` JSON convention.
///
/// Mirror of `replaying::replay_result` - serializes the result for replay.
///
/// Convention:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(TrackerError::NotFound(m))` is serialized as `{"NotFound": m}`
/// - any other `Err(e)` is serialized as `{"Err": e.to_string()}`
pub(crate) fn record_result<T, I>(
    recorder: &Mutex<CassetteRecorder>,
    method: &str,
    input: &I,
    result: &Result<T, TrackerError>,
) where
    T: Serialize,
    I: Serialize,
{
    let encoded = serde_json::to_value(input).and_then(|input| {
        let output = match result {
            Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v)? }),
            Err(TrackerError::NotFound(m)) => serde_json::json!({ "NotFound": m }),
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        Ok((input, output))
    });

    let (input, output) = match encoded {
        Ok(pair) => pair,
        Err(e) => {
            warn!(method, error = %e, "failed to encode tracker interaction; not recorded");
            return;
        }
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(method, input, output),
        Err(_) => warn!(method, "recorder lock poisoned; interaction not recorded"),
    }
}

/// Shared handle to a recorder used by recording adapters.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_each_result_shape() {
        let recorder = Mutex::new(CassetteRecorder::new("unused.cassette.yaml", "t", ""));
        record_result(&recorder, "fetch_issue", &json!({"key": "A-1"}), &Ok::<_, TrackerError>(1));
        record_result::<(), _>(
            &recorder,
            "delete_swimlane",
            &json!({"swimlane_id": 7}),
            &Err(TrackerError::NotFound("swimlane 7".into())),
        );
        record_result::<(), _>(
            &recorder,
            "create_swimlane",
            &json!({}),
            &Err(TrackerError::Auth("nope".into())),
        );

        let recorder = recorder.into_inner().unwrap();
        let recorded = recorder.interactions();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].input, json!({"key": "A-1"}));
        assert_eq!(recorded[0].output, json!({"Ok": 1}));
        assert_eq!(recorded[1].output, json!({"NotFound": "swimlane 7"}));
        assert_eq!(recorded[2].output, json!({"Err": "authentication failed: nope"}));
    }
}
