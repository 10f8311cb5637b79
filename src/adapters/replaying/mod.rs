//! Replaying adapters that serve recorded interactions.

pub mod tracker;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::tracker::TrackerError;

pub use tracker::ReplayingTracker;

/// Pull the next recorded output for `method`.
///
/// Mirror of `recording::record_result` - reads output instead of writing it.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    method: &str,
) -> Result<serde_json::Value, TrackerError> {
    let mut guard =
        replayer.lock().map_err(|_| TrackerError::Replay("replayer lock poisoned".into()))?;
    guard.next_interaction(method).map(|i| i.output.clone()).map_err(TrackerError::Replay)
}

/// Decode a recorded `Result` using the `Ok`/`Err`/`NotFound` JSON convention.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, TrackerError> {
    if let Some(value) = output.get("Ok") {
        return Ok(serde_json::from_value(value.clone())?);
    }
    if let Some(message) = output.get("NotFound") {
        return Err(TrackerError::NotFound(text_of(message)));
    }
    if let Some(message) = output.get("Err") {
        return Err(TrackerError::Replay(text_of(message)));
    }
    Err(TrackerError::Replay(format!("unrecognized recorded output: {output}")))
}

fn text_of(value: &serde_json::Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_output_decodes_value() {
        let lanes: Vec<String> = replay_result(json!({"Ok": ["a", "b"]})).unwrap();
        assert_eq!(lanes, vec!["a", "b"]);
        replay_result::<()>(json!({"Ok": null})).unwrap();
    }

    #[test]
    fn not_found_output_keeps_its_kind() {
        let err = replay_result::<()>(json!({"NotFound": "swimlane 7"})).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: swimlane 7");
    }

    #[test]
    fn err_output_becomes_replay_error() {
        let err = replay_result::<()>(json!({"Err": "tracker returned 500"})).unwrap_err();
        assert!(matches!(err, TrackerError::Replay(ref m) if m == "tracker returned 500"));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = replay_result::<()>(json!({"weird": 1})).unwrap_err();
        assert!(err.to_string().contains("unrecognized"));
    }
}
