//! Records tracker interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Records interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    tracker: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        tracker: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            tracker: tracker.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record an interaction. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction {
            seq: self.next_seq,
            method: method.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Interactions recorded so far, in order.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            tracker: self.tracker,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("swimlane_recorder_test");
        let path = dir.join("nested").join("event.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "event", "https://jira.example.com");
        assert!(recorder.is_empty());
        recorder.record("fetch_issue", json!({"key": "PROJ-1"}), json!({"Ok": {"key": "PROJ-1"}}));
        recorder.record("fetch_dashboard_swimlanes", json!({"dashboard_id": 351}), json!({"Ok": []}));
        recorder.record(
            "create_swimlane",
            json!({"dashboard_id": 351, "name": "<PROJ-1> No summary"}),
            json!({"Ok": null}),
        );
        assert_eq!(recorder.len(), 3);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "event");
        assert_eq!(cassette.tracker, "https://jira.example.com");
        assert_eq!(cassette.interactions.len(), 3);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[2].seq, 2);
        assert_eq!(cassette.interactions[2].method, "create_swimlane");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
