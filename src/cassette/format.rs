//! Cassette data structures for recording and replaying tracker traffic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call to the tracker port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Tracker method invoked, e.g. `fetch_issue`.
    pub method: String,
    /// Arguments the method was called with.
    pub input: serde_json::Value,
    /// Result, encoded as `{"Ok": v}`, `{"Err": msg}` or `{"NotFound": msg}`.
    pub output: serde_json::Value,
}

/// A cassette containing the tracker interactions of one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Base URL of the tracker the session talked to.
    #[serde(default)]
    pub tracker: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}
