//! Service context bundling the tracker port with its recording state.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::adapters::live::LiveTracker;
use crate::adapters::recording::{RecordingTracker, SharedRecorder};
use crate::adapters::replaying::ReplayingTracker;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::TrackerConfig;
use crate::ports::tracker::TrackerClient;

/// Bundles the tracker trait object used by commands.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Tracker holding issues and dashboards.
    pub tracker: Box<dyn TrackerClient>,
    /// Recorder shared with a recording tracker; written by [`Self::finish`].
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if tracker settings are missing or the HTTP client
    /// cannot be built.
    pub fn live(config: &TrackerConfig) -> Result<Self, String> {
        let tracker = LiveTracker::new(config).map_err(|e| e.to_string())?;
        Ok(Self { tracker: Box::new(tracker), recorder: None })
    }

    /// Creates a live context whose traffic is captured to a cassette at `path`.
    ///
    /// This is the developer-only mechanism behind `SWIMLANE_RECORD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the live tracker cannot be built.
    pub fn recording(config: &TrackerConfig, path: &Path) -> Result<Self, String> {
        let live = LiveTracker::new(config).map_err(|e| e.to_string())?;
        let recorder: SharedRecorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "swimlane-sync-session",
            live.base_url(),
        )));
        Ok(Self {
            tracker: Box::new(RecordingTracker::new(Box::new(live), Arc::clone(&recorder))),
            recorder: Some(recorder),
        })
    }

    /// Creates a context that serves tracker calls from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::from_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self { tracker: Box::new(ReplayingTracker::from_cassette(cassette)), recorder: None }
    }

    /// Whether tracker traffic is being recorded.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Tears the context down, writing the cassette if one was being recorded.
    ///
    /// Returns the cassette path when something was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be
    /// written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Self { tracker, recorder } = self;
        // Release the recording tracker's handle first.
        drop(tracker);

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Cassette recorder still in use at shutdown".to_string())?
            .into_inner()
            .map_err(|_| "Cassette recorder lock poisoned".to_string())?;
        if recorder.is_empty() {
            warn!("recording finished without any tracker interactions");
        } else {
            debug!(interactions = recorder.len(), "writing cassette");
        }
        let path = recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok(Some(path))
    }
}
