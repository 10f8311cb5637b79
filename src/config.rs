//! Service configuration.
//!
//! Values come from an optional YAML file, then environment variables (a
//! `.env` file in the working directory is honoured), then built-in defaults.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::swimlane::{DashboardRouter, DEFAULT_TRIGGER_LABEL};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SWIMLANE_CONFIG";
/// Environment variable overriding `tracker.base_url`.
pub const TRACKER_URL_ENV: &str = "SWIMLANE_TRACKER_URL";
/// Environment variable overriding `tracker.login_url`.
pub const LOGIN_URL_ENV: &str = "SWIMLANE_LOGIN_URL";
/// Environment variable overriding `tracker.username`.
pub const USERNAME_ENV: &str = "SWIMLANE_USERNAME";
/// Environment variable overriding `tracker.password`.
pub const PASSWORD_ENV: &str = "SWIMLANE_PASSWORD";

const DEFAULT_ISSUE_VIEW_ID: u64 = 368;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const LOGIN_PATH: &str = "/rest/auth/1/session";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`Config`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying YAML failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// A value needed to talk to the tracker is not set.
    #[error("missing {field} (set it in the config file or via {env})")]
    Missing {
        /// Config key.
        field: &'static str,
        /// Environment variable that can provide it.
        env: &'static str,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How to reach the tracker.
    pub tracker: TrackerConfig,
    /// Which labels drive swimlanes and where they go.
    pub rules: RulesConfig,
}

/// Tracker connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the tracker, e.g. `https://jira.example.com`.
    pub base_url: Option<String>,
    /// Session login endpoint; defaults to the tracker's standard auth path.
    pub login_url: Option<String>,
    /// Login user.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Board used to render issue details.
    pub issue_view_id: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            login_url: None,
            username: None,
            password: None,
            issue_view_id: DEFAULT_ISSUE_VIEW_ID,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TrackerConfig {
    /// The tracker base URL without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no base URL is configured.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .ok_or(ConfigError::Missing { field: "tracker.base_url", env: TRACKER_URL_ENV })
    }

    /// The login endpoint, derived from the base URL when not set explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when neither URL is configured.
    pub fn login_url(&self) -> Result<String, ConfigError> {
        match &self.login_url {
            Some(url) => Ok(url.clone()),
            None => Ok(format!("{}{LOGIN_PATH}", self.base_url()?)),
        }
    }

    /// The login username and password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for whichever credential is unset.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let username = self
            .username
            .as_deref()
            .ok_or(ConfigError::Missing { field: "tracker.username", env: USERNAME_ENV })?;
        let password = self
            .password
            .as_deref()
            .ok_or(ConfigError::Missing { field: "tracker.password", env: PASSWORD_ENV })?;
        Ok((username, password))
    }
}

/// Label rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Label whose addition creates a swimlane and whose removal deletes it.
    pub trigger_label: String,
    /// Team label to dashboard routes.
    pub routes: DashboardRouter,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { trigger_label: DEFAULT_TRIGGER_LABEL.to_string(), routes: DashboardRouter::default() }
    }
}

impl Config {
    /// Loads configuration from `path` (or `SWIMLANE_CONFIG`) and the environment.
    ///
    /// Without a config file, built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a named config file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();

        let path = path.map(Path::to_path_buf).or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Reads a YAML config file without applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        if config.rules.routes.is_empty() {
            warn!(path = %path.display(), "no team routes configured; every event will be a no-op");
        }
        Ok(config)
    }

    /// Overrides tracker settings from `lookup`, usually the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let tracker = &mut self.tracker;
        for (key, slot) in [
            (TRACKER_URL_ENV, &mut tracker.base_url),
            (LOGIN_URL_ENV, &mut tracker.login_url),
            (USERNAME_ENV, &mut tracker.username),
            (PASSWORD_ENV, &mut tracker.password),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = Some(value);
            }
        }
    }
}
