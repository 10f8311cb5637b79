//! Live adapter for the `TrackerClient` port using the tracker's REST API.
//!
//! Every call logs in first and sends the session cookie with the request,
//! together with the header that disables the tracker's XSRF check.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, TrackerConfig};
use crate::ports::tracker::{
    DashboardId, Issue, Swimlane, SwimlaneId, TrackerClient, TrackerError, TrackerFuture,
};

const BOARD_API: &str = "/rest/greenhopper/1.0";

/// Session cookie returned by the tracker's login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl Session {
    fn cookie(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    session: Session,
}

/// Board configuration as returned by `xboard/config.json`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardConfig {
    current_view_config: CurrentViewConfig,
}

#[derive(Deserialize)]
struct CurrentViewConfig {
    #[serde(default)]
    swimlanes: Vec<Swimlane>,
}

#[derive(Serialize)]
struct NewSwimlane<'a> {
    name: &'a str,
    query: &'a str,
}

/// Tracker client backed by HTTP.
pub struct LiveTracker {
    client: Client,
    base_url: String,
    login_url: String,
    username: String,
    password: String,
    issue_view_id: u64,
}

impl LiveTracker {
    /// Creates a live tracker from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or credentials are missing, or the
    /// HTTP client cannot be built.
    pub fn new(config: &TrackerConfig) -> Result<Self, ConfigError> {
        let (username, password) = config.credentials()?;
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self {
            client,
            base_url: config.base_url()?.to_string(),
            login_url: config.login_url()?,
            username: username.to_string(),
            password: password.to_string(),
            issue_view_id: config.issue_view_id,
        })
    }

    /// Base URL this tracker talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logs in and returns the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Auth`] if the login is rejected or the
    /// response carries no session.
    pub async fn authenticate(&self) -> Result<Session, TrackerError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest { username: &self.username, password: &self.password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Auth(format!(
                "login to {} returned {}",
                self.login_url,
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| TrackerError::Auth(format!("unexpected login response: {e}")))?;
        Ok(login.session)
    }

    /// Sends a request built by `build` with a fresh session attached.
    async fn send(
        &self,
        build: impl FnOnce(&Client) -> RequestBuilder,
    ) -> Result<Response, TrackerError> {
        let session = self.authenticate().await?;
        let request = build(&self.client)
            .header(reqwest::header::COOKIE, session.cookie())
            .header("X-Atlassian-Token", "no-check");
        Ok(request.send().await?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TrackerError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn board_url(&self, path: &str) -> String {
        format!("{}{BOARD_API}{path}", self.base_url)
    }
}

/// Maps non-success statuses to errors; `404` becomes [`TrackerError::NotFound`].
fn check_status(
    response: Response,
    what: impl FnOnce() -> String,
) -> Result<Response, TrackerError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(TrackerError::NotFound(what()));
    }
    if !status.is_success() {
        return Err(TrackerError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

impl TrackerClient for LiveTracker {
    fn fetch_issue<'a>(&'a self, key: &'a str) -> TrackerFuture<'a, Issue> {
        Box::pin(async move {
            let url = self.board_url("/xboard/issue/details.json");
            let view = self.issue_view_id.to_string();
            let response = self
                .send(|client| {
                    client.get(&url).query(&[("rapidViewId", view.as_str()), ("issueIdOrKey", key)])
                })
                .await?;
            let response = check_status(response, || format!("issue {key}"))?;
            let issue: Issue = Self::decode(response).await?;
            debug!(key, fields = issue.fields.len(), "fetched issue");
            Ok(issue)
        })
    }

    fn fetch_dashboard_swimlanes(
        &self,
        dashboard_id: DashboardId,
    ) -> TrackerFuture<'_, Vec<Swimlane>> {
        Box::pin(async move {
            let url = self.board_url("/xboard/config.json");
            let board = dashboard_id.to_string();
            let response = self
                .send(|client| {
                    client
                        .get(&url)
                        .query(&[("returnDefaultBoard", "false"), ("rapidViewId", board.as_str())])
                })
                .await?;
            let response = check_status(response, || format!("dashboard {dashboard_id}"))?;
            let config: BoardConfig = Self::decode(response).await?;
            let swimlanes = config.current_view_config.swimlanes;
            debug!(dashboard_id, swimlanes = swimlanes.len(), "fetched dashboard swimlanes");
            Ok(swimlanes)
        })
    }

    fn create_swimlane<'a>(
        &'a self,
        dashboard_id: DashboardId,
        name: &'a str,
        query: &'a str,
    ) -> TrackerFuture<'a, ()> {
        Box::pin(async move {
            let url = self.board_url(&format!("/swimlanes/{dashboard_id}/"));
            let response =
                self.send(|client| client.post(&url).json(&NewSwimlane { name, query })).await?;
            check_status(response, || format!("dashboard {dashboard_id}"))?;
            debug!(dashboard_id, name, "created swimlane");
            Ok(())
        })
    }

    fn delete_swimlane(
        &self,
        dashboard_id: DashboardId,
        swimlane_id: SwimlaneId,
    ) -> TrackerFuture<'_, ()> {
        Box::pin(async move {
            let url = self.board_url(&format!("/swimlanes/{dashboard_id}/{swimlane_id}"));
            let response = self.send(|client| client.delete(&url)).await?;
            check_status(response, || {
                format!("swimlane {swimlane_id} on dashboard {dashboard_id}")
            })?;
            debug!(dashboard_id, %swimlane_id, "deleted swimlane");
            Ok(())
        })
    }
}
