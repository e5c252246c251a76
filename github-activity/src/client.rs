//! Fetching a user's public event feed from the GitHub REST API.

use crate::event::{RawEvent, UserEvent};
use mockall::automock;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Errors that can occur while fetching events.
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub answered 404 for the user
    #[error("Unable to find user {0}")]
    UserNotFound(String),
    /// The API could not be reached at all
    #[error("Unable to connect to the API. Please check you connection.")]
    Connectivity(#[source] reqwest::Error),
    /// The body was not the JSON event list we expected
    #[error("Failed to parse response")]
    ResponseParse(#[source] serde_json::Error),
    #[error("GitHub API responded with status {0}")]
    UnexpectedStatus(u16),
    #[error("Event fetch did not complete")]
    Worker(#[from] tokio::task::JoinError),
}

/// Source of a user's recent events.
#[automock]
pub trait EventSource {
    async fn fetch_events(&self, username: &str) -> Result<Vec<UserEvent>, Error>;
}

/// [`EventSource`] backed by `GET {api_url}/users/{username}/events`.
///
/// The request is blocking and runs on tokio's blocking pool, so the
/// calling task only awaits its completion.
#[derive(Debug, Clone)]
pub struct GithubClient {
    api_url: String,
    user_agent: String,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn events_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/events",
            self.api_url.trim_end_matches('/'),
            username
        )
    }
}

impl EventSource for GithubClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_events(&self, username: &str) -> Result<Vec<UserEvent>, Error> {
        let url = self.events_url(username);
        let user_agent = self.user_agent.clone();
        let username = username.to_string();
        let events =
            tokio::task::spawn_blocking(move || fetch_blocking(&url, &user_agent, &username))
                .await??;
        info!(count = events.len(), "Fetched events");
        Ok(events)
    }
}

fn fetch_blocking(url: &str, user_agent: &str, username: &str) -> Result<Vec<UserEvent>, Error> {
    debug!(url, "Requesting events");
    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(Error::Connectivity)?;
    let response = client
        .get(url)
        .header(ACCEPT, GITHUB_JSON)
        .send()
        .map_err(Error::Connectivity)?;

    let status = response.status();
    debug!(status = status.as_u16(), "Received response");
    if status == StatusCode::NOT_FOUND {
        return Err(Error::UserNotFound(username.to_string()));
    }
    if !status.is_success() {
        return Err(Error::UnexpectedStatus(status.as_u16()));
    }

    let body = response.text().map_err(Error::Connectivity)?;
    parse_events(&body)
}

/// Parses the body of an events response.
pub fn parse_events(body: &str) -> Result<Vec<UserEvent>, Error> {
    let raw: Vec<RawEvent> = serde_json::from_str(body).map_err(Error::ResponseParse)?;
    Ok(raw.into_iter().map(UserEvent::from).collect())
}
