//! HTTP client for the remote todo service.
//!
//! Contract:
//! - `GET /`          → JSON array of `{id, title, completed}`
//! - `POST /`         → body `{title, completed: false}`, returns the created record
//! - `DELETE /{id}`   → 2xx on success
//!
//! Every request carries the user header (default `X-User`). Any non-2xx
//! status, transport failure or undecodable body is an error; callers that
//! only care about reachability can treat all variants alike.

use std::fmt;

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::RemoteConfig;

/// Server-assigned todo identifier.
///
/// The service may hand out numbers or strings; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

/// A todo item as owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize)]
struct NewTodo<'a> {
    title: &'a str,
    completed: bool,
}

/// Why a remote call failed.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a non-success status.
    #[error("backend returned {0}")]
    Status(StatusCode),
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("backend request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The response body was not the expected JSON.
    #[error("backend response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RemoteError {
    /// Short cause label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Status(_) => "status",
            RemoteError::Transport(_) => "transport",
            RemoteError::Decode(_) => "decode",
        }
    }
}

/// Todo service client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: Url,
    user_header: String,
    http: reqwest::Client,
}

impl TodoClient {
    /// Creates a client for `base_url` using the header and timeout from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url, config: &RemoteConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url,
            user_header: config.user_header.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the full list for `user`.
    ///
    /// # Errors
    /// Returns a `RemoteError` on transport failure, non-2xx status or bad JSON.
    pub async fn fetch_all(&self, user: &str) -> Result<Vec<TodoItem>, RemoteError> {
        let response = self
            .http
            .get(self.base_url.clone())
            .header(self.user_header.as_str(), user)
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        let response = check_status(response)?;
        response.json().await.map_err(RemoteError::Decode)
    }

    /// Creates a todo titled `title` for `user`, returning the stored record.
    ///
    /// # Errors
    /// Returns a `RemoteError` on transport failure, non-2xx status or bad JSON.
    pub async fn create(&self, user: &str, title: &str) -> Result<TodoItem, RemoteError> {
        let body = NewTodo {
            title,
            completed: false,
        };
        let response = self
            .http
            .post(self.base_url.clone())
            .header(self.user_header.as_str(), user)
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        let response = check_status(response)?;
        response.json().await.map_err(RemoteError::Decode)
    }

    /// Deletes the todo `id` for `user`.
    ///
    /// # Errors
    /// Returns a `RemoteError` on transport failure or non-2xx status.
    pub async fn delete(&self, user: &str, id: &TodoId) -> Result<(), RemoteError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .header(self.user_header.as_str(), user)
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        check_status(response).map(|_| ())
    }

    fn item_url(&self, id: &TodoId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status(status))
    }
}
