//! HTTP transport to the authoritative game server.

use crate::direction::Direction;
use crate::snapshot::{HighScoreEntry, StateSnapshot};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Broad cause of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransportErrorKind {
    /// Connection or I/O failure.
    Network,
    /// Non-success HTTP status.
    Status,
    /// Body was not the expected JSON.
    Decode,
    /// Request exceeded the configured timeout.
    Timeout,
}

/// Transport error with location tracking.
#[derive(Debug, Clone, Display, Error, Getters)]
#[display("Transport error ({}): {} at {}:{}", kind, message, file, line)]
pub struct TransportError {
    /// Failure category.
    kind: TransportErrorKind,
    /// Error message.
    message: String,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else if err.is_status() {
            TransportErrorKind::Status
        } else {
            TransportErrorKind::Network
        };
        Self::new(kind, format!("HTTP error: {}", err))
    }
}

/// Request/response boundary to the game server.
///
/// `move_tiles` and `reset` mutate server state; `high_scores` and
/// `index_page` are read-only.
#[async_trait::async_trait]
pub trait GameTransport: Send + Sync {
    /// Sends a move and returns the resulting snapshot.
    async fn move_tiles(&self, direction: Direction) -> Result<StateSnapshot, TransportError>;

    /// Starts a new game and returns its snapshot.
    async fn reset(&self) -> Result<StateSnapshot, TransportError>;

    /// Fetches the high-score table, best first.
    async fn high_scores(&self) -> Result<Vec<HighScoreEntry>, TransportError>;

    /// Fetches the server-rendered index page.
    async fn index_page(&self) -> Result<String, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of game server, without trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for `base_url`, optionally bounding every request.
    #[instrument(skip_all, fields(base_url = %base_url, timeout = ?timeout))]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            error!(error = %e, "Failed to build HTTP client");
            TransportError::new(
                TransportErrorKind::Network,
                format!("Failed to build client: {}", e),
            )
        })?;
        info!(base_url = %base_url, "HTTP transport ready");
        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Got response");

        if !status.is_success() {
            error!(status = %status, "Server returned error status");
            return Err(TransportError::new(
                TransportErrorKind::Status,
                format!("HTTP {}: {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Failed to parse JSON response");
            TransportError::new(
                TransportErrorKind::Decode,
                format!("Invalid JSON response: {}", e),
            )
        })
    }

    async fn post_snapshot(&self, path: &str) -> Result<StateSnapshot, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        let response = self.client.post(&url).send().await?;
        self.read_json(response).await
    }
}

#[async_trait::async_trait]
impl GameTransport for HttpTransport {
    #[instrument(skip(self), fields(direction = %direction))]
    async fn move_tiles(&self, direction: Direction) -> Result<StateSnapshot, TransportError> {
        info!("Sending move");
        self.post_snapshot(&format!("/move/{}", direction.as_path())).await
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<StateSnapshot, TransportError> {
        info!("Resetting game");
        self.post_snapshot("/reset").await
    }

    #[instrument(skip(self))]
    async fn high_scores(&self) -> Result<Vec<HighScoreEntry>, TransportError> {
        debug!("Fetching high scores");
        let url = format!("{}/high_scores", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.read_json(response).await
    }

    #[instrument(skip(self))]
    async fn index_page(&self) -> Result<String, TransportError> {
        debug!("Fetching index page");
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::Status,
                format!("HTTP {}", status),
            ));
        }
        Ok(body)
    }
}
