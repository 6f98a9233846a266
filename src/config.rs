//! Client configuration: TOML file, environment, then CLI overrides.

use crate::input::WHEEL_DEBOUNCE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the configured server URL.
pub const SERVER_URL_ENV: &str = "SLIDE_SERVER_URL";

/// Configuration for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Trailing quiet window for wheel input, in milliseconds.
    #[serde(default = "default_wheel_debounce_ms")]
    wheel_debounce_ms: u64,

    /// Optional bound on every request, in milliseconds. Unset means requests
    /// may wait forever.
    #[serde(default)]
    request_timeout_ms: Option<u64>,

    /// Whether to ring the terminal bell on victory or game over.
    #[serde(default = "default_audio")]
    audio: bool,

    /// File that receives log output while the terminal UI is running.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// JSON board to start from instead of scraping the index page.
    #[serde(default)]
    initial_board: Option<String>,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

#[instrument]
fn default_wheel_debounce_ms() -> u64 {
    WHEEL_DEBOUNCE.as_millis() as u64
}

#[instrument]
fn default_audio() -> bool {
    true
}

#[instrument]
fn default_log_file() -> String {
    "slide_client.log".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            wheel_debounce_ms: default_wheel_debounce_ms(),
            request_timeout_ms: None,
            audio: default_audio(),
            log_file: default_log_file(),
            initial_board: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise defaults, then applies the
    /// environment override.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            debug!(url = %url, "Server URL from environment");
            config.server_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Overrides the initial board.
    pub fn with_initial_board(mut self, board: impl Into<String>) -> Self {
        self.initial_board = Some(board.into());
        self
    }

    /// Overrides the request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Rejects values the client cannot work with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "server_url must be an http(s) URL, got {:?}",
                self.server_url
            )));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::new(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Wheel debounce window.
    pub fn wheel_window(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }

    /// Request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error, Getters)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    message: String,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
