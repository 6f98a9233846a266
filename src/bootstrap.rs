//! Startup: initial board, first render, first high-score refresh, input wiring.

use crate::gate::Command;
use crate::input::{Dispatch, InputNormalizer};
use crate::orchestrator::MoveOrchestrator;
use crate::snapshot::Board;
use crate::transport::{GameTransport, TransportError};
use crate::view::{ViewPort, lock_view};
use derive_getters::Getters;
use derive_more::{Display, Error};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Inline message shown when startup fails.
pub const INIT_ERROR_MESSAGE: &str = "Error initializing game. Check the log for details.";

/// Startup error with location tracking.
#[derive(Debug, Clone, Display, Error, Getters)]
#[display("Bootstrap error: {} at {}:{}", message, file, line)]
pub struct BootstrapError {
    /// Error message.
    message: String,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl BootstrapError {
    /// Creates a new bootstrap error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<TransportError> for BootstrapError {
    #[track_caller]
    fn from(err: TransportError) -> Self {
        Self::new(format!("Failed to load index page: {}", err))
    }
}

impl From<serde_json::Error> for BootstrapError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Invalid initial board: {}", err))
    }
}

/// Where the initial board comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSource {
    /// A JSON board supplied by the user.
    Explicit(String),
    /// The `data-board` attribute of the server-rendered index page.
    IndexPage,
}

/// Extracts the raw value of the `data-board` attribute from page markup.
///
/// Accepts either quote style and decodes the quote entities a template
/// engine emits.
pub fn extract_data_board(html: &str) -> Option<String> {
    const ATTR: &str = "data-board=";
    let start = html.find(ATTR)? + ATTR.len();
    let rest = &html[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &rest[quote.len_utf8()..];
    let end = body.find(quote)?;
    Some(
        body[..end]
            .replace("&quot;", "\"")
            .replace("&#34;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&"),
    )
}

/// Resolves and parses the initial board.
///
/// Shape and cell values are not checked here; a board that parses but
/// cannot be drawn is reported inline by the renderer.
#[instrument(skip(transport))]
pub async fn load_initial_board<T: GameTransport + ?Sized>(
    transport: &T,
    source: &BoardSource,
) -> Result<Board, BootstrapError> {
    let raw = match source {
        BoardSource::Explicit(json) => json.clone(),
        BoardSource::IndexPage => {
            let html = transport.index_page().await?;
            extract_data_board(&html)
                .ok_or_else(|| BootstrapError::new("Index page has no data-board attribute"))?
        }
    };
    debug!(raw = %raw, "Parsing initial board");
    let board = Board::from_json(&raw)?;
    info!(rows = board.height(), cols = board.width(), "Initial board parsed");
    Ok(board)
}

/// Runs the startup sequence and wires input to the orchestrator.
///
/// Fails only when the initial board cannot be fetched or parsed; the board
/// area then shows [`INIT_ERROR_MESSAGE`] and no input is wired. A parsed
/// board that cannot be drawn shows the render error inline and input is
/// still wired, so a reset can recover.
#[instrument(skip(orchestrator))]
pub async fn bootstrap<T, V>(
    orchestrator: &MoveOrchestrator<T, V>,
    source: &BoardSource,
    wheel_window: Duration,
) -> Result<InputNormalizer, BootstrapError>
where
    T: GameTransport + ?Sized + 'static,
    V: ViewPort + 'static,
{
    match initialize(orchestrator, source).await {
        Ok(()) => {
            let target = orchestrator.clone();
            let dispatch: Dispatch = Arc::new(move |command: Command| {
                // Dropped commands and task handles are not needed here.
                let _ = target.submit(command);
            });
            info!("Input wired");
            Ok(InputNormalizer::new(wheel_window, dispatch))
        }
        Err(e) => {
            error!(error = %e, "Error initializing game");
            if let Err(e) = lock_view(orchestrator.view()).show_board_error(INIT_ERROR_MESSAGE) {
                error!(error = %e, "Board area unavailable for error message");
            }
            Err(e)
        }
    }
}

async fn initialize<T, V>(
    orchestrator: &MoveOrchestrator<T, V>,
    source: &BoardSource,
) -> Result<(), BootstrapError>
where
    T: GameTransport + ?Sized + 'static,
    V: ViewPort + 'static,
{
    let board = load_initial_board(orchestrator.transport().as_ref(), source).await?;
    let drawn = orchestrator
        .reconciler()
        .render_board(&mut *lock_view(orchestrator.view()), &board);
    if !drawn {
        warn!("Initial board not drawn, waiting for a reset");
    }
    if let Err(e) = orchestrator.scores().refresh().await {
        warn!(error = %e, "Initial high-score refresh failed");
    }
    Ok(())
}
