//! Slide Client library - terminal front end for a server-authoritative 2048 game
//!
//! The server owns the board, the score and win/loss detection. This crate
//! turns player input into move commands, keeps at most one of them in
//! flight, and reflects each returned snapshot onto the screen.
//!
//! # Architecture
//!
//! - **Input**: arrow keys, wheel (debounced) and drags normalized to a [`Direction`]
//! - **Gate**: single-slot latch dropping commands while one is in flight
//! - **Transport**: `POST /move/{direction}`, `POST /reset`, `GET /high_scores`
//! - **Render**: snapshot reconciliation onto a [`ViewPort`]
//! - **Scores**: independent high-score refresh after every command
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use slide_client::{
//!     BoardSource, HttpTransport, MoveOrchestrator, Muted, Reconciler, ScreenState, bootstrap,
//!     shared,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let transport = Arc::new(HttpTransport::new("http://127.0.0.1:5000", None)?);
//! let view = shared(ScreenState::new());
//! let orchestrator = MoveOrchestrator::new(transport, view, Reconciler::new(Arc::new(Muted)));
//! let _input = bootstrap(
//!     &orchestrator,
//!     &BoardSource::IndexPage,
//!     std::time::Duration::from_millis(300),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod audio;
mod bootstrap;
mod config;
mod direction;
mod gate;
mod input;
mod orchestrator;
mod render;
mod scores;
mod snapshot;
mod tile;
mod transport;
mod tui;
mod view;

// Crate-level exports - Data model
pub use direction::Direction;
pub use snapshot::{Board, BoardError, HighScoreEntry, StateSnapshot};
pub use tile::TileStyle;

// Crate-level exports - Input
pub use input::{
    Dispatch, InputFlow, InputNormalizer, TouchTracker, WHEEL_DEBOUNCE, WheelDebouncer,
    key_direction, wheel_delta,
};

// Crate-level exports - Gate and orchestration
pub use gate::{Command, CommandGate, InFlightGuard};
pub use orchestrator::{CommandOutcome, MoveOrchestrator};

// Crate-level exports - Transport
pub use transport::{GameTransport, HttpTransport, TransportError, TransportErrorKind};

// Crate-level exports - Rendering
pub use audio::{AudioCue, AudioError, Muted, TerminalBell};
pub use render::{
    BOARD_ERROR_MESSAGE, Reconciler, RenderError, board_cells, is_terminal_status, score_text,
    status_line,
};
pub use scores::{HighScoreSyncer, banner_text, draw_high_scores, entry_text};
pub use view::{CellView, SharedView, ViewError, ViewPort, lock_view, shared};

// Crate-level exports - Startup and configuration
pub use bootstrap::{
    BoardSource, BootstrapError, INIT_ERROR_MESSAGE, bootstrap, extract_data_board,
    load_initial_board,
};
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Terminal front end
pub use tui::{BoardPanel, ScreenState, draw, run_tui};
