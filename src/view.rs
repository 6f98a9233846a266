//! View-port abstraction over the game screen.
//!
//! The orchestration core only talks to a [`ViewPort`]; the terminal UI
//! implements it with a screen model and tests substitute in-memory fakes.

use crate::tile::TileStyle;
use derive_getters::Getters;
use derive_more::{Display, Error};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::instrument;

/// One rendered board cell.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CellView {
    /// Raw cell value.
    value: u32,
    /// Displayed text; blank for empty cells.
    text: String,
    /// Style keyed by value.
    style: TileStyle,
    /// Marks a non-empty cell as just placed or merged.
    fresh: bool,
}

impl CellView {
    /// Builds the view of a single cell value.
    pub fn from_value(value: u32) -> Self {
        let occupied = value != 0;
        Self {
            value,
            text: if occupied { value.to_string() } else { String::new() },
            style: TileStyle::for_value(value),
            fresh: occupied,
        }
    }
}

/// Error raised by a view when a surface is unavailable.
#[derive(Debug, Clone, Display, Error, Getters)]
#[display("View error: {} at {}:{}", message, file, line)]
pub struct ViewError {
    /// Error message.
    message: String,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl ViewError {
    /// Creates a new view error with caller location tracking.
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

/// Named update operations on the game screen.
///
/// Only the board container can be missing in a way the core needs to know
/// about; the other surfaces degrade silently inside the implementation.
pub trait ViewPort: Send {
    /// Replaces the board grid.
    fn set_board(&mut self, cells: Vec<Vec<CellView>>) -> Result<(), ViewError>;

    /// Replaces the board area with an inline error message.
    fn show_board_error(&mut self, message: &str) -> Result<(), ViewError>;

    /// Sets the score line.
    fn set_score(&mut self, text: &str);

    /// Sets the status line; `None` clears it.
    fn set_status(&mut self, text: Option<&str>);

    /// Shows the blocking overlay with a message.
    fn show_overlay(&mut self, message: &str);

    /// Hides the overlay.
    fn hide_overlay(&mut self);

    /// Redraws the high-score banner and list.
    fn set_high_scores(&mut self, banner: &str, entries: Vec<String>);
}

/// A view shared between the input loop, command tasks and the draw loop.
pub type SharedView<V> = Arc<Mutex<V>>;

/// Wraps a view for sharing.
pub fn shared<V: ViewPort>(view: V) -> SharedView<V> {
    Arc::new(Mutex::new(view))
}

/// Locks a shared view, recovering from a poisoned lock.
///
/// A panic while holding the lock leaves the screen model in some prior
/// state, which the next snapshot fully replaces.
pub fn lock_view<V>(view: &SharedView<V>) -> MutexGuard<'_, V> {
    view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
