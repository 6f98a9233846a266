//! Render reconciler: reflects a server snapshot onto a [`ViewPort`].
//!
//! Rendering never fails past this module. Board problems are logged and
//! replaced by an inline error in the board area; the rest of the screen is
//! still updated and input keeps working.

use crate::audio::AudioCue;
use crate::snapshot::{Board, BoardError, StateSnapshot};
use crate::view::{CellView, ViewError, ViewPort};
use derive_more::{Display, Error};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Inline message shown when the board cannot be drawn.
pub const BOARD_ERROR_MESSAGE: &str = "Error rendering game board. Check the log for details.";

/// Failure while turning a board into cells.
#[derive(Debug, Clone, Display, Error)]
pub enum RenderError {
    /// The server sent a board that is not a grid of tile values.
    #[display("{}", _0)]
    Board(BoardError),
    /// The view refused the update.
    #[display("{}", _0)]
    View(ViewError),
}

impl From<BoardError> for RenderError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<ViewError> for RenderError {
    fn from(err: ViewError) -> Self {
        Self::View(err)
    }
}

/// Text for the score line.
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

/// Status line content, or `None` when the status is empty or already a score.
pub fn status_line(status: &str) -> Option<&str> {
    if status.is_empty() || status.contains("Score") {
        None
    } else {
        Some(status)
    }
}

/// Whether the status signals victory or game over.
pub fn is_terminal_status(status: &str) -> bool {
    status.contains("Victory") || status.contains("Game over")
}

/// Converts a board into styled cells, rejecting malformed grids.
#[instrument(skip(board), fields(rows = board.height()))]
pub fn board_cells(board: &Board) -> Result<Vec<Vec<CellView>>, RenderError> {
    let tiles = board.tiles()?;
    Ok(tiles
        .into_iter()
        .map(|row| row.into_iter().map(CellView::from_value).collect())
        .collect())
}

/// Applies snapshots to a view and rings the terminal cue.
#[derive(Clone)]
pub struct Reconciler {
    audio: Arc<dyn AudioCue>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Creates a reconciler that plays `audio` on terminal states.
    pub fn new(audio: Arc<dyn AudioCue>) -> Self {
        Self { audio }
    }

    /// Reflects a full snapshot: board, score, status line, overlay and cue.
    #[instrument(skip(self, view, snapshot), fields(score = *snapshot.score(), status = %snapshot.status()))]
    pub fn render<V: ViewPort + ?Sized>(&self, view: &mut V, snapshot: &StateSnapshot) {
        debug!("Rendering snapshot");
        self.render_board(view, snapshot.board());
        view.set_score(&score_text(*snapshot.score()));
        view.set_status(status_line(snapshot.status()));

        if is_terminal_status(snapshot.status()) {
            info!("Terminal status reached");
            view.show_overlay(snapshot.status());
            if let Err(e) = self.audio.play() {
                warn!(error = %e, "Audio playback failed");
            }
        } else {
            view.hide_overlay();
        }
    }

    /// Rebuilds the board grid; on failure shows the inline error instead.
    ///
    /// Returns whether the board was drawn.
    #[instrument(skip(self, view, board))]
    pub fn render_board<V: ViewPort + ?Sized>(&self, view: &mut V, board: &Board) -> bool {
        let result = board_cells(board).and_then(|cells| Ok(view.set_board(cells)?));
        match result {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error rendering board");
                if let Err(e) = view.show_board_error(BOARD_ERROR_MESSAGE) {
                    error!(error = %e, "Board area unavailable for error message");
                }
                false
            }
        }
    }
}
