//! Screen model backing the terminal view.

use crate::view::{CellView, ViewError, ViewPort};
use derive_getters::Getters;
use tracing::debug;

/// What the board panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoardPanel {
    /// Nothing drawn yet.
    #[default]
    Blank,
    /// A grid of cells.
    Grid(Vec<Vec<CellView>>),
    /// An inline error in place of the board.
    Error(String),
}

/// Everything the terminal draws, updated through [`ViewPort`].
#[derive(Debug, Clone, Default, Getters)]
pub struct ScreenState {
    board: BoardPanel,
    score: String,
    status: Option<String>,
    overlay: Option<String>,
    high_score_banner: String,
    high_scores: Vec<String>,
}

impl ScreenState {
    /// Creates an empty screen.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewPort for ScreenState {
    fn set_board(&mut self, cells: Vec<Vec<CellView>>) -> Result<(), ViewError> {
        debug!(rows = cells.len(), "Board updated");
        self.board = BoardPanel::Grid(cells);
        Ok(())
    }

    fn show_board_error(&mut self, message: &str) -> Result<(), ViewError> {
        self.board = BoardPanel::Error(message.to_string());
        Ok(())
    }

    fn set_score(&mut self, text: &str) {
        self.score = text.to_string();
    }

    fn set_status(&mut self, text: Option<&str>) {
        self.status = text.map(str::to_string);
    }

    fn show_overlay(&mut self, message: &str) {
        self.overlay = Some(message.to_string());
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn set_high_scores(&mut self, banner: &str, entries: Vec<String>) {
        self.high_score_banner = banner.to_string();
        self.high_scores = entries;
    }
}
