//! Wire types returned by the game server.
//!
//! Every snapshot fully replaces the previous UI state; nothing here is cached
//! or merged across requests.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

/// Why a board cannot be shown as a grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The board, or one of its rows, is not an array.
    #[display("Malformed board: expected an array of rows")]
    NotGrid,
    /// A cell is not a non-negative integer.
    #[display("Malformed board: cell ({}, {}) has value {}", row, col, value)]
    InvalidCell {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending value as JSON text.
        value: String,
    },
    /// Rows of unequal length.
    #[display("Malformed board: row {} has {} cells, expected {}", row, found, expected)]
    Ragged {
        /// Offending row index.
        row: usize,
        /// Its length.
        found: usize,
        /// Length of the first row.
        expected: usize,
    },
}

/// A 2-D grid of cell values, row-major. `0` is an empty cell.
///
/// Kept as received; [`Board::tiles`] validates the shape and cell values so
/// a malformed board surfaces at render time rather than as a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    raw: Value,
}

impl Board {
    /// Builds a board from rows without validation.
    pub fn new(rows: Vec<Vec<u32>>) -> Self {
        let raw = rows
            .into_iter()
            .map(|row| Value::Array(row.into_iter().map(Value::from).collect()))
            .collect();
        Self {
            raw: Value::Array(raw),
        }
    }

    /// Parses a JSON board such as `[[0,2],[4,0]]`.
    ///
    /// Only JSON syntax is checked here.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The board as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Number of rows (0 when the board is not an array).
    pub fn height(&self) -> usize {
        self.raw.as_array().map_or(0, Vec::len)
    }

    /// Number of columns in the first row (0 for an empty board).
    pub fn width(&self) -> usize {
        self.raw
            .get(0)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Value at `(row, col)`, if in bounds and a valid cell.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.raw.get(row)?.get(col).and_then(cell_value)
    }

    /// Validates the board and returns its cell values.
    #[instrument(level = "trace", skip(self))]
    pub fn tiles(&self) -> Result<Vec<Vec<u32>>, BoardError> {
        let rows = self.raw.as_array().ok_or(BoardError::NotGrid)?;
        let expected = self.width();
        rows.iter()
            .enumerate()
            .map(|(row, cells)| {
                let cells = cells.as_array().ok_or(BoardError::NotGrid)?;
                if cells.len() != expected {
                    return Err(BoardError::Ragged {
                        row,
                        found: cells.len(),
                        expected,
                    });
                }
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        cell_value(cell).ok_or_else(|| BoardError::InvalidCell {
                            row,
                            col,
                            value: cell.to_string(),
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

fn cell_value(cell: &Value) -> Option<u32> {
    cell.as_u64().and_then(|v| u32::try_from(v).ok())
}

/// Authoritative `{board, score, status}` triple produced by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct StateSnapshot {
    /// Current board.
    board: Board,
    /// Current score.
    score: u64,
    /// Human-readable status; may be empty.
    #[serde(default)]
    status: String,
}

/// One row of the server's high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HighScoreEntry {
    /// Final score of the recorded game.
    score: u64,
    /// Server-formatted date of the game.
    date: String,
}
