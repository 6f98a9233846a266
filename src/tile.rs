//! Tile styling keyed by cell value.

use strum::Display;
use tracing::instrument;

/// Visual style of a board cell.
///
/// Only the values a standard game produces have a dedicated style; anything
/// else renders with [`TileStyle::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TileStyle {
    /// Blank cell, also the fallback for unknown values.
    #[strum(to_string = "tile-0")]
    Empty,
    /// Value 2.
    #[strum(to_string = "tile-2")]
    T2,
    /// Value 4.
    #[strum(to_string = "tile-4")]
    T4,
    /// Value 8.
    #[strum(to_string = "tile-8")]
    T8,
    /// Value 16.
    #[strum(to_string = "tile-16")]
    T16,
    /// Value 32.
    #[strum(to_string = "tile-32")]
    T32,
    /// Value 64.
    #[strum(to_string = "tile-64")]
    T64,
    /// Value 128.
    #[strum(to_string = "tile-128")]
    T128,
    /// Value 256.
    #[strum(to_string = "tile-256")]
    T256,
    /// Value 512.
    #[strum(to_string = "tile-512")]
    T512,
    /// Value 1024.
    #[strum(to_string = "tile-1024")]
    T1024,
    /// Value 2048.
    #[strum(to_string = "tile-2048")]
    T2048,
}

impl TileStyle {
    /// Selects the style for a cell value.
    #[instrument(level = "trace")]
    pub fn for_value(value: u32) -> Self {
        match value {
            2 => Self::T2,
            4 => Self::T4,
            8 => Self::T8,
            16 => Self::T16,
            32 => Self::T32,
            64 => Self::T64,
            128 => Self::T128,
            256 => Self::T256,
            512 => Self::T512,
            1024 => Self::T1024,
            2048 => Self::T2048,
            _ => Self::Empty,
        }
    }
}
