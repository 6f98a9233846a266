//! Canonical move directions and the dominant-axis classifier.

use strum::{Display, IntoStaticStr};
use tracing::instrument;

/// One of the four canonical move commands.
///
/// The lowercase string form is the path segment of the move endpoint
/// (`POST /move/{direction}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Slide tiles towards the top row.
    Up,
    /// Slide tiles towards the bottom row.
    Down,
    /// Slide tiles towards the first column.
    Left,
    /// Slide tiles towards the last column.
    Right,
}

impl Direction {
    /// Classifies a displacement by dominant axis and sign.
    ///
    /// `|dx| > |dy|` selects the horizontal axis, anything else (ties included)
    /// the vertical one. Positive values map to `Right`/`Down`, everything else
    /// to `Left`/`Up`.
    #[instrument(level = "trace")]
    pub fn classify(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Returns the endpoint path segment for this direction.
    pub fn as_path(self) -> &'static str {
        self.into()
    }
}
