//! High-score syncer: refetches and redraws the score table.
//!
//! Runs independently of board rendering. A failed fetch is logged and leaves
//! the previously drawn table in place.

use crate::snapshot::HighScoreEntry;
use crate::transport::{GameTransport, TransportError};
use crate::view::{SharedView, ViewPort, lock_view};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Banner text for the best entry, or 0 when the table is empty.
pub fn banner_text(entries: &[HighScoreEntry]) -> String {
    let best = entries.first().map_or(0, |entry| *entry.score());
    format!("High Score: {}", best)
}

/// List line for one entry.
pub fn entry_text(entry: &HighScoreEntry) -> String {
    format!("{} - {}", entry.score(), entry.date())
}

/// Draws a fetched table onto a view.
pub fn draw_high_scores<V: ViewPort + ?Sized>(view: &mut V, entries: &[HighScoreEntry]) {
    view.set_high_scores(&banner_text(entries), entries.iter().map(entry_text).collect());
}

/// Fetches the table and redraws it on success.
pub struct HighScoreSyncer<T: ?Sized, V> {
    transport: Arc<T>,
    view: SharedView<V>,
}

impl<T: ?Sized, V> Clone for HighScoreSyncer<T, V> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            view: Arc::clone(&self.view),
        }
    }
}

impl<T, V> HighScoreSyncer<T, V>
where
    T: GameTransport + ?Sized,
    V: ViewPort,
{
    /// Creates a syncer drawing onto `view`.
    pub fn new(transport: Arc<T>, view: SharedView<V>) -> Self {
        Self { transport, view }
    }

    /// Fetches and redraws; errors are logged and returned for callers that
    /// care, never drawn.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), TransportError> {
        debug!("Refreshing high scores");
        match self.transport.high_scores().await {
            Ok(entries) => {
                debug!(count = entries.len(), "High scores received");
                draw_high_scores(&mut *lock_view(&self.view), &entries);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Error fetching high scores");
                Err(e)
            }
        }
    }
}
