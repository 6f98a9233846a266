//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use slide_client::{
    AudioCue, AudioError, Board, CellView, Direction, GameTransport, HighScoreEntry,
    StateSnapshot, TransportError, TransportErrorKind, ViewError, ViewPort,
};
use tokio::sync::Semaphore;

/// In-memory view recording every update.
#[derive(Debug, Default)]
pub struct FakeView {
    pub board: Option<Vec<Vec<CellView>>>,
    pub board_error: Option<String>,
    pub score: Option<String>,
    pub status: Option<String>,
    pub overlay: Option<String>,
    pub overlay_hidden_calls: usize,
    pub banner: Option<String>,
    pub high_scores: Vec<String>,
    /// Simulates a page without a board container.
    pub missing_board: bool,
}

impl FakeView {
    /// A view without a board container.
    pub fn without_board() -> Self {
        Self {
            missing_board: true,
            ..Self::default()
        }
    }

    /// Displayed text of every cell.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.board
            .as_ref()
            .map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(|cell| cell.text().clone()).collect())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ViewPort for FakeView {
    fn set_board(&mut self, cells: Vec<Vec<CellView>>) -> Result<(), ViewError> {
        if self.missing_board {
            return Err(ViewError::new("board container not found"));
        }
        self.board = Some(cells);
        self.board_error = None;
        Ok(())
    }

    fn show_board_error(&mut self, message: &str) -> Result<(), ViewError> {
        if self.missing_board {
            return Err(ViewError::new("board container not found"));
        }
        self.board = None;
        self.board_error = Some(message.to_string());
        Ok(())
    }

    fn set_score(&mut self, text: &str) {
        self.score = Some(text.to_string());
    }

    fn set_status(&mut self, text: Option<&str>) {
        self.status = text.map(str::to_string);
    }

    fn show_overlay(&mut self, message: &str) {
        self.overlay = Some(message.to_string());
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
        self.overlay_hidden_calls += 1;
    }

    fn set_high_scores(&mut self, banner: &str, entries: Vec<String>) {
        self.banner = Some(banner.to_string());
        self.high_scores = entries;
    }
}

/// Audio cue that counts plays and can be told to fail.
#[derive(Debug, Default)]
pub struct CountingAudio {
    pub plays: AtomicUsize,
    pub fail: bool,
}

impl CountingAudio {
    pub fn failing() -> Self {
        Self {
            plays: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AudioCue for CountingAudio {
    fn play(&self) -> Result<(), AudioError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AudioError::new("no audio device"));
        }
        Ok(())
    }
}

/// Scripted transport.
///
/// Move and reset pop the next scripted snapshot result (falling back to a
/// default snapshot). A held transport blocks move and reset until
/// [`FakeTransport::release`] is called.
#[derive(Debug)]
pub struct FakeTransport {
    pub moves: Mutex<Vec<Direction>>,
    pub resets: AtomicUsize,
    pub high_score_calls: AtomicUsize,
    pub started: AtomicUsize,
    snapshots: Mutex<VecDeque<Result<StateSnapshot, TransportError>>>,
    scores: Mutex<Result<Vec<HighScoreEntry>, TransportError>>,
    index: Mutex<Option<String>>,
    permits: Semaphore,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            moves: Mutex::new(Vec::new()),
            resets: AtomicUsize::new(0),
            high_score_calls: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
            snapshots: Mutex::new(VecDeque::new()),
            scores: Mutex::new(Ok(Vec::new())),
            index: Mutex::new(None),
            permits: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }
}

impl FakeTransport {
    /// A transport whose move/reset calls wait for [`FakeTransport::release`].
    pub fn held() -> Self {
        Self {
            permits: Semaphore::new(0),
            ..Self::default()
        }
    }

    /// Lets one held call complete.
    pub fn release(&self) {
        self.permits.add_permits(1);
    }

    pub fn push_snapshot(&self, snapshot: StateSnapshot) {
        self.snapshots.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn push_failure(&self, kind: TransportErrorKind) {
        self.snapshots
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(kind, "scripted failure")));
    }

    pub fn set_scores(&self, scores: Vec<HighScoreEntry>) {
        *self.scores.lock().unwrap() = Ok(scores);
    }

    pub fn fail_scores(&self) {
        *self.scores.lock().unwrap() = Err(TransportError::new(
            TransportErrorKind::Network,
            "scores unavailable",
        ));
    }

    pub fn set_index(&self, html: &str) {
        *self.index.lock().unwrap() = Some(html.to_string());
    }

    pub fn move_log(&self) -> Vec<Direction> {
        self.moves.lock().unwrap().clone()
    }

    async fn next_snapshot(&self) -> Result<StateSnapshot, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.permits.acquire().await.unwrap().forget();
        self.snapshots
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(snapshot(vec![vec![0, 0], vec![0, 0]], 0, "Score: 0")))
    }
}

#[async_trait::async_trait]
impl GameTransport for FakeTransport {
    async fn move_tiles(&self, direction: Direction) -> Result<StateSnapshot, TransportError> {
        self.moves.lock().unwrap().push(direction);
        self.next_snapshot().await
    }

    async fn reset(&self) -> Result<StateSnapshot, TransportError> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.next_snapshot().await
    }

    async fn high_scores(&self) -> Result<Vec<HighScoreEntry>, TransportError> {
        self.high_score_calls.fetch_add(1, Ordering::SeqCst);
        self.scores.lock().unwrap().clone()
    }

    async fn index_page(&self) -> Result<String, TransportError> {
        self.index.lock().unwrap().clone().ok_or_else(|| {
            TransportError::new(TransportErrorKind::Status, "HTTP 404 Not Found")
        })
    }
}

/// Builds a snapshot.
pub fn snapshot(rows: Vec<Vec<u32>>, score: u64, status: &str) -> StateSnapshot {
    StateSnapshot::new(Board::new(rows), score, status.to_string())
}

/// Shared handle to a fake view.
pub type View = Arc<Mutex<FakeView>>;
