//! One-shot audio cue for terminal game states.

use derive_getters::Getters;
use derive_more::{Display, Error};
use std::io::Write;
use tracing::{debug, instrument};

/// Audio playback failure. Never surfaced to the player.
#[derive(Debug, Clone, Display, Error, Getters)]
#[display("Audio error: {} at {}:{}", message, file, line)]
pub struct AudioError {
    /// Error message.
    message: String,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl AudioError {
    /// Creates a new audio error with caller location tracking.
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

impl From<std::io::Error> for AudioError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Something that can play the end-of-game cue.
pub trait AudioCue: Send + Sync {
    /// Attempts to play the cue once.
    fn play(&self) -> Result<(), AudioError>;
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    #[instrument(skip(self))]
    fn play(&self) -> Result<(), AudioError> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        debug!("Bell rung");
        Ok(())
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl AudioCue for Muted {
    fn play(&self) -> Result<(), AudioError> {
        Ok(())
    }
}
