//! Single-slot latch that keeps at most one board-mutating request in flight.

use crate::direction::Direction;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// A board-mutating request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Slide tiles in a direction.
    Move(Direction),
    /// Start a new game.
    Reset,
}

/// Mutual-exclusion latch for move and reset commands.
///
/// Cloning shares the same latch. Acquisition never waits: a busy gate drops
/// the caller instead of queueing it.
#[derive(Debug, Clone, Default)]
pub struct CommandGate {
    in_flight: Arc<AtomicBool>,
}

impl CommandGate {
    /// Creates an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot, or returns `None` if a command is already in flight.
    ///
    /// The slot is released when the returned guard drops, on every exit path.
    pub fn try_acquire(&self) -> Option<InFlightGuard> {
        match self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                trace!("Gate acquired");
                Some(InFlightGuard {
                    in_flight: Arc::clone(&self.in_flight),
                })
            }
            Err(_) => {
                debug!("Gate busy, dropping command");
                None
            }
        }
    }

    /// Whether a command currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding the gate; releases it on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
        trace!("Gate released");
    }
}
