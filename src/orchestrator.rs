//! Move orchestration: gate, transport, then reconcile.
//!
//! Each accepted command is one spawned task. The gate guard travels with the
//! task and is released when the task finishes, whatever the outcome. The
//! high-score refresh that follows every command is spawned separately and
//! does not hold the gate.

use crate::gate::{Command, CommandGate, InFlightGuard};
use crate::render::Reconciler;
use crate::scores::HighScoreSyncer;
use crate::transport::{GameTransport, TransportError};
use crate::view::{SharedView, ViewPort, lock_view};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// What a settled command produced.
#[derive(Debug)]
pub struct CommandOutcome {
    /// Transport result; on error nothing was rendered.
    pub result: Result<(), TransportError>,
    /// The high-score refresh spawned after the command settled.
    pub refresh: JoinHandle<Result<(), TransportError>>,
}

/// Serializes board-mutating commands and applies their snapshots.
pub struct MoveOrchestrator<T: ?Sized, V> {
    gate: CommandGate,
    transport: Arc<T>,
    view: SharedView<V>,
    reconciler: Reconciler,
    scores: HighScoreSyncer<T, V>,
}

impl<T: ?Sized, V> Clone for MoveOrchestrator<T, V> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            transport: Arc::clone(&self.transport),
            view: Arc::clone(&self.view),
            reconciler: self.reconciler.clone(),
            scores: self.scores.clone(),
        }
    }
}

impl<T, V> MoveOrchestrator<T, V>
where
    T: GameTransport + ?Sized + 'static,
    V: ViewPort + 'static,
{
    /// Creates an orchestrator with its own idle gate.
    pub fn new(transport: Arc<T>, view: SharedView<V>, reconciler: Reconciler) -> Self {
        let scores = HighScoreSyncer::new(Arc::clone(&transport), Arc::clone(&view));
        Self {
            gate: CommandGate::new(),
            transport,
            view,
            reconciler,
            scores,
        }
    }

    /// The gate guarding this orchestrator.
    pub fn gate(&self) -> &CommandGate {
        &self.gate
    }

    /// The shared view commands render into.
    pub fn view(&self) -> &SharedView<V> {
        &self.view
    }

    /// The reconciler used for snapshots.
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// The high-score syncer.
    pub fn scores(&self) -> &HighScoreSyncer<T, V> {
        &self.scores
    }

    /// The transport commands are sent through.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Submits a command.
    ///
    /// Returns `None` and does nothing when another command is in flight.
    /// Otherwise spawns the command and returns its handle. Must be called
    /// inside a tokio runtime.
    #[instrument(skip(self))]
    pub fn submit(&self, command: Command) -> Option<JoinHandle<CommandOutcome>> {
        let Some(guard) = self.gate.try_acquire() else {
            debug!("Command dropped, another is in flight");
            return None;
        };
        let this = self.clone();
        Some(tokio::spawn(async move { this.execute(command, guard).await }))
    }

    async fn execute(&self, command: Command, _guard: InFlightGuard) -> CommandOutcome {
        info!(?command, "Executing command");
        let result = match command {
            Command::Move(direction) => self.transport.move_tiles(direction).await,
            Command::Reset => self.transport.reset().await,
        };

        let result = match result {
            Ok(snapshot) => {
                self.reconciler.render(&mut *lock_view(&self.view), &snapshot);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, ?command, "Command failed, keeping last snapshot");
                Err(e)
            }
        };

        let scores = self.scores.clone();
        let refresh = tokio::spawn(async move { scores.refresh().await });
        CommandOutcome { result, refresh }
    }
}
