//! Terminal front end: the screen model, its drawing and the event loop.

mod screen;
mod ui;

pub use screen::{BoardPanel, ScreenState};
pub use ui::draw;

use crate::audio::{AudioCue, Muted, TerminalBell};
use crate::bootstrap::{BoardSource, bootstrap};
use crate::config::ClientConfig;
use crate::gate::Command;
use crate::input::{InputFlow, InputNormalizer};
use crate::orchestrator::MoveOrchestrator;
use crate::render::Reconciler;
use crate::transport::{GameTransport, HttpTransport};
use crate::view::{SharedView, lock_view, shared};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Runs the interactive client until the player quits.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Log to a file so output does not tear the terminal UI.
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting slide client");

    let transport: Arc<dyn GameTransport> = Arc::new(HttpTransport::new(
        config.server_url(),
        config.request_timeout(),
    )?);
    let audio: Arc<dyn AudioCue> = if *config.audio() {
        Arc::new(TerminalBell)
    } else {
        Arc::new(Muted)
    };
    let view = shared(ScreenState::new());
    let orchestrator = MoveOrchestrator::new(transport, Arc::clone(&view), Reconciler::new(audio));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let source = match config.initial_board() {
        Some(json) => BoardSource::Explicit(json.clone()),
        None => BoardSource::IndexPage,
    };
    let input = match bootstrap(&orchestrator, &source, config.wheel_window()).await {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Running without input wiring");
            InputNormalizer::new(config.wheel_window(), Arc::new(|_: Command| {}))
        }
    };

    let res = run_event_loop(&mut terminal, &view, input).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Event loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Draws the shared screen and feeds terminal events to the normalizer.
#[instrument(skip_all)]
async fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    view: &SharedView<ScreenState>,
    mut input: InputNormalizer,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        let screen = lock_view(view).clone();
        terminal.draw(|f| draw(f, &screen))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            if input.handle(&event) == InputFlow::Quit {
                info!("User quit");
                return Ok(());
            }
        }

        // Let command and debounce tasks make progress between polls.
        tokio::task::yield_now().await;
    }
}
