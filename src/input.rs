//! Input normalization: keyboard, wheel and touch-style drags become
//! [`Command`]s.
//!
//! Wheel input is debounced with a trailing quiet window; drags are not, so a
//! single drag can emit several moves.

use crate::direction::Direction;
use crate::gate::Command;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Default trailing quiet window for wheel input.
pub const WHEEL_DEBOUNCE: Duration = Duration::from_millis(300);

/// Callback that forwards a normalized command to the pipeline.
pub type Dispatch = Arc<dyn Fn(Command) + Send + Sync>;

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFlow {
    /// Keep polling.
    Continue,
    /// The player asked to leave.
    Quit,
}

/// Maps an arrow key to a direction; other keys map to nothing.
pub fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Converts a scroll event into a one-notch `(dx, dy)` wheel delta.
pub fn wheel_delta(kind: MouseEventKind) -> Option<(f64, f64)> {
    match kind {
        MouseEventKind::ScrollUp => Some((0.0, -1.0)),
        MouseEventKind::ScrollDown => Some((0.0, 1.0)),
        MouseEventKind::ScrollLeft => Some((-1.0, 0.0)),
        MouseEventKind::ScrollRight => Some((1.0, 0.0)),
        _ => None,
    }
}

/// Remembers where a touch started and classifies later positions against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    start: Option<(f64, f64)>,
}

impl TouchTracker {
    /// Records a touch-start point, replacing any earlier one.
    pub fn start(&mut self, x: f64, y: f64) {
        trace!(x, y, "Touch start");
        self.start = Some((x, y));
    }

    /// Classifies the displacement from the start point.
    ///
    /// Returns `None` when no start has been recorded.
    pub fn moved(&self, x: f64, y: f64) -> Option<Direction> {
        let (start_x, start_y) = self.start?;
        Some(Direction::classify(x - start_x, y - start_y))
    }
}

/// Trailing-edge debouncer for wheel input.
///
/// Each event restarts the quiet window; only the last classified direction
/// of a burst is dispatched once the window elapses. Must be used inside a
/// tokio runtime.
pub struct WheelDebouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    dispatch: Dispatch,
}

impl std::fmt::Debug for WheelDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelDebouncer")
            .field("window", &self.window)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl WheelDebouncer {
    /// Creates a debouncer forwarding to `dispatch`.
    pub fn new(window: Duration, dispatch: Dispatch) -> Self {
        Self {
            window,
            pending: None,
            dispatch,
        }
    }

    /// Feeds one wheel delta.
    #[instrument(level = "trace", skip(self))]
    pub fn push(&mut self, dx: f64, dy: f64) {
        let direction = Direction::classify(dx, dy);
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        let dispatch = Arc::clone(&self.dispatch);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            debug!(direction = %direction, "Wheel burst settled");
            dispatch(Command::Move(direction));
        }));
    }
}

impl Drop for WheelDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Turns terminal events into commands.
pub struct InputNormalizer {
    touch: TouchTracker,
    wheel: WheelDebouncer,
    dispatch: Dispatch,
}

impl std::fmt::Debug for InputNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputNormalizer")
            .field("touch", &self.touch)
            .field("wheel", &self.wheel)
            .finish_non_exhaustive()
    }
}

impl InputNormalizer {
    /// Creates a normalizer whose wheel input settles after `wheel_window`.
    pub fn new(wheel_window: Duration, dispatch: Dispatch) -> Self {
        Self {
            touch: TouchTracker::default(),
            wheel: WheelDebouncer::new(wheel_window, Arc::clone(&dispatch)),
            dispatch,
        }
    }

    /// Handles one terminal event.
    pub fn handle(&mut self, event: &Event) -> InputFlow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                InputFlow::Continue
            }
            _ => InputFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> InputFlow {
        // crossterm fires both press and release on some platforms.
        if key.kind == KeyEventKind::Release {
            return InputFlow::Continue;
        }
        if let Some(direction) = key_direction(key.code) {
            debug!(direction = %direction, "Arrow key");
            (self.dispatch)(Command::Move(direction));
            return InputFlow::Continue;
        }
        match key.code {
            KeyCode::Char('r') => {
                debug!("Reset requested");
                (self.dispatch)(Command::Reset);
                InputFlow::Continue
            }
            KeyCode::Char('q') | KeyCode::Esc => InputFlow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputFlow::Quit,
            _ => InputFlow::Continue,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let (x, y) = (f64::from(mouse.column), f64::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.touch.start(x, y),
            MouseEventKind::Drag(MouseButton::Left) => match self.touch.moved(x, y) {
                Some(direction) => {
                    debug!(direction = %direction, "Drag");
                    (self.dispatch)(Command::Move(direction));
                }
                None => trace!("Drag without touch start ignored"),
            },
            kind => {
                if let Some((dx, dy)) = wheel_delta(kind) {
                    self.wheel.push(dx, dy);
                }
            }
        }
    }
}
