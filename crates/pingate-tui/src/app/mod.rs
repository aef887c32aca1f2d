//! Application state and event handling

mod keys;

pub use keys::{map_key, Action};

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use pingate_core::{events, EventReceiver, PinController, PinEvent, PinMode, PingateError};
use ratatui::prelude::*;

use crate::ui::{self, components::keypad, Notification, Theme};

/// Tick rate for toast expiry
const TICK_RATE: Duration = Duration::from_millis(100);

/// How a keypad session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Correct PIN or biometric match
    Authenticated,
    /// New PIN saved
    Configured,
    /// User closed the keypad
    Cancelled,
    /// Credentials were wiped; start a fresh session
    RestartRequired,
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Authenticated | SessionOutcome::Configured)
    }
}

/// Main application struct
pub struct App {
    /// PIN state machine
    pub controller: PinController,

    /// Controller output
    events: EventReceiver,

    /// Color palette
    pub theme: Theme,

    /// Highlighted keypad cell (row, col)
    pub selected: (usize, usize),

    /// Active toast
    pub notification: Option<Notification>,

    /// Last failure to show under the PIN dots
    pub error_message: Option<String>,

    /// A PIN was saved during this session (Reset mode stays open after)
    configured: bool,

    /// Set once the session is over
    pub outcome: Option<SessionOutcome>,

    /// Tick counter
    pub tick: u64,
}

impl App {
    /// Create a new application instance
    pub fn new(controller: PinController, events: EventReceiver) -> Self {
        Self {
            controller,
            events,
            theme: Theme::default(),
            selected: (1, 1),
            notification: None,
            error_message: None,
            configured: false,
            outcome: None,
            tick: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.outcome.is_some()
    }

    /// Mount the controller (loads the retry count, tries biometrics)
    pub async fn start(&mut self) {
        let result = self.controller.mount().await;
        self.report(result);
        self.process_events();
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<SessionOutcome> {
        let mut reader = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        while !self.should_quit() {
            terminal.draw(|frame| ui::render(frame, self))?;

            tokio::select! {
                _ = ticker.tick() => self.on_tick(),
                maybe_event = reader.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code).await;
                    }
                    Some(Ok(Event::FocusGained)) => {
                        let result = self.controller.focus().await;
                        self.report(result);
                    }
                    Some(Ok(Event::FocusLost)) => self.controller.blur(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }

        Ok(self.outcome.unwrap_or(SessionOutcome::Cancelled))
    }

    /// Advance toast timers
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(toast) = &mut self.notification {
            toast.tick();
            if toast.is_expired() {
                self.notification = None;
            }
        }
    }

    /// Handle key press events
    pub async fn handle_key(&mut self, key: KeyCode) {
        if let Some(action) = map_key(key, self.controller.is_lockout_visible()) {
            self.apply(action).await;
        }
    }

    /// Perform an action against the controller
    pub async fn apply(&mut self, action: Action) {
        let action = match action {
            Action::Activate => match self.current_buttons()[self.selected.0][self.selected.1] {
                keypad::KeypadButton::Digit(d) => Action::Digit(d),
                keypad::KeypadButton::Delete => Action::Delete,
                keypad::KeypadButton::Disabled => return,
            },
            other => other,
        };

        match action {
            Action::Digit(d) => {
                self.error_message = None;
                let result = self.controller.press_digit(d).await;
                self.report(result);
            }
            Action::Delete => {
                self.controller.delete_digit();
            }
            Action::Move { rows, cols } => self.move_selection(rows, cols),
            Action::Activate => {}
            Action::Cancel => {
                let result = self.controller.cancel().await;
                self.report(result);
            }
            Action::ConfirmReset => {
                let result = self.controller.confirm_lockout_reset().await;
                self.report(result);
            }
            Action::DeferReset => self.controller.defer_lockout_reset(),
        }
        self.process_events();
    }

    /// Keypad grid for the current controller state
    pub fn current_buttons(&self) -> [[keypad::KeypadButton; keypad::KEYPAD_COLS]; keypad::KEYPAD_ROWS] {
        keypad::layout(self.controller.accepts_input(), self.controller.input_len())
    }

    fn move_selection(&mut self, rows: i8, cols: i8) {
        let step = |value: usize, delta: i8, len: usize| -> usize {
            let next = value as isize + delta as isize;
            next.clamp(0, len as isize - 1) as usize
        };
        self.selected = (
            step(self.selected.0, rows, keypad::KEYPAD_ROWS),
            step(self.selected.1, cols, keypad::KEYPAD_COLS),
        );
    }

    fn report<T>(&mut self, result: Result<T, PingateError>) {
        if let Err(e) = result {
            tracing::error!("PIN operation failed: {}", e);
            self.error_message = Some(e.to_string());
        }
    }

    /// Act on everything the controller emitted
    fn process_events(&mut self) {
        for event in events::drain(&mut self.events) {
            match event {
                PinEvent::Result { matched: true } => match self.controller.mode() {
                    PinMode::Authenticate => self.finish(SessionOutcome::Authenticated),
                    PinMode::Set => self.finish(SessionOutcome::Configured),
                    PinMode::Reset => self.configured = true,
                },
                PinEvent::Result { matched: false } => {
                    self.error_message = Some("Incorrect PIN".to_string());
                }
                PinEvent::Notice(notice) => {
                    self.notification = Some(Notification::from(notice));
                }
                PinEvent::Cancelled => {
                    let outcome = if self.configured {
                        SessionOutcome::Configured
                    } else {
                        SessionOutcome::Cancelled
                    };
                    self.finish(outcome);
                }
                PinEvent::RestartRequested => self.finish(SessionOutcome::RestartRequired),
            }
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        tracing::info!(?outcome, "Session finished");
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }
}
