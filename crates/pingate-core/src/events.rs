//! Events emitted by the controller to its caller

use tokio::sync::mpsc;

/// Transient messages the caller shows as toasts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// New PIN confirmed and saved
    PinSaved,
    /// Confirmation did not match the first entry
    PinMismatch,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::PinSaved => "PIN saved",
            Notice::PinMismatch => "PINs do not match, try again",
        }
    }
}

/// Controller output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinEvent {
    /// Final authenticate or confirm outcome
    Result { matched: bool },
    /// User dismissed the screen
    Cancelled,
    /// Toast
    Notice(Notice),
    /// Credentials were wiped, the application must restart
    RestartRequested,
}

/// Sending half held by the controller
pub type EventSender = mpsc::UnboundedSender<PinEvent>;

/// Receiving half held by the caller
pub type EventReceiver = mpsc::UnboundedReceiver<PinEvent>;

/// Create a connected sender/receiver pair
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Drain every event currently queued
pub fn drain(receiver: &mut EventReceiver) -> Vec<PinEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
