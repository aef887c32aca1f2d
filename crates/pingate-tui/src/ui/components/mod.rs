//! Reusable UI components

pub mod keypad;
pub mod notification;

pub use keypad::{Keypad, KeypadButton};
pub use notification::{Notification, NotificationLevel};
