//! Pingate TUI library
//!
//! Terminal keypad front end for the Pingate PIN gate.

pub mod app;
pub mod ui;

pub use app::{App, SessionOutcome};
