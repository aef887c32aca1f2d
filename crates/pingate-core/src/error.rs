//! Error types for the PIN gate

use thiserror::Error;

use crate::controller::PinMode;

/// Result type alias for PIN gate operations
pub type Result<T> = std::result::Result<T, PingateError>;

/// Errors that can occur while driving the PIN gate
#[derive(Debug, Error)]
pub enum PingateError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Value is not a valid PIN
    #[error("PIN must be exactly {0} digits")]
    InvalidPin(usize),

    /// Keypad produced something other than 0-9
    #[error("Not a decimal digit: {0}")]
    InvalidDigit(u8),

    /// Only Reset may be re-entered as Set
    #[error("Cannot switch PIN mode from {from:?} to {to:?}")]
    InvalidModeSwitch { from: PinMode, to: PinMode },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Backend storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for PingateError {
    fn from(e: serde_json::Error) -> Self {
        PingateError::Serialization(e.to_string())
    }
}
