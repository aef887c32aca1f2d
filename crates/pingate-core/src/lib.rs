//! Pingate core library
//!
//! This crate implements a 4-digit PIN gate: first-time setup with
//! confirmation, authentication with a durable retry counter, a lockout that
//! requires wiping stored credentials, and an optional biometric shortcut.
//!
//! # Components
//!
//! - **Controller**: [`PinController`], the keypad-driven state machine
//! - **Storage**: [`CredentialStore`] and [`KeyValueStore`] contracts with
//!   file-backed and in-memory implementations
//! - **Retry counter**: [`RetryCounter`], persisted on every change
//! - **Lockout**: [`LockoutPolicy`] threshold and pre-lockout warning
//! - **Biometrics**: [`BiometricScanner`] with an explicit
//!   [`BiometricOutcome`]

pub mod biometric;
pub mod buffer;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod lockout;
pub mod retry;
pub mod store;

pub use biometric::{BiometricOutcome, BiometricScanner, NoBiometrics, ScriptedBiometrics};
pub use buffer::{InputBuffer, Pin, PIN_LENGTH};
pub use config::{ConfigError, PingateConfig};
pub use controller::{ConfigurePhase, Evaluation, KeyOutcome, PinController, PinMode};
pub use error::{PingateError, Result};
pub use events::{EventReceiver, EventSender, Notice, PinEvent};
pub use lockout::{LockoutPolicy, LockoutStatus, DEFAULT_MAX_TRIES};
pub use retry::{RetryCounter, RETRY_COUNT_KEY};
pub use store::{
    CredentialStore, FileCredentialStore, FileKeyValueStore, KeyValueStore,
    MemoryCredentialStore, MemoryKeyValueStore,
};
