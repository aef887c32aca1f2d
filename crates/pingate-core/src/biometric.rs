//! Biometric shortcut for Authenticate mode
//!
//! A scanner failure is not an error: the user simply falls back to the
//! keypad, so the outcome is a plain value rather than a `Result`.

use async_trait::async_trait;

/// Result of a single biometric check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiometricOutcome {
    /// Identity confirmed
    Success,
    /// Scan rejected, cancelled or errored
    Failure,
    /// No sensor or nothing enrolled
    Unavailable,
}

/// Platform biometric sensor
#[async_trait]
pub trait BiometricScanner: Send + Sync {
    /// Whether a sensor is present and enrolled
    async fn is_available(&self) -> bool;

    /// Run one scan showing `prompt` to the user
    async fn authenticate(&self, prompt: &str) -> BiometricOutcome;
}

/// Scanner for devices without biometrics
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBiometrics;

#[async_trait]
impl BiometricScanner for NoBiometrics {
    async fn is_available(&self) -> bool {
        false
    }

    async fn authenticate(&self, _prompt: &str) -> BiometricOutcome {
        BiometricOutcome::Unavailable
    }
}

/// Scanner that always returns a preset outcome
#[derive(Clone, Copy, Debug)]
pub struct ScriptedBiometrics {
    outcome: BiometricOutcome,
}

impl ScriptedBiometrics {
    pub fn new(outcome: BiometricOutcome) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl BiometricScanner for ScriptedBiometrics {
    async fn is_available(&self) -> bool {
        self.outcome != BiometricOutcome::Unavailable
    }

    async fn authenticate(&self, _prompt: &str) -> BiometricOutcome {
        self.outcome
    }
}
