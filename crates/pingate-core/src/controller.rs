//! PIN controller state machine
//!
//! The controller owns the keypad buffer, the setup phase and the retry
//! counter. Everything else goes through collaborators: PINs live in a
//! [`CredentialStore`], the counter in a [`KeyValueStore`], biometrics in a
//! [`BiometricScanner`]. Outcomes are reported to the caller as
//! [`PinEvent`]s; the controller never navigates on its own.
//!
//! # Setup flow (Set and Reset modes)
//!
//! ```text
//! Input --(4 digits staged)--> Confirm --(match)--> Done
//!   ^                             |
//!   +--------(mismatch)-----------+
//! ```
//!
//! `Done` is terminal in Set mode. In Reset mode the screen stays open and
//! the next key press starts a fresh Set flow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::biometric::{BiometricOutcome, BiometricScanner};
use crate::buffer::{InputBuffer, Pin};
use crate::config::PingateConfig;
use crate::error::{PingateError, Result};
use crate::events::{EventSender, Notice, PinEvent};
use crate::lockout::{LockoutPolicy, LockoutStatus};
use crate::retry::RetryCounter;
use crate::store::{CredentialStore, KeyValueStore};

/// Which flow the screen runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// First-time setup
    Set,
    /// Check the entered PIN against the stored one
    Authenticate,
    /// Forced setup of a replacement PIN
    Reset,
}

impl PinMode {
    /// Whether this mode runs the two-step setup flow
    pub fn is_configure(&self) -> bool {
        matches!(self, PinMode::Set | PinMode::Reset)
    }
}

/// Sub-state of Set and Reset modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConfigurePhase {
    /// Entering the new PIN
    #[default]
    Input,
    /// Re-entering it
    Confirm,
    /// PIN saved
    Done,
}

/// Whether key presses are accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputGate {
    Open,
    /// A full buffer is being evaluated
    Evaluating,
}

/// What an evaluation of a full buffer did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Entered PIN matched (or no PIN was set and pass-through is enabled)
    Authenticated,
    /// Entered PIN did not match
    Rejected { retry_count: u32 },
    /// First setup entry staged, waiting for confirmation
    Staged,
    /// Confirmation matched, PIN saved
    Configured,
    /// Confirmation differed, back to first entry
    ConfirmMismatch,
}

/// Result of a digit key press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Ignored: buffer full, lockout, evaluation pending or flow finished
    Rejected,
    /// Digit appended
    Accepted,
    /// Digit completed the PIN and it was evaluated
    Evaluated(Evaluation),
}

/// PIN entry controller
pub struct PinController {
    mode: PinMode,
    buffer: InputBuffer,
    phase: ConfigurePhase,
    gate: InputGate,
    lockout_visible: bool,
    retry: RetryCounter<Arc<dyn KeyValueStore>>,
    policy: LockoutPolicy,
    unset_pin_passes: bool,
    biometric_prompt: String,
    credentials: Arc<dyn CredentialStore>,
    biometrics: Arc<dyn BiometricScanner>,
    events: EventSender,
}

impl PinController {
    /// Create a controller with default settings
    pub fn new(
        mode: PinMode,
        credentials: Arc<dyn CredentialStore>,
        key_values: Arc<dyn KeyValueStore>,
        biometrics: Arc<dyn BiometricScanner>,
        events: EventSender,
    ) -> Self {
        let defaults = PingateConfig::default();
        Self {
            mode,
            buffer: InputBuffer::new(),
            phase: ConfigurePhase::Input,
            gate: InputGate::Open,
            lockout_visible: false,
            retry: RetryCounter::new(key_values),
            policy: defaults.lockout_policy(),
            unset_pin_passes: defaults.unset_pin_passes,
            biometric_prompt: defaults.biometric_prompt,
            credentials,
            biometrics,
            events,
        }
    }

    /// Apply threshold, pass-through flag and prompt from a config
    pub fn with_config(mut self, config: &PingateConfig) -> Self {
        self.policy = config.lockout_policy();
        self.unset_pin_passes = config.unset_pin_passes;
        self.biometric_prompt = config.biometric_prompt.clone();
        self
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn phase(&self) -> ConfigurePhase {
        self.phase
    }

    /// Digits currently entered
    pub fn input_len(&self) -> usize {
        self.buffer.len()
    }

    /// Last loaded or written retry count
    pub fn retry_count(&self) -> u32 {
        self.retry.count()
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn is_lockout_visible(&self) -> bool {
        self.lockout_visible
    }

    /// Whether an evaluation was started and has not finished
    ///
    /// Stays true if an evaluation future is dropped before completing;
    /// calling [`evaluate`](Self::evaluate) again finishes it.
    pub fn is_evaluating(&self) -> bool {
        self.gate == InputGate::Evaluating
    }

    /// Lockout classification of the current retry count
    pub fn lockout_status(&self) -> LockoutStatus {
        if self.mode != PinMode::Authenticate {
            return LockoutStatus::Clear;
        }
        self.policy.status(self.retry.count())
    }

    /// Whether digit keys currently do anything
    pub fn accepts_input(&self) -> bool {
        if self.gate == InputGate::Evaluating {
            return false;
        }
        match self.mode {
            PinMode::Authenticate => !self.policy.is_locked(self.retry.count()),
            PinMode::Set => self.phase != ConfigurePhase::Done,
            PinMode::Reset => true,
        }
    }

    /// Append a digit, evaluating once the PIN is complete
    pub async fn press_digit(&mut self, digit: u8) -> Result<KeyOutcome> {
        if digit > 9 {
            return Err(PingateError::InvalidDigit(digit));
        }
        if !self.accepts_input() {
            debug!(mode = ?self.mode, "Digit rejected");
            return Ok(KeyOutcome::Rejected);
        }
        if self.mode == PinMode::Reset && self.phase == ConfigurePhase::Done {
            debug!("Re-entering setup after reset");
            self.phase = ConfigurePhase::Input;
        }
        if !self.buffer.push(digit) {
            return Ok(KeyOutcome::Rejected);
        }
        if !self.buffer.is_full() {
            return Ok(KeyOutcome::Accepted);
        }

        match self.evaluate().await? {
            Some(evaluation) => Ok(KeyOutcome::Evaluated(evaluation)),
            None => Ok(KeyOutcome::Accepted),
        }
    }

    /// Remove the last digit. Returns `false` if nothing was removed.
    pub fn delete_digit(&mut self) -> bool {
        if self.gate == InputGate::Evaluating {
            return false;
        }
        self.buffer.pop()
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Evaluate a full buffer
    ///
    /// Returns `None` without side effects unless exactly four digits are
    /// buffered. The buffer is cleared afterwards on every path, including
    /// storage errors, so the same entry is never counted twice.
    pub async fn evaluate(&mut self) -> Result<Option<Evaluation>> {
        let Some(pin) = self.buffer.to_pin() else {
            return Ok(None);
        };

        self.gate = InputGate::Evaluating;
        let result = if self.mode.is_configure() {
            self.evaluate_configure(&pin).await
        } else {
            self.evaluate_authenticate(&pin).await
        };
        self.buffer.clear();
        self.gate = InputGate::Open;

        result.map(Some)
    }

    async fn evaluate_authenticate(&mut self, pin: &Pin) -> Result<Evaluation> {
        let matched = match self.credentials.pin().await? {
            Some(stored) => stored == *pin,
            None if self.unset_pin_passes => {
                debug!("No PIN configured, passing through");
                true
            }
            None => false,
        };

        if matched {
            self.reset_retry_count().await?;
            self.emit(PinEvent::Result { matched: true });
            return Ok(Evaluation::Authenticated);
        }

        let retry_count = self.retry.increment().await?;
        warn!(
            retry_count,
            max_tries = self.policy.max_tries,
            "Incorrect PIN"
        );
        self.refresh_lockout();
        self.emit(PinEvent::Result { matched: false });
        Ok(Evaluation::Rejected { retry_count })
    }

    async fn evaluate_configure(&mut self, pin: &Pin) -> Result<Evaluation> {
        match self.credentials.new_pin().await? {
            None => {
                self.credentials.save_new_pin(pin).await?;
                self.phase = ConfigurePhase::Confirm;
                debug!("New PIN staged, awaiting confirmation");
                Ok(Evaluation::Staged)
            }
            Some(staged) if staged == *pin => {
                self.credentials.save_pin(pin).await?;
                self.credentials.reset_new_pin().await?;
                info!(mode = ?self.mode, "PIN saved");
                self.emit(PinEvent::Notice(Notice::PinSaved));
                self.reset_retry_count().await?;
                self.emit(PinEvent::Result { matched: true });
                self.phase = ConfigurePhase::Done;
                Ok(Evaluation::Configured)
            }
            Some(_) => {
                self.credentials.reset_new_pin().await?;
                self.phase = ConfigurePhase::Input;
                debug!("PIN confirmation mismatch");
                self.emit(PinEvent::Notice(Notice::PinMismatch));
                Ok(Evaluation::ConfirmMismatch)
            }
        }
    }

    /// Read the persisted retry count and recompute lockout visibility
    pub async fn load_retry_count(&mut self) -> Result<u32> {
        let count = self.retry.load().await?;
        self.refresh_lockout();
        Ok(count)
    }

    /// Write 0 and hide the lockout prompt
    pub async fn reset_retry_count(&mut self) -> Result<()> {
        self.retry.reset().await?;
        self.lockout_visible = false;
        Ok(())
    }

    fn refresh_lockout(&mut self) {
        self.lockout_visible =
            self.mode == PinMode::Authenticate && self.policy.is_locked(self.retry.count());
    }

    /// Screen mounted: load the counter, drop stale setup state and try
    /// biometrics in Authenticate mode
    ///
    /// A staged PIN never outlives the session that staged it, so every
    /// setup flow starts with a first entry rather than a confirmation.
    pub async fn mount(&mut self) -> Result<Option<BiometricOutcome>> {
        self.load_retry_count().await?;
        self.credentials.reset_new_pin().await?;
        self.phase = ConfigurePhase::Input;
        if self.mode != PinMode::Authenticate {
            return Ok(None);
        }
        Ok(self.try_biometric().await)
    }

    /// Attempt the biometric shortcut
    ///
    /// Returns `None` when not attempted (wrong mode or locked out).
    /// Failures are logged and otherwise ignored; the keypad stays usable.
    pub async fn try_biometric(&mut self) -> Option<BiometricOutcome> {
        if self.mode != PinMode::Authenticate || self.policy.is_locked(self.retry.count()) {
            return None;
        }
        if !self.biometrics.is_available().await {
            debug!("Biometrics unavailable");
            return Some(BiometricOutcome::Unavailable);
        }

        let outcome = self.biometrics.authenticate(&self.biometric_prompt).await;
        match outcome {
            BiometricOutcome::Success => {
                info!("Biometric authentication succeeded");
                self.emit(PinEvent::Result { matched: true });
            }
            BiometricOutcome::Failure => {
                debug!("Biometric authentication failed, falling back to keypad");
            }
            BiometricOutcome::Unavailable => {
                debug!("Biometric sensor went away, falling back to keypad");
            }
        }
        Some(outcome)
    }

    /// Screen gained focus
    pub async fn focus(&mut self) -> Result<()> {
        self.load_retry_count().await?;
        Ok(())
    }

    /// Screen lost focus or unmounted
    pub fn blur(&mut self) {
        self.lockout_visible = false;
    }

    /// User closed the screen
    ///
    /// `Cancelled` is emitted even if dropping the staged PIN fails.
    pub async fn cancel(&mut self) -> Result<()> {
        self.lockout_visible = false;
        self.buffer.clear();
        let result = self.credentials.reset_new_pin().await;
        self.emit(PinEvent::Cancelled);
        result
    }

    /// Lockout prompt: wipe credentials and restart
    pub async fn confirm_lockout_reset(&mut self) -> Result<()> {
        self.credentials.remove_keys().await?;
        self.retry.clear().await?;
        self.lockout_visible = false;
        self.buffer.clear();
        info!("Credentials wiped after lockout");
        self.emit(PinEvent::RestartRequested);
        Ok(())
    }

    /// Lockout prompt: dismiss without changes
    pub fn defer_lockout_reset(&mut self) {
        self.lockout_visible = false;
        self.emit(PinEvent::Cancelled);
    }

    /// External signal that the staged PIN must be discarded
    pub async fn reset_new_pin(&mut self) -> Result<()> {
        self.credentials.reset_new_pin().await?;
        self.buffer.clear();
        if self.mode.is_configure() {
            self.phase = ConfigurePhase::Input;
        }
        Ok(())
    }

    /// Change mode mid-session. Only Reset -> Set is allowed.
    pub async fn switch_mode(&mut self, mode: PinMode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        if !(self.mode == PinMode::Reset && mode == PinMode::Set) {
            return Err(PingateError::InvalidModeSwitch {
                from: self.mode,
                to: mode,
            });
        }
        self.credentials.reset_new_pin().await?;
        self.mode = mode;
        self.buffer.clear();
        self.phase = ConfigurePhase::Input;
        self.lockout_visible = false;
        Ok(())
    }

    fn emit(&self, event: PinEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biometric::NoBiometrics;
    use crate::events;
    use crate::store::{MemoryCredentialStore, MemoryKeyValueStore};

    fn controller(mode: PinMode) -> PinController {
        let (tx, _rx) = events::channel();
        PinController::new(
            mode,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(NoBiometrics),
            tx,
        )
    }

    #[tokio::test]
    async fn test_rejects_non_digit() {
        let mut controller = controller(PinMode::Set);
        assert!(matches!(
            controller.press_digit(10).await,
            Err(PingateError::InvalidDigit(10))
        ));
        assert_eq!(controller.input_len(), 0);
    }

    #[tokio::test]
    async fn test_delete_on_empty_is_noop() {
        let mut controller = controller(PinMode::Authenticate);
        assert!(!controller.delete_digit());

        controller.press_digit(3).await.unwrap();
        assert!(controller.delete_digit());
        assert_eq!(controller.input_len(), 0);
    }

    #[tokio::test]
    async fn test_switch_mode_rules() {
        let mut controller = controller(PinMode::Reset);
        assert!(controller.switch_mode(PinMode::Authenticate).await.is_err());
        assert!(controller.switch_mode(PinMode::Set).await.is_ok());
        assert_eq!(controller.mode(), PinMode::Set);

        // Set cannot go back
        assert!(controller.switch_mode(PinMode::Reset).await.is_err());
    }

    #[test]
    fn test_lockout_status_only_in_authenticate() {
        let controller = controller(PinMode::Set);
        assert_eq!(controller.lockout_status(), LockoutStatus::Clear);
        assert!(controller.accepts_input());
    }
}
