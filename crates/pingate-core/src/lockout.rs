//! Lockout policy for failed PIN attempts
//!
//! Failed attempts only count in Authenticate mode. The policy has two
//! stages:
//!
//! - `max_tries - 1` failures: warning shown, entry still allowed
//! - `max_tries` or more failures: entry blocked, the user must wipe the
//!   stored credentials to continue

/// Default number of failed attempts before lockout
pub const DEFAULT_MAX_TRIES: u32 = 10;

/// Where a retry count sits relative to the lockout threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutStatus {
    /// No warning
    Clear,
    /// One more failure triggers the lockout
    Warning { remaining: u32 },
    /// Threshold reached
    Locked,
}

/// Lockout policy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Failed attempts that trigger the lockout
    pub max_tries: u32,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl LockoutPolicy {
    /// Create a policy with a custom threshold (at least 1)
    pub fn with_max_tries(max_tries: u32) -> Self {
        Self {
            max_tries: max_tries.max(1),
        }
    }

    /// Check if the given retry count locks the gate
    pub fn is_locked(&self, retry_count: u32) -> bool {
        retry_count >= self.max_tries
    }

    /// Attempts left before lockout
    pub fn attempts_remaining(&self, retry_count: u32) -> u32 {
        self.max_tries.saturating_sub(retry_count)
    }

    /// Classify a retry count
    pub fn status(&self, retry_count: u32) -> LockoutStatus {
        match self.attempts_remaining(retry_count) {
            0 => LockoutStatus::Locked,
            1 => LockoutStatus::Warning { remaining: 1 },
            _ => LockoutStatus::Clear,
        }
    }

    /// Get a human-readable description of the status
    pub fn describe(&self, retry_count: u32) -> Option<String> {
        match self.status(retry_count) {
            LockoutStatus::Clear => None,
            LockoutStatus::Warning { remaining } => Some(format!(
                "{} attempt remaining before all credentials are erased",
                remaining
            )),
            LockoutStatus::Locked => Some(format!(
                "Too many failed attempts ({}). Reset required.",
                retry_count
            )),
        }
    }
}
