//! PIN values and the keypad input buffer

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::PingateError;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// A complete PIN of exactly [`PIN_LENGTH`] decimal digits
///
/// The digits are wiped from memory when the value is dropped and never
/// appear in `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    /// Parse a PIN from a string of digits
    pub fn new(digits: &str) -> Result<Self, PingateError> {
        if digits.len() != PIN_LENGTH || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PingateError::InvalidPin(PIN_LENGTH));
        }
        Ok(Self(digits.to_owned()))
    }

    /// The digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl TryFrom<String> for Pin {
    type Error = PingateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pin::new(&value)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.as_str().to_owned()
    }
}

/// Digits typed so far, at most [`PIN_LENGTH`] of them
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct InputBuffer {
    digits: Vec<u8>,
}

impl InputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            digits: Vec::with_capacity(PIN_LENGTH),
        }
    }

    /// Append a digit. Returns `false` when the buffer is already full.
    pub fn push(&mut self, digit: u8) -> bool {
        if self.digits.len() >= PIN_LENGTH {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Remove the last digit. Returns `false` when the buffer is empty.
    pub fn pop(&mut self) -> bool {
        match self.digits.pop() {
            Some(mut digit) => {
                digit.zeroize();
                true
            }
            None => false,
        }
    }

    /// Wipe all digits
    pub fn clear(&mut self) {
        self.digits.zeroize();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() == PIN_LENGTH
    }

    /// The buffered digits as a PIN, once the buffer is full
    pub fn to_pin(&self) -> Option<Pin> {
        if !self.is_full() {
            return None;
        }
        let digits: String = self
            .digits
            .iter()
            .map(|d| char::from(b'0' + d))
            .collect();
        Some(Pin(digits))
    }
}

impl fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBuffer")
            .field("len", &self.digits.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_validation() {
        assert!(Pin::new("1234").is_ok());
        assert!(Pin::new("0000").is_ok());

        // Wrong length
        assert!(Pin::new("123").is_err());
        assert!(Pin::new("12345").is_err());

        // Non-digits
        assert!(Pin::new("12a4").is_err());
        assert!(Pin::new("١٢٣٤").is_err());
    }

    #[test]
    fn test_pin_debug_is_redacted() {
        let pin = Pin::new("4821").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
    }

    #[test]
    fn test_pin_serde() {
        let pin = Pin::new("9071").unwrap();
        let json = serde_json::to_string(&pin).unwrap();
        assert_eq!(json, "\"9071\"");

        assert!(serde_json::from_str::<Pin>("\"90\"").is_err());
    }

    #[test]
    fn test_buffer_caps_at_pin_length() {
        let mut buffer = InputBuffer::new();
        for d in [1, 2, 3, 4] {
            assert!(buffer.push(d));
        }
        assert!(!buffer.push(5));
        assert_eq!(buffer.len(), PIN_LENGTH);
        assert_eq!(buffer.to_pin().unwrap().as_str(), "1234");
    }

    #[test]
    fn test_buffer_pop_and_clear() {
        let mut buffer = InputBuffer::new();
        assert!(!buffer.pop());

        buffer.push(7);
        buffer.push(8);
        assert!(buffer.pop());
        assert_eq!(buffer.len(), 1);
        assert!(buffer.to_pin().is_none());

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
