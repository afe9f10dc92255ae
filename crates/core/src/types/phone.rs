//! Phone number type.
//!
//! The storefront ships domestically, so the accepted format is the
//! Algerian mobile numbering plan: a `0` or `+213` prefix, a carrier
//! digit in 5-7, then eight digits.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number does not start with `0` or `+213`.
    #[error("phone number must start with 0 or +213")]
    InvalidPrefix,
    /// The carrier digit (first after the prefix) is not 5, 6, or 7.
    #[error("phone number must have a carrier digit of 5, 6, or 7")]
    InvalidCarrierDigit,
    /// The subscriber part is not exactly eight digits.
    #[error("phone number must have eight digits after the carrier digit")]
    InvalidSubscriberDigits,
}

/// A validated mobile phone number (e.g., `0555123456` or `+213555123456`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, has an unrecognized prefix,
    /// an invalid carrier digit, or the wrong number of subscriber digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let rest = trimmed
            .strip_prefix("+213")
            .or_else(|| trimmed.strip_prefix('0'))
            .ok_or(PhoneError::InvalidPrefix)?;

        let mut digits = rest.chars();
        match digits.next() {
            Some('5'..='7') => {}
            _ => return Err(PhoneError::InvalidCarrierDigit),
        }

        let subscriber: Vec<char> = digits.collect();
        if subscriber.len() != 8 || !subscriber.iter().all(char::is_ascii_digit) {
            return Err(PhoneError::InvalidSubscriberDigits);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
