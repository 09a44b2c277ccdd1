//! Moroccan mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number starts with neither the international prefix nor a trunk zero.
    #[error("phone number must start with +212 or 0")]
    InvalidPrefix,
    /// The first digit after the prefix is not in the mobile operator range.
    #[error("phone number must be a mobile number (6 or 7 after the prefix)")]
    NotMobile,
    /// The subscriber part is not exactly eight digits.
    #[error("phone number must have exactly 8 digits after the operator digit")]
    InvalidSubscriber,
}

/// A Moroccan mobile phone number.
///
/// Accepts the local format with a leading trunk zero (`0612345678`) or the
/// international format with the country code (`+212612345678`). The prefix
/// is followed by a mobile operator digit (`6` or `7`) and an eight-digit
/// subscriber number. Stored verbatim, as entered.
///
/// ## Examples
///
/// ```
/// use oraya_core::Phone;
///
/// assert!(Phone::parse("0612345678").is_ok());
/// assert!(Phone::parse("+212712345678").is_ok());
///
/// assert!(Phone::parse("12345").is_err());        // no prefix
/// assert!(Phone::parse("0512345678").is_err());   // landline range
/// assert!(Phone::parse("061234567").is_err());    // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Length of the subscriber part after the operator digit.
    pub const SUBSCRIBER_DIGITS: usize = 8;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Does not start with `+212` or `0`
    /// - Has an operator digit outside the mobile range (`6`-`7`)
    /// - Does not end with exactly eight further digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let rest = s
            .strip_prefix("+212")
            .or_else(|| s.strip_prefix('0'))
            .ok_or(PhoneError::InvalidPrefix)?;

        let subscriber = rest
            .strip_prefix(['6', '7'])
            .ok_or(PhoneError::NotMobile)?;

        if subscriber.len() != Self::SUBSCRIBER_DIGITS
            || !subscriber.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PhoneError::InvalidSubscriber);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
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
