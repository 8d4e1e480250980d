//! Phone number type.
//!
//! Registration takes a ten-digit national number and stores it with the
//! fixed `+7` country code prepended.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Fewer than ten digits remain after stripping non-digits.
    #[error("phone number must have {expected} digits (got {found})")]
    TooFewDigits {
        /// Number of digits required.
        expected: usize,
        /// Number of digits found.
        found: usize,
    },
}

/// A registered phone number in `+7XXXXXXXXXX` form.
///
/// ## Input rules
///
/// - Every non-digit character is dropped.
/// - If more than ten digits remain and the first one is the national trunk
///   prefix `8` or the country digit `7`, that digit is dropped.
/// - Only the first ten digits are kept; the rest are silently discarded.
///
/// ## Examples
///
/// ```
/// use u_cook_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("8 (999) 123-45-67").unwrap();
/// assert_eq!(phone.as_str(), "+79991234567");
///
/// assert!(PhoneNumber::parse("999123").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Fixed country code prepended to every stored number.
    pub const COUNTRY_CODE: &'static str = "+7";

    /// Number of national digits.
    pub const DIGITS: usize = 10;

    /// Clamp raw keyboard input to at most ten national digits.
    ///
    /// This is applied on every keystroke, so it never fails.
    #[must_use]
    pub fn clamp_input(raw: &str) -> String {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let national = if digits.len() > Self::DIGITS
            && (digits.starts_with('8') || digits.starts_with('7'))
        {
            digits.get(1..).unwrap_or_default()
        } else {
            digits.as_str()
        };
        national.chars().take(Self::DIGITS).collect()
    }

    /// Parse a `PhoneNumber` from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::TooFewDigits`] if fewer than ten digits remain
    /// after clamping.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let national = Self::clamp_input(raw);
        if national.len() < Self::DIGITS {
            return Err(PhoneError::TooFewDigits {
                expected: Self::DIGITS,
                found: national.len(),
            });
        }
        Ok(Self(format!("{}{national}", Self::COUNTRY_CODE)))
    }

    /// Returns the full number, including the country code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the ten national digits.
    #[must_use]
    pub fn national(&self) -> &str {
        self.0.get(Self::COUNTRY_CODE.len()..).unwrap_or_default()
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Keep phone numbers out of logs: only the last two digits are shown.
impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let national = self.national();
        let tail = national.get(national.len().saturating_sub(2)..).unwrap_or("");
        write!(f, "PhoneNumber({}********{tail})", Self::COUNTRY_CODE)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
