use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref TEN_DIGITS: Regex = Regex::new(r"^[0-9]{10}$").expect("valid phone pattern");
}

/// Reasons a raw phone string cannot become a [`Phone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneError {
    /// Nothing but whitespace was given.
    #[error("Phone number is required")]
    Empty,
    /// Something other than ten digits remained after normalization.
    #[error("Please enter a valid 10-digit phone number")]
    InvalidFormat,
}

/// Strips every space and hyphen from `raw`.
///
/// Only `' '` and `'-'` are removed; tabs, dots and parentheses are kept so
/// that they fail the digit check instead of being silently accepted.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// A normalized 10-digit phone number, the primary key of a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Phone(String);

impl Phone {
    /// Normalizes `raw` and checks that exactly ten ASCII digits remain.
    ///
    /// Blank input (after trimming) reports [`PhoneError::Empty`] so forms can
    /// tell a missing value apart from a malformed one.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        if raw.trim().is_empty() {
            return Err(PhoneError::Empty);
        }
        let digits = normalize_phone(raw);
        if TEN_DIGITS.is_match(&digits) {
            Ok(Self(digits))
        } else {
            Err(PhoneError::InvalidFormat)
        }
    }

    /// The ten digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Phone::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn separators_are_stripped() {
        for raw in ["555-123-4567", "555 123 4567", "5551234567", " 555-123 4567 "] {
            assert_eq!(Phone::parse(raw).unwrap().as_str(), "5551234567", "input {raw:?}");
        }
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for raw in ["12345", "abcdefghij", "555-12-3456", "555.123.4567", "(555)1234567"] {
            assert_eq!(Phone::parse(raw), Err(PhoneError::InvalidFormat), "input {raw:?}");
        }
        assert_eq!(Phone::parse("55512345678"), Err(PhoneError::InvalidFormat));
    }

    #[test]
    fn blank_is_reported_separately() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
        // hyphens alone are not blank, they just leave nothing behind
        assert_eq!(Phone::parse("---"), Err(PhoneError::InvalidFormat));
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        // Arabic-Indic digits
        assert_eq!(
            Phone::parse("٠١٢٣٤٥٦٧٨٩"),
            Err(PhoneError::InvalidFormat)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_goes_through_validation() {
        let phone: Phone = serde_json::from_str("\"555 000 1111\"").unwrap();
        assert_eq!(phone.as_str(), "5550001111");
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"5550001111\"");
        assert!(serde_json::from_str::<Phone>("\"12345\"").is_err());
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[0-9 a-z-]{0,20}") {
            let once = normalize_phone(&raw);
            prop_assert_eq!(normalize_phone(&once), once);
        }

        #[test]
        fn any_grouping_of_ten_digits_parses(
            digits in "[0-9]{10}",
            cuts in proptest::collection::vec((1usize..10, prop_oneof![Just(' '), Just('-')]), 0..4),
        ) {
            let mut raw = String::new();
            for (i, ch) in digits.chars().enumerate() {
                for (at, sep) in &cuts {
                    if *at == i {
                        raw.push(*sep);
                    }
                }
                raw.push(ch);
            }
            let phone = Phone::parse(&raw).unwrap();
            prop_assert_eq!(phone.as_str(), digits.as_str());
        }
    }
}
