use std::fmt;
use std::str::FromStr;

use crate::types::{FailureKind, FetchError};

/// A validated student identifier: exactly eight ASCII digits.
///
/// Everything downstream of `parse` can rely on the shape, so URL and
/// filename construction never re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validates the 8-digit shape. Leading zeros are fine; anything
    /// else (shorter, longer, non-digit, embedded whitespace) is not.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(FetchError::new(
                FailureKind::InvalidIdentifier,
                format!("identifier {raw:?} is not 8 digits"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_digits() {
        let id = Identifier::parse("20233489").unwrap();
        assert_eq!(id.as_str(), "20233489");
    }

    #[test]
    fn accepts_leading_zeros() {
        assert!(Identifier::parse("00000001").is_ok());
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(Identifier::parse("2023348").is_err());
        assert!(Identifier::parse("202334890").is_err());
        assert!(Identifier::parse("").is_err());
    }

    #[test]
    fn rejects_non_digits() {
        for raw in ["2023348a", "20-33489", " 0233489", "2023348 ", "२०२३३४८९"] {
            let err = Identifier::parse(raw).unwrap_err();
            assert_eq!(err.kind, FailureKind::InvalidIdentifier, "raw = {raw:?}");
        }
    }

    #[test]
    fn round_trips_through_display() {
        let id: Identifier = "20228741".parse().unwrap();
        assert_eq!(id.to_string(), "20228741");
    }
}
