//! Card network classification from the number prefix.
//!
//! Classification looks at the first digit only: `4` is Visa, `5` or `2`
//! is Mastercard, anything else is [`CardNetwork::Unknown`]. The `2`
//! prefix is broader than the real Mastercard BIN range (2221-2720); the
//! rule is fixed at exactly this shape because the field validator accepts
//! only these two networks and rejects everything else as unsupported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The payment network a card number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardNetwork {
    /// Numbers beginning with `4`.
    Visa,
    /// Numbers beginning with `5` or `2`.
    Mastercard,
    /// Any other prefix, including the empty string.
    Unknown,
}

impl CardNetwork {
    /// Classifies a card number by its first digit.
    ///
    /// Non-digit characters (spaces from display formatting, stray
    /// punctuation) are ignored, so the raw field value can be passed
    /// directly. Pure and idempotent; an input with no digits at all is
    /// [`CardNetwork::Unknown`].
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::CardNetwork;
    ///
    /// assert_eq!(CardNetwork::detect("4111 1111 1111 1111"), CardNetwork::Visa);
    /// assert_eq!(CardNetwork::detect("5500000000000004"), CardNetwork::Mastercard);
    /// assert_eq!(CardNetwork::detect("6011000000000004"), CardNetwork::Unknown);
    /// ```
    #[inline]
    pub fn detect(raw: &str) -> Self {
        match raw.bytes().find(u8::is_ascii_digit) {
            Some(b'4') => CardNetwork::Visa,
            Some(b'5') | Some(b'2') => CardNetwork::Mastercard,
            _ => CardNetwork::Unknown,
        }
    }

    /// The display name of the network.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::Unknown => "Unknown",
        }
    }

    /// Whether the card entry flow accepts this network.
    ///
    /// Only Visa and Mastercard are accepted; everything else fails
    /// validation as an unsupported network.
    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, CardNetwork::Visa | CardNetwork::Mastercard)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_first_digit() {
        assert_eq!(CardNetwork::detect("4111111111111111"), CardNetwork::Visa);
        assert_eq!(
            CardNetwork::detect("5500000000000004"),
            CardNetwork::Mastercard
        );
        assert_eq!(
            CardNetwork::detect("6011000000000004"),
            CardNetwork::Unknown
        );
    }

    #[test]
    fn any_two_prefix_is_mastercard() {
        // The rule is first-digit-only, wider than real BIN ranges.
        assert_eq!(
            CardNetwork::detect("2221000048400011"),
            CardNetwork::Mastercard
        );
        assert_eq!(
            CardNetwork::detect("2000000000000000"),
            CardNetwork::Mastercard
        );
    }

    #[test]
    fn ignores_formatting_characters() {
        assert_eq!(
            CardNetwork::detect("4532 0151 1283 0366"),
            CardNetwork::Visa
        );
        assert_eq!(CardNetwork::detect("  5500-0000"), CardNetwork::Mastercard);
    }

    #[test]
    fn no_digits_is_unknown() {
        assert_eq!(CardNetwork::detect(""), CardNetwork::Unknown);
        assert_eq!(CardNetwork::detect("card"), CardNetwork::Unknown);
    }

    #[test]
    fn partial_input_classifies_immediately() {
        // A single leading digit is enough for the badge to update.
        assert_eq!(CardNetwork::detect("4"), CardNetwork::Visa);
        assert_eq!(CardNetwork::detect("5"), CardNetwork::Mastercard);
        assert_eq!(CardNetwork::detect("3"), CardNetwork::Unknown);
    }

    #[test]
    fn names_and_support() {
        assert_eq!(CardNetwork::Visa.name(), "Visa");
        assert_eq!(CardNetwork::Mastercard.to_string(), "Mastercard");
        assert!(CardNetwork::Visa.is_supported());
        assert!(CardNetwork::Mastercard.is_supported());
        assert!(!CardNetwork::Unknown.is_supported());
    }
}
