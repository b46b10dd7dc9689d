//! Whole-form validation for the card entry fields.
//!
//! [`validate_form_at`] checks every field independently in one pass and
//! returns the complete [`FieldErrors`] map; there is no short-circuit
//! across fields, so a blank form reports all four required errors at
//! once. Within a field the checks run in priority order and only the
//! first failure is reported.
//!
//! The pass is pure: the same snapshot and reference date always produce
//! the same map.
//!
//! # Example
//!
//! ```
//! use card_entry::validate::{validate_form_at, CardFields};
//!
//! let fields = CardFields {
//!     holder_name: "Jane Doe",
//!     card_number: "4532 0151 1283 0366",
//!     expiry: "04/25",
//!     cvv: "123",
//! };
//! assert!(validate_form_at(&fields, (2025, 3)).is_empty());
//! ```

use crate::errors::{CardNumberError, CvvError, FieldErrors, HolderNameError};
use crate::expiry::{check_expiry, current_year_month};
use crate::input::strip_digits;
use crate::luhn;
use crate::network::CardNetwork;

/// A borrowed snapshot of the four validated field values.
///
/// Formatting characters are fine; each check strips to digits where it
/// needs to. Billing-address fields are not validated and so do not
/// appear here.
#[derive(Debug, Clone, Copy)]
pub struct CardFields<'a> {
    /// Cardholder name as typed.
    pub holder_name: &'a str,
    /// Card number, masked or bare.
    pub card_number: &'a str,
    /// Expiry in the `MM/YY` mask.
    pub expiry: &'a str,
    /// CVV digits.
    pub cvv: &'a str,
}

/// Checks the cardholder name: the trimmed value must be non-empty.
pub fn check_holder_name(name: &str) -> Result<(), HolderNameError> {
    if name.trim().is_empty() {
        return Err(HolderNameError::Required);
    }
    Ok(())
}

/// Checks the card number and returns the accepted network.
///
/// Order of checks: required, exactly 16 digits, Luhn, supported
/// network. Only the first failure is reported, so a 15-digit number
/// never surfaces a checksum error.
pub fn check_card_number(raw: &str) -> Result<CardNetwork, CardNumberError> {
    let digits = strip_digits(raw);

    if digits.is_empty() {
        return Err(CardNumberError::Required);
    }
    if digits.len() != 16 {
        return Err(CardNumberError::WrongLength);
    }
    if !luhn::passes(&digits) {
        return Err(CardNumberError::FailsLuhn);
    }

    let network = CardNetwork::detect(&digits);
    if !network.is_supported() {
        return Err(CardNumberError::UnsupportedNetwork);
    }
    Ok(network)
}

/// Checks the CVV: exactly 3 digits.
pub fn check_cvv(raw: &str) -> Result<(), CvvError> {
    let digits = strip_digits(raw);

    if digits.is_empty() {
        return Err(CvvError::Required);
    }
    if digits.len() != 3 {
        return Err(CvvError::WrongLength);
    }
    Ok(())
}

/// Validates a form snapshot against an explicit `(year, month)`
/// reference date.
///
/// # Example
///
/// ```
/// use card_entry::validate::{validate_form_at, CardFields};
/// use card_entry::ExpiryError;
///
/// let fields = CardFields {
///     holder_name: "Jane Doe",
///     card_number: "4532 0151 1283 0366",
///     expiry: "01/20",
///     cvv: "123",
/// };
/// let errors = validate_form_at(&fields, (2024, 6));
/// assert_eq!(errors.expiry, Some(ExpiryError::Expired));
/// assert_eq!(errors.count(), 1);
/// ```
pub fn validate_form_at(fields: &CardFields<'_>, now: (u16, u8)) -> FieldErrors {
    FieldErrors {
        holder_name: check_holder_name(fields.holder_name).err(),
        card_number: check_card_number(fields.card_number).err(),
        expiry: check_expiry(fields.expiry, now).err(),
        cvv: check_cvv(fields.cvv).err(),
    }
}

/// Validates a form snapshot against the system clock.
pub fn validate_form(fields: &CardFields<'_>) -> FieldErrors {
    validate_form_at(fields, current_year_month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExpiryError;

    const NOW: (u16, u8) = (2024, 6);

    fn valid_fields() -> CardFields<'static> {
        CardFields {
            holder_name: "Jane Doe",
            card_number: "4532 0151 1283 0366",
            expiry: "07/24",
            cvv: "123",
        }
    }

    #[test]
    fn accepts_a_valid_visa() {
        let errors = validate_form_at(&valid_fields(), NOW);
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let fields = CardFields {
            holder_name: "",
            card_number: "",
            expiry: "",
            cvv: "",
        };
        let errors = validate_form_at(&fields, NOW);
        assert_eq!(errors.holder_name, Some(HolderNameError::Required));
        assert_eq!(errors.card_number, Some(CardNumberError::Required));
        assert_eq!(errors.expiry, Some(ExpiryError::Required));
        assert_eq!(errors.cvv, Some(CvvError::Required));
        assert_eq!(errors.count(), 4);
    }

    #[test]
    fn whitespace_holder_name_is_required() {
        assert_eq!(check_holder_name("   "), Err(HolderNameError::Required));
        assert_eq!(check_holder_name("Jane Doe"), Ok(()));
    }

    #[test]
    fn wrong_length_beats_checksum() {
        // 15 digits, Luhn-valid: must report length, not checksum.
        assert_eq!(
            check_card_number("378282246310005"),
            Err(CardNumberError::WrongLength)
        );
        // Short and checksum-broken: still length.
        assert_eq!(check_card_number("123"), Err(CardNumberError::WrongLength));
    }

    #[test]
    fn checksum_failure_reported_at_full_length() {
        assert_eq!(
            check_card_number("4532015112830367"),
            Err(CardNumberError::FailsLuhn)
        );
    }

    #[test]
    fn unsupported_network_reported_last() {
        // 16 digits, Luhn-valid, Discover prefix.
        assert_eq!(
            check_card_number("6011111111111117"),
            Err(CardNumberError::UnsupportedNetwork)
        );
    }

    #[test]
    fn accepted_numbers_return_their_network() {
        assert_eq!(
            check_card_number("4532 0151 1283 0366"),
            Ok(CardNetwork::Visa)
        );
        assert_eq!(
            check_card_number("5500 0000 0000 0004"),
            Ok(CardNetwork::Mastercard)
        );
        assert_eq!(
            check_card_number("2223 0000 4840 0011"),
            Ok(CardNetwork::Mastercard)
        );
    }

    #[test]
    fn expired_card_flags_expiry_only() {
        let fields = CardFields {
            expiry: "01/20",
            ..valid_fields()
        };
        let errors = validate_form_at(&fields, NOW);
        assert_eq!(errors.expiry, Some(ExpiryError::Expired));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn partial_expiry_is_malformed() {
        let fields = CardFields {
            expiry: "1",
            ..valid_fields()
        };
        let errors = validate_form_at(&fields, NOW);
        assert_eq!(errors.expiry, Some(ExpiryError::Malformed));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn cvv_length_enforced() {
        assert_eq!(check_cvv(""), Err(CvvError::Required));
        assert_eq!(check_cvv("12"), Err(CvvError::WrongLength));
        assert_eq!(check_cvv("1234"), Err(CvvError::WrongLength));
        assert_eq!(check_cvv("123"), Ok(()));
    }

    #[test]
    fn validation_is_idempotent() {
        let fields = CardFields {
            holder_name: "",
            card_number: "4111",
            expiry: "13/30",
            cvv: "12",
        };
        let first = validate_form_at(&fields, NOW);
        let second = validate_form_at(&fields, NOW);
        assert_eq!(first, second);
    }
}
