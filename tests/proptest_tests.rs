//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use card_entry::expiry::check_expiry;
use card_entry::input::{digit_count, format_card_number, format_expiry, strip_digits};
use card_entry::{
    luhn, validate_form_at, CardEntryForm, CardFields, CardNetwork, CardNumberError, ExpiryError,
};
use proptest::prelude::*;

/// Reference clock used by every property: June 2024.
const NOW: (u16, u8) = (2024, 6);

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// Generates a 16-digit number starting with `first` that passes the Luhn check.
fn luhn_valid_16(first: char) -> impl Strategy<Value = String> {
    digit_string(14).prop_map(move |middle| {
        let partial = format!("{}{}", first, middle);
        let check = luhn::check_digit(&partial).expect("digit-only prefix");
        format!("{}{}", partial, check)
    })
}

/// Generates a Luhn-valid 16-digit number on a supported network.
fn supported_card() -> impl Strategy<Value = String> {
    prop_oneof![luhn_valid_16('4'), luhn_valid_16('5'), luhn_valid_16('2')]
}

// =============================================================================
// INPUT MASK PROPERTIES
// =============================================================================

proptest! {
    /// Property: the card mask never adds, drops, or reorders digits.
    #[test]
    fn card_mask_preserves_digits(input in ".*") {
        let masked = format_card_number(&input);
        prop_assert_eq!(strip_digits(&masked), strip_digits(&input));
    }

    /// Property: grouping is four digits per chunk, last chunk possibly short.
    #[test]
    fn card_mask_groups_by_four(digits in digit_string_range(0..=16)) {
        let masked = format_card_number(&digits);
        if digits.is_empty() {
            prop_assert!(masked.is_empty());
        } else {
            let chunks: Vec<&str> = masked.split(' ').collect();
            let last = chunks.len() - 1;
            for (i, chunk) in chunks.iter().enumerate() {
                if i < last {
                    prop_assert_eq!(chunk.len(), 4, "inner chunk in {}", masked);
                } else {
                    prop_assert!((1..=4).contains(&chunk.len()), "tail chunk in {}", masked);
                }
                prop_assert!(chunk.bytes().all(|b| b.is_ascii_digit()));
            }
        }
    }

    /// Property: re-applying the card mask to its own output changes nothing.
    #[test]
    fn card_mask_is_idempotent(input in ".*") {
        let once = format_card_number(&input);
        prop_assert_eq!(format_card_number(&once), once);
    }

    /// Property: the expiry mask puts the slash after the month and nowhere else.
    #[test]
    fn expiry_mask_slash_placement(digits in digit_string_range(0..=4)) {
        let masked = format_expiry(&digits);
        if digits.len() < 2 {
            prop_assert_eq!(masked, digits);
        } else {
            prop_assert_eq!(masked.find('/'), Some(2));
            prop_assert_eq!(masked.matches('/').count(), 1);
            prop_assert_eq!(strip_digits(&masked), digits);
        }
    }

    /// Property: the expiry mask keeps at most four digits from any input.
    #[test]
    fn expiry_mask_caps_at_four(input in ".*") {
        let masked = format_expiry(&input);
        prop_assert!(digit_count(&masked) <= 4);
        let capped: String = strip_digits(&input).chars().take(4).collect();
        prop_assert_eq!(strip_digits(&masked), capped);
    }

    /// Property: re-applying the expiry mask to its own output changes nothing.
    #[test]
    fn expiry_mask_is_idempotent(input in ".*") {
        let once = format_expiry(&input);
        prop_assert_eq!(format_expiry(&once), once);
    }
}

// =============================================================================
// LUHN ALGORITHM PROPERTIES
// =============================================================================

proptest! {
    /// Property: appending the computed check digit makes any prefix valid.
    #[test]
    fn check_digit_completes_any_prefix(prefix in digit_string_range(0..=18)) {
        let check = luhn::check_digit(&prefix).expect("digit-only prefix");
        let full = format!("{}{}", prefix, check);
        prop_assert!(luhn::passes(&full), "completed number should pass: {}", full);
    }

    /// Property: changing any single digit of a valid number breaks the checksum.
    #[test]
    fn single_digit_change_invalidates(
        number in luhn_valid_16('4'),
        pos in 0usize..16usize,
        bump in 1u8..=9u8,
    ) {
        let mut digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
        digits[pos] = (digits[pos] + bump) % 10;
        let corrupted: String = digits.iter().map(|d| (d + b'0') as char).collect();
        prop_assert_ne!(&corrupted, &number);
        prop_assert!(!luhn::passes(&corrupted),
            "changing digit {} should invalidate {}", pos, number);
    }

    /// Property: the checksum exists exactly for non-empty all-digit strings.
    #[test]
    fn checksum_defined_only_for_digit_strings(input in ".*") {
        let digits_only = !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(luhn::checksum(&input).is_some(), digits_only);
    }

    /// Property: all zeros of any length passes Luhn (sum = 0).
    #[test]
    fn all_zeros_passes_luhn(len in 1usize..=19usize) {
        let zeros = "0".repeat(len);
        prop_assert!(luhn::passes(&zeros));
    }

    /// Property: the Luhn helpers never panic, whatever the input.
    #[test]
    fn luhn_never_panics(input in ".*") {
        let _ = luhn::passes(&input);
        let _ = luhn::checksum(&input);
        let _ = luhn::check_digit(&input);
    }
}

// =============================================================================
// NETWORK DETECTION PROPERTIES
// =============================================================================

proptest! {
    /// Property: detection sees through mask characters.
    #[test]
    fn detection_ignores_separators(input in ".*") {
        let stripped = strip_digits(&input);
        prop_assert_eq!(CardNetwork::detect(&input), CardNetwork::detect(&stripped));
    }

    /// Property: the first digit alone decides the network.
    #[test]
    fn detection_follows_first_digit(digits in digit_string_range(1..=19)) {
        let expected = match digits.as_bytes()[0] {
            b'4' => CardNetwork::Visa,
            b'5' | b'2' => CardNetwork::Mastercard,
            _ => CardNetwork::Unknown,
        };
        prop_assert_eq!(CardNetwork::detect(&digits), expected);
    }
}

// =============================================================================
// EXPIRY DATE PROPERTIES
// =============================================================================

proptest! {
    /// Property: every in-range month/year pair parses and round-trips.
    #[test]
    fn valid_month_parses(month in 1u8..=12u8, year in 25u16..=99u16) {
        let input = format!("{:02}/{:02}", month, year);
        let date = check_expiry(&input, NOW).expect("future date should parse");
        prop_assert_eq!(date.month(), month);
        prop_assert_eq!(date.year(), 2000 + year);
        prop_assert_eq!(date.to_string(), input);
    }

    /// Property: months outside 1..=12 are rejected before the expiry check.
    #[test]
    fn invalid_month_rejected(month in 13u8..=99u8, year in 0u16..=99u16) {
        let input = format!("{:02}/{:02}", month, year);
        prop_assert_eq!(check_expiry(&input, NOW), Err(ExpiryError::InvalidMonth));
    }

    /// Property: any month in a past year is expired.
    #[test]
    fn past_years_are_expired(month in 1u8..=12u8, year in 0u16..=23u16) {
        let input = format!("{:02}/{:02}", month, year);
        prop_assert_eq!(check_expiry(&input, NOW), Err(ExpiryError::Expired));
    }

    /// Property: the current month and everything after it is accepted.
    #[test]
    fn current_and_future_months_accepted(month in 6u8..=12u8) {
        let input = format!("{:02}/24", month);
        prop_assert!(check_expiry(&input, NOW).is_ok(), "should accept {}", input);
    }
}

// =============================================================================
// WHOLE-FORM VALIDATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: a fully valid snapshot produces an empty error map.
    #[test]
    fn valid_snapshots_produce_no_errors(
        number in supported_card(),
        month in 1u8..=12u8,
        year in 25u16..=99u16,
        cvv in digit_string(3),
        name in "[A-Za-z][A-Za-z ]{0,30}",
    ) {
        let expiry = format!("{:02}/{:02}", month, year);
        let fields = CardFields {
            holder_name: &name,
            card_number: &number,
            expiry: &expiry,
            cvv: &cvv,
        };
        let errors = validate_form_at(&fields, NOW);
        prop_assert!(errors.is_empty(), "unexpected errors for {}: {}", number, errors);
    }

    /// Property: grouping spaces in the number never change the verdict.
    #[test]
    fn separators_dont_affect_validation(number in supported_card()) {
        let fields = CardFields {
            holder_name: "Jane Doe",
            card_number: &number,
            expiry: "12/30",
            cvv: "123",
        };
        let plain = validate_form_at(&fields, NOW);

        let masked = format_card_number(&number);
        let fields = CardFields { card_number: &masked, ..fields };
        let spaced = validate_form_at(&fields, NOW);
        prop_assert_eq!(plain, spaced);
    }

    /// Property: any digit count other than 16 reports the length error.
    #[test]
    fn non_sixteen_digit_numbers_report_length(
        number in prop_oneof![digit_string_range(1..=15), digit_string_range(17..=24)],
    ) {
        let fields = CardFields {
            holder_name: "Jane Doe",
            card_number: &number,
            expiry: "12/30",
            cvv: "123",
        };
        let errors = validate_form_at(&fields, NOW);
        prop_assert_eq!(errors.card_number, Some(CardNumberError::WrongLength));
    }

    /// Property: Luhn-valid numbers on unsupported networks are rejected.
    #[test]
    fn unsupported_networks_rejected(
        number in prop_oneof![
            Just('0'), Just('1'), Just('3'), Just('6'), Just('7'), Just('8'), Just('9'),
        ]
        .prop_flat_map(luhn_valid_16),
    ) {
        let fields = CardFields {
            holder_name: "Jane Doe",
            card_number: &number,
            expiry: "12/30",
            cvv: "123",
        };
        let errors = validate_form_at(&fields, NOW);
        prop_assert_eq!(errors.card_number, Some(CardNumberError::UnsupportedNetwork));
    }

    /// Property: validation is a pure function of the snapshot and the clock.
    #[test]
    fn validation_is_deterministic(
        name in ".*",
        number in ".*",
        expiry in ".*",
        cvv in ".*",
        year in 2020u16..=2040u16,
        month in 1u8..=12u8,
    ) {
        let fields = CardFields {
            holder_name: &name,
            card_number: &number,
            expiry: &expiry,
            cvv: &cvv,
        };
        let first = validate_form_at(&fields, (year, month));
        let second = validate_form_at(&fields, (year, month));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.is_empty(), first.count() == 0);
    }
}

// =============================================================================
// FORM STATE PROPERTIES
// =============================================================================

proptest! {
    /// Property: field caps hold for any sequence of edits.
    #[test]
    fn edits_never_exceed_field_caps(inputs in proptest::collection::vec(".*", 1..8)) {
        let mut form = CardEntryForm::new();
        for input in &inputs {
            form.edit_card_number(input);
            form.edit_expiry(input);
            form.edit_cvv(input);
            prop_assert!(digit_count(form.card_number()) <= 16);
            prop_assert!(digit_count(form.expiry()) <= 4);
            prop_assert!(form.cvv().len() <= 3);
        }
    }

    /// Property: Debug output never exposes a complete card number.
    #[test]
    fn debug_never_exposes_card(number in supported_card()) {
        let mut form = CardEntryForm::new();
        form.edit_card_number(&number);
        let debug = format!("{:?}", form);
        prop_assert!(!debug.contains(&number), "Debug leaked the number: {}", debug);
        prop_assert!(!debug.contains(&format_card_number(&number)));
    }
}
