//! Fuzz target for the input masks.
//!
//! Tests that masking functions never panic on arbitrary input.

#![no_main]

use card_entry::input::{digit_count, format_card_number, format_expiry, strip_digits};
use card_entry::CardNetwork;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let masked = format_card_number(data);
    let expiry = format_expiry(data);
    let _ = strip_digits(data);
    let _ = digit_count(data);
    let _ = CardNetwork::detect(data);

    // The card mask preserves digits exactly and is stable
    assert_eq!(strip_digits(&masked), strip_digits(data));
    assert_eq!(format_card_number(&masked), masked);

    // The expiry mask caps at four digits and is stable
    assert!(digit_count(&expiry) <= 4);
    assert_eq!(format_expiry(&expiry), expiry);

    // Detection only looks at digits
    assert_eq!(
        CardNetwork::detect(data),
        CardNetwork::detect(&strip_digits(data))
    );
});
