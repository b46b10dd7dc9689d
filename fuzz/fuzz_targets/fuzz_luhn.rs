//! Fuzz target for the Luhn checksum.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use card_entry::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let passes = luhn::passes(data);
    let checksum = luhn::checksum(data);

    // A passing answer implies the checksum existed and divides by 10
    if passes {
        let sum = checksum.expect("passing input must have a checksum");
        assert_eq!(sum % 10, 0);
    }

    // The checksum exists exactly for non-empty all-digit input
    let digits_only = !data.is_empty() && data.bytes().all(|b| b.is_ascii_digit());
    assert_eq!(checksum.is_some(), digits_only);

    // Appending the check digit always yields a passing number
    if let Some(check) = luhn::check_digit(data) {
        assert!(check <= 9, "check digit should be 0-9");
        let full = format!("{}{}", data, check);
        assert!(luhn::passes(&full), "adding check digit should make valid");
    }
});
