//! Fuzz target for CVV checking.
//!
//! Tests that the per-field checks never panic on arbitrary input and
//! that the form keeps its CVV cap.

#![no_main]

use card_entry::validate::{check_card_number, check_cvv, check_holder_name};
use card_entry::CardEntryForm;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let _ = check_cvv(data);
    let _ = check_holder_name(data);
    let _ = check_card_number(data);

    if let Err(e) = check_cvv(data) {
        let _ = e.to_string();
    }

    // The form never keeps more than three CVV digits, and never keeps
    // anything that is not a digit
    let mut form = CardEntryForm::new();
    form.edit_cvv(data);
    assert!(form.cvv().len() <= 3);
    assert!(form.cvv().bytes().all(|b| b.is_ascii_digit()));
});
