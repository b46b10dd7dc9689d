//! Fuzz target for whole-form validation.
//!
//! Tests that validation and the form state machine never panic on
//! arbitrary field contents and arbitrary clocks.

#![no_main]

use card_entry::{validate_form, validate_form_at, CardEntryForm, CardFields};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str, &str, &str, u16, u8)| {
    let (name, number, expiry, cvv, year, month) = data;

    let fields = CardFields {
        holder_name: name,
        card_number: number,
        expiry,
        cvv,
    };

    // These should never panic, regardless of input
    let errors = validate_form_at(&fields, (year, month));
    assert_eq!(errors.is_empty(), errors.count() == 0);
    let _ = errors.to_string();
    let _ = validate_form(&fields);

    // Drive the same input through the form
    let mut form = CardEntryForm::new();
    form.edit_holder_name(name);
    form.edit_card_number(number);
    form.edit_expiry(expiry);
    form.edit_cvv(cvv);
    let _ = form.submit_at((year, month));
    let _ = format!("{:?}", form);
});
