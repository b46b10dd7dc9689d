//! Keystroke formatting for the card entry fields.
//!
//! These functions turn whatever the user has typed so far into the
//! canonical display string for the field: the card number gains a single
//! space after every 4th digit, the expiry collapses to the `MM/YY` mask.
//! Both are total over arbitrary input (non-digits are stripped, never an
//! error) and idempotent on their own output, so they can run on every
//! change event.
//!
//! Length caps are not applied here. The form's edit operations drop a
//! keystroke that would exceed the field's cap before the formatter runs,
//! matching how the input handlers gate their setters.
//!
//! # Example
//!
//! ```
//! use card_entry::input::{format_card_number, format_expiry};
//!
//! assert_eq!(format_card_number("4532015112830366"), "4532 0151 1283 0366");
//! assert_eq!(format_expiry("1225"), "12/25");
//! ```

/// Strips everything but ASCII digits from the input.
///
/// # Example
///
/// ```
/// use card_entry::input::strip_digits;
///
/// assert_eq!(strip_digits("4532 0151 1283 0366"), "4532015112830366");
/// assert_eq!(strip_digits("12/25"), "1225");
/// ```
#[inline]
pub fn strip_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Counts the ASCII digits in the input without allocating.
#[inline]
pub fn digit_count(input: &str) -> usize {
    input.bytes().filter(u8::is_ascii_digit).count()
}

/// Formats a card number as typed: groups of 4 digits joined by single
/// spaces.
///
/// Handles partial input; the last group may be shorter than 4. The
/// 16-digit cap is the caller's responsibility.
///
/// # Example
///
/// ```
/// use card_entry::input::format_card_number;
///
/// assert_eq!(format_card_number("45320"), "4532 0");
/// assert_eq!(format_card_number("4532-0151-1283-0366"), "4532 0151 1283 0366");
/// assert_eq!(format_card_number(""), "");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = strip_digits(raw);

    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Formats an expiry as typed: `MM/YY` once two or more digits exist,
/// bare digits before that.
///
/// At most four digits are considered; anything past them is dropped.
/// Note the mask is purely positional. `"12"` becomes `"12/"` and `"1"`
/// stays `"1"`; whether the digits form a real month is the validator's
/// concern.
///
/// # Example
///
/// ```
/// use card_entry::input::format_expiry;
///
/// assert_eq!(format_expiry("1"), "1");
/// assert_eq!(format_expiry("12"), "12/");
/// assert_eq!(format_expiry("12/25"), "12/25");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let digits = strip_digits(raw);

    if digits.len() < 2 {
        return digits;
    }
    let end = digits.len().min(4);
    format!("{}/{}", &digits[..2], &digits[2..end])
}
