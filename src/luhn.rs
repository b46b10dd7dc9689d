//! Luhn checksum over a card-number digit string.
//!
//! The Luhn algorithm (the "modulus 10" formula) is the checksum used by
//! payment card numbers: walking from the rightmost digit leftwards, every
//! second digit is doubled (subtracting 9 when the double exceeds 9), and
//! the number passes when the summed digits are divisible by 10.
//!
//! The functions here take the already-stripped digit string the validator
//! works with; any non-digit byte makes them return the failing answer
//! rather than panic, so they are total over arbitrary input.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a digit string against the Luhn formula.
///
/// Returns `false` for an empty string or for input containing anything
/// other than ASCII digits.
///
/// # Example
///
/// ```
/// use card_entry::luhn;
///
/// assert!(luhn::passes("4532015112830366"));
/// assert!(!luhn::passes("4532015112830367"));
/// ```
#[inline]
pub fn passes(digits: &str) -> bool {
    match checksum(digits) {
        Some(sum) => sum % 10 == 0,
        None => false,
    }
}

/// Computes the Luhn sum for a digit string (not reduced modulo 10).
///
/// Returns `None` when the string is empty or contains a non-digit byte.
#[inline]
pub fn checksum(digits: &str) -> Option<u32> {
    let bytes = digits.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    let len = bytes.len();
    let mut sum: u32 = 0;

    // Rightmost digit is position 0 (kept as-is); every odd position
    // from the right is doubled.
    let mut i = 0;
    while i < len {
        let byte = bytes[len - 1 - i];
        if !byte.is_ascii_digit() {
            return None;
        }
        let digit = byte - b'0';

        if i % 2 == 1 {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        i += 1;
    }

    Some(sum)
}

/// Computes the check digit that would make `partial` pass validation
/// once appended.
///
/// Returns `None` when `partial` contains a non-digit byte. The empty
/// string is allowed and yields `0`.
///
/// # Example
///
/// ```
/// use card_entry::luhn;
///
/// let digit = luhn::check_digit("453201511283036").unwrap();
/// assert_eq!(digit, 6);
/// assert!(luhn::passes("4532015112830366"));
/// ```
#[inline]
pub fn check_digit(partial: &str) -> Option<u8> {
    let bytes = partial.as_bytes();
    let len = bytes.len();
    let mut sum: u32 = 0;

    // Once the check digit is appended every existing digit shifts one
    // position left, so position i from the right here lands on position
    // i + 1 in the final number: even i gets doubled.
    let mut i = 0;
    while i < len {
        let byte = bytes[len - 1 - i];
        if !byte.is_ascii_digit() {
            return None;
        }
        let digit = byte - b'0';

        if i % 2 == 0 {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        i += 1;
    }

    Some(((10 - (sum % 10)) % 10) as u8)
}
