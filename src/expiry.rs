//! Expiry parsing and expiry checking for the masked `MM/YY` field.
//!
//! The field value arrives already masked by
//! [`format_expiry`](crate::input::format_expiry), so a complete entry
//! always carries exactly four digits. Two-digit years map to `2000 + YY`.
//! A card is considered live through the end of its expiry month: `06/24`
//! is still valid in June 2024 and expired from July on.
//!
//! Checks run against an explicit `(year, month)` reference so callers and
//! tests control "now"; [`current_year_month`] derives the reference from
//! the system clock.
//!
//! # Example
//!
//! ```
//! use card_entry::expiry::{check_expiry, ExpiryDate};
//! use card_entry::ExpiryError;
//!
//! let date = check_expiry("12/30", (2026, 8)).unwrap();
//! assert_eq!(date.month(), 12);
//! assert_eq!(date.year(), 2030);
//!
//! assert_eq!(check_expiry("01/20", (2026, 8)), Err(ExpiryError::Expired));
//! ```

use crate::errors::ExpiryError;
use crate::input::strip_digits;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A parsed expiry with a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    /// Month (1-12)
    month: u8,
    /// Four-digit year
    year: u16,
}

impl ExpiryDate {
    /// Creates an expiry date, or `None` when the month is outside 1-12.
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Whether the card is expired relative to the given `(year, month)`.
    ///
    /// A card expires at the end of its expiry month, so a date equal to
    /// the reference month is still valid.
    pub fn is_expired_at(&self, now: (u16, u8)) -> bool {
        let (now_year, now_month) = now;
        self.year < now_year || (self.year == now_year && self.month < now_month)
    }

    /// Whether the card is expired relative to the system clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_year_month())
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Checks a masked expiry field value against a `(year, month)` reference.
///
/// The checks apply in order and the first failure wins: empty input is
/// [`ExpiryError::Required`]; anything other than exactly four digits is
/// [`ExpiryError::Malformed`]; a month outside 1-12 is
/// [`ExpiryError::InvalidMonth`]; a date before the reference month is
/// [`ExpiryError::Expired`].
///
/// # Example
///
/// ```
/// use card_entry::expiry::check_expiry;
/// use card_entry::ExpiryError;
///
/// assert!(check_expiry("06/24", (2024, 6)).is_ok());
/// assert_eq!(check_expiry("1", (2024, 6)), Err(ExpiryError::Malformed));
/// assert_eq!(check_expiry("13/30", (2024, 6)), Err(ExpiryError::InvalidMonth));
/// ```
pub fn check_expiry(masked: &str, now: (u16, u8)) -> Result<ExpiryDate, ExpiryError> {
    if masked.trim().is_empty() {
        return Err(ExpiryError::Required);
    }

    let digits = strip_digits(masked);
    if digits.len() != 4 {
        return Err(ExpiryError::Malformed);
    }

    let month: u8 = digits[..2].parse().map_err(|_| ExpiryError::Malformed)?;
    let yy: u16 = digits[2..].parse().map_err(|_| ExpiryError::Malformed)?;
    let year = 2000 + yy;

    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth);
    }

    let date = ExpiryDate { month, year };
    if date.is_expired_at(now) {
        return Err(ExpiryError::Expired);
    }
    Ok(date)
}

/// Gets the current year and month from the system clock.
///
/// Computed from the Unix timestamp with a flat 365-day year and 30-day
/// month; the drift stays well under the granularity expiry checks need.
pub fn current_year_month() -> (u16, u8) {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days = secs / 86400;
    let years = days / 365;
    let year = 1970 + years as u16;

    let day_of_year = days % 365;
    let month = (day_of_year / 30).min(11) as u8 + 1;

    (year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: (u16, u8) = (2024, 6);

    #[test]
    fn parses_complete_entries() {
        let date = check_expiry("12/25", NOW).unwrap();
        assert_eq!(date.month(), 12);
        assert_eq!(date.year(), 2025);

        // Mask not strictly required as long as four digits are present.
        let date = check_expiry("0130", NOW).unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.year(), 2030);
    }

    #[test]
    fn empty_is_required() {
        assert_eq!(check_expiry("", NOW), Err(ExpiryError::Required));
        assert_eq!(check_expiry("   ", NOW), Err(ExpiryError::Required));
    }

    #[test]
    fn partial_entries_are_malformed() {
        assert_eq!(check_expiry("1", NOW), Err(ExpiryError::Malformed));
        assert_eq!(check_expiry("12/", NOW), Err(ExpiryError::Malformed));
        assert_eq!(check_expiry("12/3", NOW), Err(ExpiryError::Malformed));
        assert_eq!(check_expiry("12/345", NOW), Err(ExpiryError::Malformed));
        assert_eq!(check_expiry("ab", NOW), Err(ExpiryError::Malformed));
    }

    #[test]
    fn month_range_enforced() {
        assert_eq!(check_expiry("00/30", NOW), Err(ExpiryError::InvalidMonth));
        assert_eq!(check_expiry("13/30", NOW), Err(ExpiryError::InvalidMonth));
        assert!(check_expiry("01/30", NOW).is_ok());
        assert!(check_expiry("12/30", NOW).is_ok());
    }

    #[test]
    fn current_month_still_valid() {
        assert!(check_expiry("06/24", NOW).is_ok());
        assert!(check_expiry("07/24", NOW).is_ok());
        assert_eq!(check_expiry("05/24", NOW), Err(ExpiryError::Expired));
        assert_eq!(check_expiry("01/20", NOW), Err(ExpiryError::Expired));
        assert_eq!(check_expiry("12/23", NOW), Err(ExpiryError::Expired));
    }

    #[test]
    fn invalid_month_reported_before_expired() {
        // A nonsense month on an old year is InvalidMonth, not Expired.
        assert_eq!(check_expiry("13/20", NOW), Err(ExpiryError::InvalidMonth));
    }

    #[test]
    fn expiry_date_construction() {
        assert!(ExpiryDate::new(1, 2025).is_some());
        assert!(ExpiryDate::new(12, 2025).is_some());
        assert!(ExpiryDate::new(0, 2025).is_none());
        assert!(ExpiryDate::new(13, 2025).is_none());
    }

    #[test]
    fn expired_comparison_is_strict() {
        let date = ExpiryDate::new(6, 2024).unwrap();
        assert!(!date.is_expired_at((2024, 6)));
        assert!(date.is_expired_at((2024, 7)));
        assert!(date.is_expired_at((2025, 1)));
        assert!(!date.is_expired_at((2023, 12)));
    }

    #[test]
    fn displays_as_masked_value() {
        let date = ExpiryDate::new(3, 2025).unwrap();
        assert_eq!(date.to_string(), "03/25");
        let date = ExpiryDate::new(11, 2030).unwrap();
        assert_eq!(date.to_string(), "11/30");
    }

    #[test]
    fn clock_reference_is_sane() {
        let (year, month) = current_year_month();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
    }
}
