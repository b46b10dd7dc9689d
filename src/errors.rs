//! Field-level validation errors for the card entry form.
//!
//! Each field gets its own tagged enum so callers can branch on the kind
//! of failure; the `Display` impls carry the on-screen text, keeping
//! rendering (and any future localization) at the edge instead of baking
//! strings into the validation pass.
//!
//! [`FieldErrors`] is the per-field error map a validation pass produces:
//! at most one error per field, the empty map meaning the form is
//! submittable.

use std::fmt;

/// Validation failure for the cardholder name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderNameError {
    /// The trimmed value is empty.
    Required,
}

impl fmt::Display for HolderNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Cardholder name is required"),
        }
    }
}

impl std::error::Error for HolderNameError {}

/// Validation failure for the card number field.
///
/// The variants are mutually exclusive and checked in declaration order;
/// only the first failing check is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardNumberError {
    /// No digits entered.
    Required,
    /// The digit count is not exactly 16.
    WrongLength,
    /// The Luhn checksum does not hold.
    FailsLuhn,
    /// The number classifies as a network the flow does not accept.
    UnsupportedNetwork,
}

impl fmt::Display for CardNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Card number is required"),
            Self::WrongLength => write!(f, "Card number must be 16 digits"),
            Self::FailsLuhn => write!(f, "Invalid card number"),
            Self::UnsupportedNetwork => write!(f, "Only Visa and Mastercard are supported"),
        }
    }
}

impl std::error::Error for CardNumberError {}

/// Validation failure for the expiry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryError {
    /// No value entered.
    Required,
    /// The value does not carry a complete `MM/YY` entry.
    Malformed,
    /// The month is outside 1-12.
    InvalidMonth,
    /// The date lies strictly before the reference month.
    Expired,
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Expiry date is required"),
            Self::Malformed => write!(f, "Invalid expiry date"),
            Self::InvalidMonth => write!(f, "Invalid month"),
            Self::Expired => write!(f, "Card has expired"),
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Validation failure for the CVV field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvvError {
    /// No digits entered.
    Required,
    /// The digit count is not exactly 3.
    WrongLength,
}

impl fmt::Display for CvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "CVV is required"),
            Self::WrongLength => write!(f, "CVV must be 3 digits"),
        }
    }
}

impl std::error::Error for CvvError {}

/// The per-field error map produced by a validation pass.
///
/// Every field is checked independently in a single pass, so a blank form
/// reports all four required errors at once. An empty map means the form
/// is submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Error on the cardholder name, if any.
    pub holder_name: Option<HolderNameError>,
    /// Error on the card number, if any.
    pub card_number: Option<CardNumberError>,
    /// Error on the expiry, if any.
    pub expiry: Option<ExpiryError>,
    /// Error on the CVV, if any.
    pub cvv: Option<CvvError>,
}

impl FieldErrors {
    /// Returns `true` when no field carries an error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.holder_name.is_none()
            && self.card_number.is_none()
            && self.expiry.is_none()
            && self.cvv.is_none()
    }

    /// The number of fields currently carrying an error.
    #[inline]
    pub fn count(&self) -> usize {
        self.holder_name.is_some() as usize
            + self.card_number.is_some() as usize
            + self.expiry.is_some() as usize
            + self.cvv.is_some() as usize
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no field errors");
        }
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(e) = self.holder_name {
            parts.push(e.to_string());
        }
        if let Some(e) = self.card_number {
            parts.push(e.to_string());
        }
        if let Some(e) = self.expiry {
            parts.push(e.to_string());
        }
        if let Some(e) = self.cvv {
            parts.push(e.to_string());
        }
        write!(f, "{}", parts.join("; "))
    }
}
