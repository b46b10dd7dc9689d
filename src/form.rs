//! The card entry form: keystroke edits, the submission state machine,
//! and sensitive-buffer hygiene.
//!
//! [`CardEntryForm`] owns the field values of one card-collection dialog.
//! Edit operations apply the input masks, enforce the per-field length
//! caps (an over-long keystroke is dropped wholesale, leaving the field
//! untouched), clear the edited field's error, and keep the network badge
//! current.
//!
//! A submission attempt runs `Idle -> Validating -> {Invalid | Submitting}`;
//! validation is synchronous, so `Validating` never rests and the
//! observable states are [`FormState::Idle`] and [`FormState::Submitting`].
//! While a save is in flight [`CardEntryForm::submit`] refuses re-entry,
//! which is what disables the submit control against double submission.
//! The caller resolves the attempt with [`CardEntryForm::save_succeeded`]
//! (full reset) or [`CardEntryForm::save_failed`] (banner error, editable,
//! input preserved).
//!
//! # Security
//!
//! The number and CVV buffers are zeroized whenever they are replaced, on
//! reset, and on drop; `Debug` masks the number to its last four digits
//! and elides the CVV. Nothing but the network, the last four digits, and
//! the expiry leaves the form.
//!
//! # Example
//!
//! ```
//! use card_entry::{CardEntryForm, CardNetwork};
//!
//! let mut form = CardEntryForm::new();
//! form.edit_holder_name("Jane Doe");
//! form.edit_card_number("4532015112830366");
//! form.edit_expiry("1230");
//! form.edit_cvv("123");
//!
//! assert_eq!(form.card_number(), "4532 0151 1283 0366");
//! assert_eq!(form.network(), CardNetwork::Visa);
//!
//! let method = form.submit_at((2026, 8)).unwrap();
//! assert_eq!(method.last4, "0366");
//! form.save_succeeded();
//! assert_eq!(form.card_number(), "");
//! ```

use crate::errors::FieldErrors;
use crate::expiry::current_year_month;
use crate::input::{digit_count, format_card_number, format_expiry, strip_digits};
use crate::network::CardNetwork;
use crate::validate::{validate_form_at, CardFields};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

/// The summary a successful submission hands to the payment-method list.
///
/// This is the only card data that outlives the form: network, last four
/// digits, expiry string, and whether the card becomes the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaymentMethod {
    /// The accepted network (always Visa or Mastercard).
    pub network: CardNetwork,
    /// Last four digits of the number.
    pub last4: String,
    /// Expiry as displayed, `MM/YY`.
    pub expiry: String,
    /// Whether the caller should make this the default method.
    pub primary: bool,
}

impl fmt::Display for StoredPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ending in {}", self.network, self.last4)
    }
}

/// Observable state of the form between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Editable; no save in flight.
    Idle,
    /// A save is in flight; submission is refused until it resolves.
    Submitting,
}

/// Why a submission attempt did not start a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Validation failed. The same map is installed on the form for
    /// per-field rendering.
    Invalid(FieldErrors),
    /// A save is already in flight; the attempt was refused without
    /// re-validating.
    InFlight,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "card details failed validation: {errors}"),
            Self::InFlight => write!(f, "a save is already in flight"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Failure of the save step, surfaced as a single non-field banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The backend rejected the card.
    Rejected(String),
    /// The payment service could not be reached.
    Unavailable,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "Card could not be saved: {reason}"),
            Self::Unavailable => write!(f, "Payment service is unavailable, try again later"),
        }
    }
}

impl std::error::Error for SaveError {}

/// One card-collection form instance.
///
/// Field values, the per-field error map, the network badge, and the
/// submission state live here; nothing is shared between instances.
pub struct CardEntryForm {
    holder_name: String,
    card_number: String,
    expiry: String,
    cvv: String,
    country: String,
    address: String,
    city: String,
    zip_code: String,
    set_as_default: bool,
    network: CardNetwork,
    errors: FieldErrors,
    banner: Option<SaveError>,
    state: FormState,
}

impl CardEntryForm {
    /// Creates an empty form: all fields blank, country `"US"`, no
    /// errors, `Idle`.
    pub fn new() -> Self {
        Self {
            holder_name: String::new(),
            card_number: String::new(),
            expiry: String::new(),
            cvv: String::new(),
            country: String::from("US"),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
            set_as_default: false,
            network: CardNetwork::Unknown,
            errors: FieldErrors::default(),
            banner: None,
            state: FormState::Idle,
        }
    }

    /// Cardholder name as typed.
    #[inline]
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Card number in its display mask (`XXXX XXXX XXXX XXXX`).
    #[inline]
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Expiry in its display mask (`MM/YY`).
    #[inline]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// CVV digits.
    #[inline]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Billing country code.
    #[inline]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Billing street address.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Billing city.
    #[inline]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Billing ZIP code.
    #[inline]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Whether the card will be stored as the default method.
    #[inline]
    pub fn set_as_default(&self) -> bool {
        self.set_as_default
    }

    /// The network badge for the current number.
    #[inline]
    pub fn network(&self) -> CardNetwork {
        self.network
    }

    /// The error map from the most recent submission attempt, minus any
    /// entries cleared by later edits.
    #[inline]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The banner error from a failed save, if one is showing.
    #[inline]
    pub fn banner(&self) -> Option<&SaveError> {
        self.banner.as_ref()
    }

    /// Current submission state.
    #[inline]
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether a save is in flight (submit control should be disabled).
    #[inline]
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// The card number with all but the last four digits replaced by `*`.
    ///
    /// Safe for logging and display.
    pub fn masked_number(&self) -> String {
        let mut digits = strip_digits(&self.card_number);
        let masked = if digits.is_empty() {
            String::new()
        } else {
            let tail = digits.len().saturating_sub(4);
            format!("{}{}", "*".repeat(tail), &digits[tail..])
        };
        digits.zeroize();
        masked
    }

    /// Replaces the cardholder name and clears its error.
    pub fn edit_holder_name(&mut self, value: &str) {
        self.holder_name.clear();
        self.holder_name.push_str(value);
        self.errors.holder_name = None;
    }

    /// Applies a card number keystroke.
    ///
    /// Input carrying more than 16 digits is dropped wholesale: the field,
    /// its error, and the network badge all stay as they were. Otherwise
    /// the field takes the masked value, its error clears, and the badge
    /// is recomputed, including back to `Unknown` when the field empties.
    pub fn edit_card_number(&mut self, raw: &str) {
        if digit_count(raw) > 16 {
            return;
        }
        let formatted = format_card_number(raw);
        self.card_number.zeroize();
        self.card_number = formatted;
        self.errors.card_number = None;
        self.network = CardNetwork::detect(&self.card_number);
    }

    /// Applies an expiry keystroke. Input carrying more than 4 digits is
    /// dropped wholesale; otherwise the field takes the `MM/YY` mask and
    /// its error clears.
    pub fn edit_expiry(&mut self, raw: &str) {
        if digit_count(raw) > 4 {
            return;
        }
        self.expiry = format_expiry(raw);
        self.errors.expiry = None;
    }

    /// Applies a CVV keystroke. Non-digits are stripped; if more than 3
    /// digits remain the input is dropped wholesale, otherwise the field
    /// takes the digits and its error clears.
    pub fn edit_cvv(&mut self, raw: &str) {
        let mut digits = strip_digits(raw);
        if digits.len() > 3 {
            digits.zeroize();
            return;
        }
        self.cvv.zeroize();
        self.cvv = digits;
        self.errors.cvv = None;
    }

    /// Sets the billing country. Not validated.
    pub fn set_country(&mut self, value: &str) {
        self.country.clear();
        self.country.push_str(value);
    }

    /// Sets the billing street address. Not validated.
    pub fn set_address(&mut self, value: &str) {
        self.address.clear();
        self.address.push_str(value);
    }

    /// Sets the billing city. Not validated.
    pub fn set_city(&mut self, value: &str) {
        self.city.clear();
        self.city.push_str(value);
    }

    /// Sets the billing ZIP code. Not validated.
    pub fn set_zip_code(&mut self, value: &str) {
        self.zip_code.clear();
        self.zip_code.push_str(value);
    }

    /// Sets whether the stored card becomes the default method.
    pub fn set_as_default_flag(&mut self, value: bool) {
        self.set_as_default = value;
    }

    /// Attempts a submission against the system clock.
    ///
    /// See [`CardEntryForm::submit_at`].
    pub fn submit(&mut self) -> Result<StoredPaymentMethod, SubmitError> {
        self.submit_at(current_year_month())
    }

    /// Attempts a submission against an explicit `(year, month)`
    /// reference date.
    ///
    /// While a save is in flight the attempt is refused with
    /// [`SubmitError::InFlight`] without re-validating. Otherwise any
    /// showing banner is dismissed and the fields are validated
    /// synchronously: on failure the map is installed and returned in
    /// [`SubmitError::Invalid`]; on success the form enters
    /// [`FormState::Submitting`] and the [`StoredPaymentMethod`] summary
    /// for the save step is returned. The caller resolves the attempt
    /// with [`CardEntryForm::save_succeeded`] or
    /// [`CardEntryForm::save_failed`].
    pub fn submit_at(&mut self, now: (u16, u8)) -> Result<StoredPaymentMethod, SubmitError> {
        if self.state == FormState::Submitting {
            debug!("submit refused, save already in flight");
            return Err(SubmitError::InFlight);
        }

        self.banner = None;

        let errors = validate_form_at(&self.fields(), now);
        if !errors.is_empty() {
            debug!(fields = errors.count(), "submit blocked by field errors");
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors = FieldErrors::default();
        self.state = FormState::Submitting;

        let mut digits = strip_digits(&self.card_number);
        let last4 = digits[digits.len() - 4..].to_string();
        digits.zeroize();

        let method = StoredPaymentMethod {
            network: self.network,
            last4,
            expiry: self.expiry.clone(),
            primary: self.set_as_default,
        };
        debug!(network = %method.network, last4 = %method.last4, "card accepted, save in flight");
        Ok(method)
    }

    /// Acknowledges a successful save: the form resets to its initial
    /// state, wiping the number and CVV buffers.
    pub fn save_succeeded(&mut self) {
        debug!("save confirmed, resetting form");
        self.reset();
    }

    /// Acknowledges a failed save: the error shows as a banner and the
    /// form returns to `Idle` with every field preserved for editing.
    pub fn save_failed(&mut self, error: SaveError) {
        debug!(%error, "save failed, form back to editable");
        self.banner = Some(error);
        self.state = FormState::Idle;
    }

    /// Returns the form to its initial state, zeroizing the number and
    /// CVV buffers.
    pub fn reset(&mut self) {
        self.holder_name.clear();
        self.card_number.zeroize();
        self.expiry.clear();
        self.cvv.zeroize();
        self.country.clear();
        self.country.push_str("US");
        self.address.clear();
        self.city.clear();
        self.zip_code.clear();
        self.set_as_default = false;
        self.network = CardNetwork::Unknown;
        self.errors = FieldErrors::default();
        self.banner = None;
        self.state = FormState::Idle;
    }

    fn fields(&self) -> CardFields<'_> {
        CardFields {
            holder_name: &self.holder_name,
            card_number: &self.card_number,
            expiry: &self.expiry,
            cvv: &self.cvv,
        }
    }
}

impl Default for CardEntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CardEntryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardEntryForm")
            .field("holder_name", &self.holder_name)
            .field("card_number", &self.masked_number())
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("network", &self.network)
            .field("state", &self.state)
            .field("errors", &self.errors)
            .finish()
    }
}

impl Drop for CardEntryForm {
    fn drop(&mut self) {
        self.card_number.zeroize();
        self.cvv.zeroize();
    }
}
