//! The asynchronous save step behind an injectable gateway.
//!
//! After validation passes, the accepted summary goes through a
//! [`CardSaver`] before it may join the payment-method list.
//! [`SimulatedGateway`] stands in for the real network call: it accepts
//! every card after a fixed latency, the way the billing dialog fakes its
//! backend. [`submit_and_save`] drives one full attempt end to end and
//! resolves the form to the right state afterwards.
//!
//! Requires the `async` feature.
//!
//! # Example
//!
//! ```
//! use card_entry::gateway::{submit_and_save, SimulatedGateway};
//! use card_entry::CardEntryForm;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut form = CardEntryForm::new();
//! form.edit_holder_name("Jane Doe");
//! form.edit_card_number("4532015112830366");
//! form.edit_expiry("1299");
//! form.edit_cvv("123");
//!
//! let gateway = SimulatedGateway::with_latency(Duration::ZERO);
//! let method = submit_and_save(&mut form, &gateway).await.unwrap();
//! assert_eq!(method.last4, "0366");
//! assert_eq!(form.card_number(), ""); // reset after the save confirmed
//! # }
//! ```

use crate::errors::FieldErrors;
use crate::form::{CardEntryForm, SaveError, StoredPaymentMethod, SubmitError};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// The save step a validated card goes through.
///
/// Implementations see only the [`StoredPaymentMethod`] summary; the full
/// number and CVV never reach this call.
#[async_trait]
pub trait CardSaver {
    /// Persists the summary, or explains why it could not be saved.
    async fn save(&self, method: &StoredPaymentMethod) -> Result<(), SaveError>;
}

/// A gateway that accepts every card after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    /// The latency the billing dialog simulates.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

    /// Creates a gateway with [`SimulatedGateway::DEFAULT_LATENCY`].
    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
        }
    }

    /// Creates a gateway with a custom latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardSaver for SimulatedGateway {
    async fn save(&self, method: &StoredPaymentMethod) -> Result<(), SaveError> {
        tokio::time::sleep(self.latency).await;
        debug!(%method, "simulated gateway accepted the card");
        Ok(())
    }
}

/// Why a driven attempt produced no stored method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Validation failed; the map is installed on the form.
    Invalid(FieldErrors),
    /// A save was already in flight; nothing was re-validated.
    InFlight,
    /// The save step failed; the form shows the banner and stays
    /// editable with its input preserved.
    SaveFailed(SaveError),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "card details failed validation: {errors}"),
            Self::InFlight => write!(f, "a save is already in flight"),
            Self::SaveFailed(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AttemptError {}

impl From<SubmitError> for AttemptError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => Self::Invalid(errors),
            SubmitError::InFlight => Self::InFlight,
        }
    }
}

/// Drives one submission attempt end to end against the system clock.
///
/// See [`submit_and_save_at`].
pub async fn submit_and_save<S>(
    form: &mut CardEntryForm,
    saver: &S,
) -> Result<StoredPaymentMethod, AttemptError>
where
    S: CardSaver + ?Sized,
{
    let method = form.submit()?;
    resolve(form, saver, method).await
}

/// Drives one submission attempt end to end against an explicit
/// `(year, month)` reference date.
///
/// Validates and enters `Submitting` through
/// [`CardEntryForm::submit_at`], awaits the saver, then resolves the form:
/// a confirmed save resets it and yields the summary for the caller's
/// wallet; a failed save installs the banner and leaves the input intact.
pub async fn submit_and_save_at<S>(
    form: &mut CardEntryForm,
    saver: &S,
    now: (u16, u8),
) -> Result<StoredPaymentMethod, AttemptError>
where
    S: CardSaver + ?Sized,
{
    let method = form.submit_at(now)?;
    resolve(form, saver, method).await
}

async fn resolve<S>(
    form: &mut CardEntryForm,
    saver: &S,
    method: StoredPaymentMethod,
) -> Result<StoredPaymentMethod, AttemptError>
where
    S: CardSaver + ?Sized,
{
    match saver.save(&method).await {
        Ok(()) => {
            form.save_succeeded();
            Ok(method)
        }
        Err(err) => {
            form.save_failed(err.clone());
            Err(AttemptError::SaveFailed(err))
        }
    }
}
