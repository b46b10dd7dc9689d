//! # card_entry
//!
//! The card-entry engine of a billing screen: keystroke formatting,
//! network detection, and field validation for a payment-card form,
//! together with the form's submission state machine and the two small
//! stateful collaborators around it (the saved payment-method wallet and
//! the persisted website directory).
//!
//! ## Features
//!
//! - Progressive input masks for the card number (`XXXX XXXX XXXX XXXX`)
//!   and expiry (`MM/YY`), total over any input
//! - Network detection from the number prefix (Visa, Mastercard)
//! - Luhn checksum validation
//! - Whole-form validation producing a per-field map of tagged errors
//! - Form state machine with error-clear-on-edit and double-submit
//!   prevention
//! - Payment-method wallet and website directory behind injectable store
//!   traits
//! - Optional async save gateway (`async` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{CardEntryForm, CardNetwork};
//!
//! let mut form = CardEntryForm::new();
//! form.edit_holder_name("Jane Doe");
//! form.edit_card_number("4532015112830366");
//! form.edit_expiry("1230");
//! form.edit_cvv("123");
//!
//! // Masks and the network badge update on every keystroke.
//! assert_eq!(form.card_number(), "4532 0151 1283 0366");
//! assert_eq!(form.expiry(), "12/30");
//! assert_eq!(form.network(), CardNetwork::Visa);
//!
//! // Validation runs on submit; a clean form yields the stored summary.
//! let method = form.submit_at((2026, 8)).unwrap();
//! assert_eq!(method.network, CardNetwork::Visa);
//! assert_eq!(method.last4, "0366");
//! assert_eq!(method.expiry, "12/30");
//! ```
//!
//! ## Validating a Snapshot
//!
//! The validation pass is a pure function over the field values, so it
//! can also run without a form instance:
//!
//! ```rust
//! use card_entry::{validate_form_at, CardFields, CardNumberError};
//!
//! let fields = CardFields {
//!     holder_name: "Jane Doe",
//!     card_number: "6011 1111 1111 1117", // Discover prefix
//!     expiry: "12/30",
//!     cvv: "123",
//! };
//! let errors = validate_form_at(&fields, (2026, 8));
//! assert_eq!(errors.card_number, Some(CardNumberError::UnsupportedNetwork));
//! assert_eq!(errors.count(), 1);
//! ```
//!
//! Every field is checked in the same pass; a blank form reports all
//! four required errors at once. Within a field the checks run in
//! priority order and only the first failure is reported.
//!
//! ## Keystroke Formatting
//!
//! ```rust
//! use card_entry::input::{format_card_number, format_expiry};
//!
//! assert_eq!(format_card_number("4532-0151-1283"), "4532 0151 1283");
//! assert_eq!(format_expiry("123"), "12/3");
//! ```
//!
//! ## The Wallet
//!
//! Accepted cards land in a payment-method list behind the
//! [`wallet::WalletStore`] trait. Adding a default card demotes every
//! other method, so at most one default exists:
//!
//! ```rust
//! use card_entry::wallet::{MemoryWallet, WalletStore};
//! use card_entry::{CardNetwork, StoredPaymentMethod};
//!
//! let mut wallet = MemoryWallet::with_sample_data();
//! wallet.add(StoredPaymentMethod {
//!     network: CardNetwork::Mastercard,
//!     last4: "0004".into(),
//!     expiry: "11/29".into(),
//!     primary: true,
//! });
//! assert_eq!(wallet.primary().map(|m| m.last4), Some("0004".into()));
//! ```
//!
//! ## The Website Directory
//!
//! The user-maintained website list persists as JSON through the
//! [`sites::KeyValueStore`] trait, failing soft in both directions: an
//! unreadable store loads the built-in defaults, and a failed save keeps
//! the in-memory change.
//!
//! ```rust
//! use card_entry::sites::{MemoryStore, WebsiteDirectory};
//!
//! let mut sites = WebsiteDirectory::load(MemoryStore::new());
//! assert_eq!(sites.list().len(), 3); // built-in defaults
//! sites.add("docs.mywebsite.com", "https://docs.mywebsite.com").unwrap();
//! assert_eq!(sites.list().len(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | [`gateway`] module: the asynchronous save step behind an injectable trait, with a simulated-latency implementation and the `submit_and_save` driver |
//!
//! ## Security
//!
//! The form never lets card data outlive the submission that used it:
//!
//! - Number and CVV buffers are zeroized when replaced, on reset, and on
//!   drop
//! - `Debug` for the form masks the number to its last four digits and
//!   elides the CVV
//! - A successful submission emits only the network, the last four
//!   digits, and the expiry string
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod errors;
pub mod expiry;
pub mod form;
pub mod input;
pub mod luhn;
pub mod network;
pub mod sites;
pub mod validate;
pub mod wallet;

#[cfg(feature = "async")]
pub mod gateway;

// Re-export the card-flow types at the crate root
pub use errors::{CardNumberError, CvvError, ExpiryError, FieldErrors, HolderNameError};
pub use form::{CardEntryForm, FormState, SaveError, StoredPaymentMethod, SubmitError};
pub use network::CardNetwork;
pub use validate::{validate_form, validate_form_at, CardFields};
