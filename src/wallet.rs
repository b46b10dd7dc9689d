//! The stored payment-method list behind an injected store trait.
//!
//! The billing screen renders and mutates a list of saved cards. The
//! [`WalletStore`] trait keeps that list behind an interface so the card
//! entry flow and its caller can be tested without any UI state, and so a
//! real backing store can be dropped in later. [`MemoryWallet`] is the
//! in-process implementation, with the familiar two-card sample data
//! available for demos and tests.
//!
//! Adding a method flagged primary clears the primary flag on every other
//! method, so at most one default exists at a time. Removing a method
//! never promotes another one.
//!
//! # Example
//!
//! ```
//! use card_entry::wallet::{MemoryWallet, WalletStore};
//! use card_entry::{CardNetwork, StoredPaymentMethod};
//!
//! let mut wallet = MemoryWallet::new();
//! let id = wallet.add(StoredPaymentMethod {
//!     network: CardNetwork::Visa,
//!     last4: "0366".into(),
//!     expiry: "12/30".into(),
//!     primary: true,
//! });
//! assert_eq!(id, 1);
//! assert_eq!(wallet.list().len(), 1);
//! ```

use crate::form::StoredPaymentMethod;
use crate::network::CardNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A saved payment method as the billing screen lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Wallet-assigned identifier.
    pub id: u32,
    /// Card network.
    pub network: CardNetwork,
    /// Last four digits of the number.
    pub last4: String,
    /// Expiry as displayed, `MM/YY`.
    pub expiry: String,
    /// Whether this is the default method.
    pub primary: bool,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ending in {}, expires {}",
            self.network, self.last4, self.expiry
        )?;
        if self.primary {
            write!(f, " (default)")?;
        }
        Ok(())
    }
}

/// Errors from wallet mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// No stored method carries the given id.
    UnknownId(u32),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId(id) => write!(f, "no payment method with id {id}"),
        }
    }
}

impl std::error::Error for WalletError {}

/// Storage interface for the payment-method list.
pub trait WalletStore {
    /// All stored methods in insertion order.
    fn list(&self) -> Vec<PaymentMethod>;

    /// Stores the summary a successful submission produced and returns
    /// the assigned id. When the new method is primary, every other
    /// method loses its primary flag.
    fn add(&mut self, method: StoredPaymentMethod) -> u32;

    /// Makes the given method the default and all others non-default.
    fn set_primary(&mut self, id: u32) -> Result<(), WalletError>;

    /// Deletes the given method. The default is not reassigned.
    fn remove(&mut self, id: u32) -> Result<(), WalletError>;

    /// The current default method, if one exists.
    fn primary(&self) -> Option<PaymentMethod> {
        self.list().into_iter().find(|m| m.primary)
    }
}

/// In-memory wallet; one instance per billing screen.
#[derive(Debug, Clone, Default)]
pub struct MemoryWallet {
    methods: Vec<PaymentMethod>,
}

impl MemoryWallet {
    /// Creates an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wallet seeded with the sample cards the billing screen
    /// ships with: a default Visa ending 4242 and a Mastercard ending
    /// 8888.
    pub fn with_sample_data() -> Self {
        Self {
            methods: vec![
                PaymentMethod {
                    id: 1,
                    network: CardNetwork::Visa,
                    last4: String::from("4242"),
                    expiry: String::from("12/25"),
                    primary: true,
                },
                PaymentMethod {
                    id: 2,
                    network: CardNetwork::Mastercard,
                    last4: String::from("8888"),
                    expiry: String::from("06/26"),
                    primary: false,
                },
            ],
        }
    }

    /// Ids grow from the current maximum, so an id is never reused while
    /// a higher one exists.
    fn next_id(&self) -> u32 {
        self.methods.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }
}

impl WalletStore for MemoryWallet {
    fn list(&self) -> Vec<PaymentMethod> {
        self.methods.clone()
    }

    fn add(&mut self, method: StoredPaymentMethod) -> u32 {
        let id = self.next_id();
        if method.primary {
            for existing in &mut self.methods {
                existing.primary = false;
            }
        }
        debug!(id, network = %method.network, last4 = %method.last4, "payment method added");
        self.methods.push(PaymentMethod {
            id,
            network: method.network,
            last4: method.last4,
            expiry: method.expiry,
            primary: method.primary,
        });
        id
    }

    fn set_primary(&mut self, id: u32) -> Result<(), WalletError> {
        if !self.methods.iter().any(|m| m.id == id) {
            return Err(WalletError::UnknownId(id));
        }
        for method in &mut self.methods {
            method.primary = method.id == id;
        }
        debug!(id, "default payment method changed");
        Ok(())
    }

    fn remove(&mut self, id: u32) -> Result<(), WalletError> {
        let before = self.methods.len();
        self.methods.retain(|m| m.id != id);
        if self.methods.len() == before {
            return Err(WalletError::UnknownId(id));
        }
        debug!(id, "payment method removed");
        Ok(())
    }
}
