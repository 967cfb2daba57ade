//! Error types for collection and economy operations.
//!
//! Each operation names its own error type. Catalog misses inside
//! multi-item computations (progress, listings) are skipped, not reported.

use thiserror::Error;

use crate::cards::{CardId, PackId};

/// Ledger precondition violations.
///
/// The economy controller checks ownership before releasing, so these
/// only surface when the ledger is driven directly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LedgerError {
    /// No copies of the card are owned.
    #[error("card {0} is not owned")]
    NotOwned(CardId),

    /// Tried to release more copies than are owned.
    #[error("cannot release {requested} copies of {card}: only {owned} owned")]
    InsufficientCopies {
        card: CardId,
        requested: u32,
        owned: u32,
    },
}

/// Why a pack purchase was rejected. State is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PurchaseError {
    /// The pack is not in the catalog (or its document could not be read).
    #[error("unknown pack {0}")]
    UnknownPack(PackId),

    /// Quantity must be at least one.
    #[error("purchase quantity must be at least 1")]
    InvalidQuantity,

    /// Balance does not cover `cost * quantity`.
    #[error("not enough stars: need {needed}, have {available}")]
    InsufficientFunds { needed: f64, available: f64 },
}

/// Why a sale was rejected. State is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SaleError {
    /// The player holds no copy of the card.
    #[error("card {0} is not owned")]
    CardNotOwned(CardId),

    /// The card definition could not be resolved, so no sale value is known.
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A catalog document that parsed but breaks the data model.
///
/// Catalog sources treat such a document as missing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CatalogError {
    /// A cost or sale value is negative or not finite.
    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("pack must have at least one draw slot")]
    NoDrawSlots,

    /// A table weight outside `[0, 1]`.
    #[error("weight {weight} for card {card} is outside [0, 1]")]
    InvalidWeight { card: CardId, weight: f64 },
}

/// Failures reading or writing the save slot.
///
/// A failed save is logged and leaves the in-memory state as is.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save slot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save slot JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save slot binary encoding failed: {0}")]
    Bincode(#[from] bincode::Error),

    /// The balance is NaN or infinite and would not survive a reload.
    #[error("star balance {0} is not a finite number")]
    NonFiniteBalance(f64),
}

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric setting is negative or not finite.
    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("save slot name must not be empty")]
    EmptySaveSlot,
}
