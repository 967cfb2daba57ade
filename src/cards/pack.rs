//! Pack definitions - purchasable bundles of weighted draws.
//!
//! A pack document looks like:
//!
//! ```json
//! {
//!     "name": "Legend of Blue Eyes",
//!     "cost": 30,
//!     "cards_per_pack": 9,
//!     "card_list": [
//!         { "card_id": "89631139", "probability": 0.01 },
//!         { "card_id": "46986414", "probability": 0.05 }
//!     ]
//! }
//! ```
//!
//! Probabilities are read as a cumulative table in list order. They are
//! not required to sum to 1: whatever mass is left uncovered is the chance
//! that a slot yields no card.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::error::CatalogError;

/// Identifier for a pack definition (e.g. `"pack_00001"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(pub String);

impl PackId {
    /// Create a new pack ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One row of a pack's probability table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackEntry {
    pub card_id: CardId,

    /// Weight in `[0, 1]`.
    #[serde(rename = "probability")]
    pub weight: f64,
}

impl PackEntry {
    #[must_use]
    pub fn new(card_id: impl Into<CardId>, weight: f64) -> Self {
        Self {
            card_id: card_id.into(),
            weight,
        }
    }
}

/// Static pack definition.
///
/// ## Example
///
/// ```
/// use star_packs::cards::{PackDefinition, PackEntry};
///
/// let pack = PackDefinition::new("starter", "Starter Pack", 30.0, 5)
///     .with_entry(PackEntry::new("a", 0.7))
///     .with_entry(PackEntry::new("b", 0.3));
///
/// assert_eq!(pack.len(), 2);
/// assert!((pack.total_weight() - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackDefinition {
    /// Identifier; filled in by the catalog, not stored in the document.
    #[serde(default)]
    pub id: PackId,

    /// Display name.
    pub name: String,

    /// Stars charged per pack.
    pub cost: f64,

    /// Draw slots per opened pack.
    #[serde(rename = "cards_per_pack")]
    pub draws_per_pack: u32,

    /// Ordered probability table.
    #[serde(rename = "card_list", default)]
    pub entries: Vec<PackEntry>,
}

impl PackDefinition {
    /// Create a pack with an empty card list.
    #[must_use]
    pub fn new(
        id: impl Into<PackId>,
        name: impl Into<String>,
        cost: f64,
        draws_per_pack: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            draws_per_pack,
            entries: Vec::new(),
        }
    }

    /// Append a table row (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, entry: PackEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Replace the whole table (builder pattern).
    #[must_use]
    pub fn with_entries(mut self, entries: Vec<PackEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Number of rows in the card list. Duplicate rows count separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights. Anything below 1.0 is the per-slot miss chance.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Whether the card appears anywhere in this pack's table.
    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.entries.iter().any(|e| &e.card_id == card)
    }

    /// Iterate over the card IDs in table order.
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.entries.iter().map(|e| &e.card_id)
    }

    /// Check cost, draw count and every weight.
    ///
    /// The total weight is not checked; over- and under-allocated tables
    /// are both legal.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(CatalogError::InvalidAmount {
                field: "cost",
                value: self.cost,
            });
        }
        if self.draws_per_pack == 0 {
            return Err(CatalogError::NoDrawSlots);
        }
        match self
            .entries
            .iter()
            .find(|e| !(0.0..=1.0).contains(&e.weight))
        {
            Some(entry) => Err(CatalogError::InvalidWeight {
                card: entry.card_id.clone(),
                weight: entry.weight,
            }),
            None => Ok(()),
        }
    }
}
