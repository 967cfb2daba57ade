//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its display
//! name and how many stars it sells back for. How many copies the player
//! owns lives in the `Ledger`, not here.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::core::error::CatalogError;

/// Identifier for a card definition.
///
/// Catalog documents are addressed by this string (e.g. `"89631139"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Static card definition.
///
/// Deserializes from the per-card catalog document:
///
/// ```json
/// { "name": "Dark Magician", "valor": 2.5 }
/// ```
///
/// The identifier is not part of the document; the catalog fills it in
/// from the path it loaded.
///
/// ## Example
///
/// ```
/// use star_packs::cards::{CardDefinition, CardId};
///
/// let card = CardDefinition::new("46986414", "Dark Magician").with_sale_value(2.5);
///
/// assert_eq!(card.id, CardId::new("46986414"));
/// assert_eq!(card.sale_value(), 2.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Identifier for this card definition.
    #[serde(default)]
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Stars credited when one copy is sold. `None` means the card has no
    /// listed value.
    #[serde(rename = "valor", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl CardDefinition {
    /// Create a new card definition with no sale value.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
        }
    }

    /// Set the sale value (builder pattern).
    #[must_use]
    pub fn with_sale_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Stars credited per copy sold; an unlisted value sells for nothing.
    #[must_use]
    pub fn sale_value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    /// A listed sale value must be a non-negative finite number.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self.value {
            Some(value) if !value.is_finite() || value < 0.0 => {
                Err(CatalogError::InvalidAmount {
                    field: "valor",
                    value,
                })
            }
            _ => Ok(()),
        }
    }
}
