//! The collection ledger: owned card identifiers and their counts.
//!
//! ## Invariant
//!
//! Every present key has a count of at least 1. Releasing the last copy
//! removes the entry, so "owns the card" is exactly "key present".
//!
//! Backed by an `im::OrdMap`, so cloning a ledger for a snapshot is O(1)
//! and iteration order is stable (sorted by card ID).

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::error::LedgerError;

/// Owned card counts.
///
/// ## Example
///
/// ```
/// use star_packs::cards::CardId;
/// use star_packs::collection::Ledger;
///
/// let mut ledger = Ledger::new();
/// let card = CardId::new("46986414");
///
/// ledger.acquire(&card, 2);
/// assert_eq!(ledger.owned_count(&card), 2);
///
/// ledger.release(&card, 2).unwrap();
/// assert!(!ledger.contains(&card));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrdMap<CardId, u32>", into = "OrdMap<CardId, u32>")]
pub struct Ledger {
    owned: OrdMap<CardId, u32>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of a card, creating the entry if needed.
    ///
    /// Returns the new owned count. Acquiring zero copies is a no-op.
    pub fn acquire(&mut self, card: &CardId, count: u32) -> u32 {
        if count == 0 {
            return self.owned_count(card);
        }
        let owned = self.owned_count(card).saturating_add(count);
        self.owned.insert(card.clone(), owned);
        owned
    }

    /// Remove `count` copies of a card.
    ///
    /// Returns the remaining count; the entry is removed when it reaches 0.
    /// Fails without changing anything if the card is not owned or fewer
    /// than `count` copies are held.
    pub fn release(&mut self, card: &CardId, count: u32) -> Result<u32, LedgerError> {
        let owned = self.owned_count(card);
        if owned == 0 {
            return Err(LedgerError::NotOwned(card.clone()));
        }
        if count > owned {
            return Err(LedgerError::InsufficientCopies {
                card: card.clone(),
                requested: count,
                owned,
            });
        }

        let remaining = owned - count;
        if remaining == 0 {
            self.owned.remove(card);
        } else {
            self.owned.insert(card.clone(), remaining);
        }
        Ok(remaining)
    }

    /// Copies owned; 0 if absent.
    #[must_use]
    pub fn owned_count(&self, card: &CardId) -> u32 {
        self.owned.get(card).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.owned.contains_key(card)
    }

    /// Number of distinct cards owned.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.owned.len()
    }

    /// Total copies across all cards.
    #[must_use]
    pub fn total_copies(&self) -> u64 {
        self.owned.values().map(|&c| u64::from(c)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    /// Iterate over `(card, count)` in card ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, u32)> {
        self.owned.iter().map(|(card, &count)| (card, count))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.owned.clear();
    }
}

impl From<OrdMap<CardId, u32>> for Ledger {
    /// Zero counts are dropped so a hand-edited save cannot break the invariant.
    fn from(map: OrdMap<CardId, u32>) -> Self {
        Self {
            owned: map.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }
}

impl From<Ledger> for OrdMap<CardId, u32> {
    fn from(ledger: Ledger) -> Self {
        ledger.owned
    }
}

impl FromIterator<(CardId, u32)> for Ledger {
    fn from_iter<T: IntoIterator<Item = (CardId, u32)>>(iter: T) -> Self {
        let mut ledger = Ledger::new();
        for (card, count) in iter {
            ledger.acquire(&card, count);
        }
        ledger
    }
}
