//! Game state: the star balance and the collection ledger.
//!
//! There is exactly one `GameState` per save slot. It is an ordinary owned
//! value: controller operations borrow it mutably, so two operations can
//! never interleave on the same state.
//!
//! The serialized form is the save-slot document:
//!
//! ```json
//! { "stars": 40.0, "collection": { "46986414": 2 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::collection::Ledger;

/// Balance and owned cards.
///
/// `Clone` is O(1) for the ledger, so snapshots are cheap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Star balance. Only purchases check it against zero.
    pub stars: f64,

    /// Owned cards.
    #[serde(default)]
    pub collection: Ledger,
}

impl GameState {
    /// Fresh state with a starting balance and an empty collection.
    #[must_use]
    pub fn new(starting_stars: f64) -> Self {
        Self {
            stars: starting_stars,
            collection: Ledger::new(),
        }
    }

    /// Replace a state with a given collection (builder pattern).
    #[must_use]
    pub fn with_collection(mut self, collection: Ledger) -> Self {
        self.collection = collection;
        self
    }

    /// Whether the balance covers an amount.
    #[must_use]
    pub fn can_afford(&self, amount: f64) -> bool {
        self.stars >= amount
    }

    /// Balance rounded to two decimals for display.
    #[must_use]
    pub fn display_stars(&self) -> String {
        format!("{:.2}", self.stars)
    }

    pub(crate) fn debit(&mut self, amount: f64) {
        self.stars -= amount;
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.stars += amount;
    }

    /// Back to a fresh state in place.
    pub(crate) fn reset(&mut self, starting_stars: f64) {
        self.stars = starting_stars;
        self.collection.clear();
    }
}
