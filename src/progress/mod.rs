//! Progress accounting: how much of the catalog the player owns.
//!
//! The catalog size is the sum of card-list lengths over the shop's packs.
//! It is not deduplicated: a card listed in two packs counts twice toward
//! the denominator, while the numerator (unique owned cards) counts it once.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{Catalog, PackDefinition, PackId};
use crate::collection::Ledger;

/// Sum of card-list lengths over `packs`. Packs that fail to resolve are skipped.
pub fn catalog_size<C: Catalog + ?Sized>(catalog: &C, packs: &[PackId]) -> usize {
    packs
        .iter()
        .filter_map(|id| {
            let pack = catalog.pack(id);
            if pack.is_none() {
                warn!(pack = %id, "pack missing from catalog, excluded from catalog size");
            }
            pack
        })
        .map(|pack| pack.len())
        .sum()
}

/// `unique / catalog_size * 100`, rounded to one decimal. 0 for an empty catalog.
#[must_use]
pub fn global_progress(ledger: &Ledger, catalog_size: usize) -> f64 {
    percentage(ledger.unique_count(), catalog_size)
}

/// Ownership within a single pack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackProgress {
    /// Card-list entries whose card is in the ledger.
    pub owned: usize,
    /// Card-list length.
    pub total: usize,
    /// `owned / total * 100`, one decimal.
    pub percent: f64,
}

/// Progress for one pack. Duplicate rows in a card list count separately.
#[must_use]
pub fn pack_progress(ledger: &Ledger, pack: &PackDefinition) -> PackProgress {
    let owned = pack.card_ids().filter(|id| ledger.contains(id)).count();
    let total = pack.len();
    PackProgress {
        owned,
        total,
        percent: percentage(owned, total),
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
