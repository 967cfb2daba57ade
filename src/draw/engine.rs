//! Weighted draws from a pack's probability table.
//!
//! ## Algorithm
//!
//! For each slot, sample `u` uniformly from `[0, 1)` and walk the table in
//! order, accumulating weights. The first entry whose running total is
//! `>= u` wins. If the running total never reaches `u` the slot is empty
//! and is dropped from the result (no retry, no error).
//!
//! Tables are never normalized: a table summing to 0.9 misses 10% of the
//! time, and in an over-allocated table every entry past the point where
//! the total reaches 1 is unreachable.

use smallvec::SmallVec;

use crate::cards::{CardId, PackDefinition, PackEntry};
use crate::core::rng::UnitSource;

/// Cards produced by opening one pack. Length is at most `draws_per_pack`.
pub type PackDraw = SmallVec<[CardId; 8]>;

/// Resolve a single sample against a table.
///
/// Returns the first entry whose cumulative weight crosses `sample`,
/// or `None` if the sample falls in the uncovered mass.
///
/// ```
/// use star_packs::cards::PackEntry;
/// use star_packs::draw::select;
///
/// let table = [PackEntry::new("a", 0.5), PackEntry::new("b", 0.3)];
///
/// assert_eq!(select(&table, 0.5).map(|c| c.as_str()), Some("a"));
/// assert_eq!(select(&table, 0.7).map(|c| c.as_str()), Some("b"));
/// assert_eq!(select(&table, 0.9), None);
/// ```
#[must_use]
pub fn select(entries: &[PackEntry], sample: f64) -> Option<&CardId> {
    let mut cumulative = 0.0;
    for entry in entries {
        cumulative += entry.weight;
        if sample <= cumulative {
            return Some(&entry.card_id);
        }
    }
    None
}

/// Open one pack: one sample per draw slot, misses dropped.
pub fn draw<R: UnitSource + ?Sized>(pack: &PackDefinition, rng: &mut R) -> PackDraw {
    let mut cards = PackDraw::new();
    for _ in 0..pack.draws_per_pack {
        let sample = rng.sample_unit();
        if let Some(card) = select(&pack.entries, sample) {
            cards.push(card.clone());
        }
    }
    cards
}

/// Open `quantity` packs independently.
pub fn draw_many<R: UnitSource + ?Sized>(
    pack: &PackDefinition,
    quantity: u32,
    rng: &mut R,
) -> Vec<PackDraw> {
    (0..quantity).map(|_| draw(pack, rng)).collect()
}
