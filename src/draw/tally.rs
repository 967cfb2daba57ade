//! Aggregating draws into a multiset for presentation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// How many times each card came up, in first-seen order.
///
/// ```
/// use star_packs::cards::CardId;
/// use star_packs::draw::DrawTally;
///
/// let mut tally = DrawTally::new();
/// tally.record(CardId::new("b"));
/// tally.record(CardId::new("a"));
/// tally.record(CardId::new("b"));
///
/// assert_eq!(tally.count(&CardId::new("b")), 2);
/// assert_eq!(tally.entries()[0].0, CardId::new("b"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(CardId, u32)>", into = "Vec<(CardId, u32)>")]
pub struct DrawTally {
    entries: Vec<(CardId, u32)>,
    index: FxHashMap<CardId, usize>,
}

impl DrawTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a card.
    pub fn record(&mut self, card: CardId) {
        self.record_many(card, 1);
    }

    /// Count `n` occurrences of a card. Zero is a no-op.
    pub fn record_many(&mut self, card: CardId, n: u32) {
        if n == 0 {
            return;
        }
        match self.index.get(&card) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(n),
            None => {
                self.index.insert(card.clone(), self.entries.len());
                self.entries.push((card, n));
            }
        }
    }

    /// Occurrences of a card; 0 if it never came up.
    #[must_use]
    pub fn count(&self, card: &CardId) -> u32 {
        self.index.get(card).map_or(0, |&i| self.entries[i].1)
    }

    /// `(card, times drawn)` in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[(CardId, u32)] {
        &self.entries
    }

    /// Distinct cards drawn.
    #[must_use]
    pub fn unique(&self) -> usize {
        self.entries.len()
    }

    /// Total cards drawn.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().fold(0, |acc, (_, n)| acc.saturating_add(*n))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CardId> for DrawTally {
    fn from_iter<T: IntoIterator<Item = CardId>>(iter: T) -> Self {
        let mut tally = DrawTally::new();
        for card in iter {
            tally.record(card);
        }
        tally
    }
}

impl From<Vec<(CardId, u32)>> for DrawTally {
    fn from(entries: Vec<(CardId, u32)>) -> Self {
        let mut tally = DrawTally::new();
        for (card, count) in entries {
            tally.record_many(card, count);
        }
        tally
    }
}

impl From<DrawTally> for Vec<(CardId, u32)> {
    fn from(tally: DrawTally) -> Self {
        tally.entries
    }
}
