//! Pack authoring: turning raw per-card weights into a probability table.
//!
//! Authors classify each card by its type line, give every category a
//! relative weight, and normalize the weights so the table sums to 1.
//! Probabilities are rounded to 6 decimals, so a normalized table can sum
//! to slightly less than 1; the leftover is a (tiny) miss chance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::pack::PackEntry;

/// Card category derived from a type line such as `"Effect Monster"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Normal,
    Effect,
    Fusion,
    Synchro,
    Xyz,
    Link,
    Ritual,
    Pendulum,
    Spell,
    Trap,
    Other,
}

impl CardCategory {
    /// All categories, in reporting order.
    pub const ALL: [CardCategory; 11] = [
        CardCategory::Normal,
        CardCategory::Effect,
        CardCategory::Fusion,
        CardCategory::Synchro,
        CardCategory::Xyz,
        CardCategory::Link,
        CardCategory::Ritual,
        CardCategory::Pendulum,
        CardCategory::Spell,
        CardCategory::Trap,
        CardCategory::Other,
    ];

    /// Classify a type line.
    ///
    /// Checks are ordered: a "Pendulum Effect Monster" is `Pendulum`,
    /// a "Fusion Monster" is `Fusion`, and so on. Anything unrecognized
    /// is `Other`.
    #[must_use]
    pub fn classify(type_line: &str) -> Self {
        const ORDER: [(&str, CardCategory); 10] = [
            ("Spell", CardCategory::Spell),
            ("Trap", CardCategory::Trap),
            ("Fusion", CardCategory::Fusion),
            ("Synchro", CardCategory::Synchro),
            ("Xyz", CardCategory::Xyz),
            ("Link", CardCategory::Link),
            ("Ritual", CardCategory::Ritual),
            ("Pendulum", CardCategory::Pendulum),
            ("Normal", CardCategory::Normal),
            ("Effect", CardCategory::Effect),
        ];

        ORDER
            .iter()
            .find(|(needle, _)| type_line.contains(needle))
            .map_or(CardCategory::Other, |&(_, category)| category)
    }

    /// Default relative weight: common monsters dominate, everything else is rare.
    #[must_use]
    pub const fn default_weight(self) -> f64 {
        match self {
            CardCategory::Normal => 40.0,
            CardCategory::Effect => 5.0,
            _ => 1.0,
        }
    }
}

/// Normalize raw weights into probabilities rounded to 6 decimals.
///
/// Order is preserved. If every weight is zero the table is all zeros
/// (every slot misses).
#[must_use]
pub fn normalize_weights(raw: &[(CardId, f64)]) -> Vec<PackEntry> {
    let total: f64 = raw.iter().map(|(_, w)| w).sum();
    raw.iter()
        .map(|(card, weight)| {
            let probability = if total > 0.0 {
                round6(weight / total)
            } else {
                0.0
            };
            PackEntry::new(card.clone(), probability)
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Accumulates classified cards and produces a normalized table.
///
/// ## Example
///
/// ```
/// use star_packs::cards::{CardCategory, PackAuthoring};
///
/// let mut authoring = PackAuthoring::new();
/// authoring.add("a", "Normal Monster");
/// authoring.add("b", "Spell Card");
///
/// let entries = authoring.entries();
/// assert_eq!(entries.len(), 2);
/// assert!(entries[0].weight > entries[1].weight);
/// assert_eq!(authoring.report()[&CardCategory::Spell].len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PackAuthoring {
    cards: Vec<(CardId, CardCategory)>,
    overrides: BTreeMap<CardCategory, f64>,
}

impl PackAuthoring {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the weight of a category (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, category: CardCategory, weight: f64) -> Self {
        self.overrides.insert(category, weight);
        self
    }

    /// Weight currently applied to a category.
    #[must_use]
    pub fn weight_of(&self, category: CardCategory) -> f64 {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_weight())
    }

    /// Classify and add a card. Returns the category it landed in.
    pub fn add(&mut self, card: impl Into<CardId>, type_line: &str) -> CardCategory {
        let category = CardCategory::classify(type_line);
        self.cards.push((card.into(), category));
        category
    }

    /// Add a card with a known category.
    pub fn add_categorized(&mut self, card: impl Into<CardId>, category: CardCategory) {
        self.cards.push((card.into(), category));
    }

    /// Normalized probability table in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<PackEntry> {
        let raw: Vec<(CardId, f64)> = self
            .cards
            .iter()
            .map(|(card, category)| (card.clone(), self.weight_of(*category)))
            .collect();
        normalize_weights(&raw)
    }

    /// Cards grouped by category. Empty categories are omitted.
    #[must_use]
    pub fn report(&self) -> BTreeMap<CardCategory, Vec<CardId>> {
        let mut report: BTreeMap<CardCategory, Vec<CardId>> = BTreeMap::new();
        for (card, category) in &self.cards {
            report.entry(*category).or_default().push(card.clone());
        }
        report
    }
}
