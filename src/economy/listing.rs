//! Read-only views the presentation layer renders: shop, collection, status bar.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, PackId};

/// One pack offered in the shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub pack: PackId,
    pub name: String,
    pub cost: f64,
    pub draws_per_pack: u32,
}

/// One owned card with its definition resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub card: CardId,
    pub name: String,
    pub count: u32,
    /// Listed sale value, if the card has one.
    pub value: Option<f64>,
}

impl CollectionEntry {
    /// More than one copy owned.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.count > 1
    }
}

/// Header counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusLine {
    pub stars: f64,
    pub unique: usize,
    pub catalog_size: usize,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stars: {:.2} | Cards: {} / {}",
            self.stars, self.unique, self.catalog_size
        )
    }
}
