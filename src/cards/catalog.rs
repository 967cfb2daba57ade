//! Catalog access: resolving pack and card identifiers to definitions.
//!
//! Two backends:
//!
//! - `MemoryCatalog`: definitions registered in code (tests, bindings)
//! - `JsonCatalog`: one JSON document per identifier on disk, laid out as
//!   `{root}/packs/{pack_id}.json` and `{root}/cards/json/{card_id}.json`
//!
//! A lookup that fails for any reason (missing file, unreadable file,
//! malformed document, document that fails `validate`) is reported as
//! `None`. Callers do not distinguish "missing" from "unreachable".

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::definition::{CardDefinition, CardId};
use super::pack::{PackDefinition, PackId};

/// Lookup of static pack and card definitions.
pub trait Catalog {
    /// Resolve a pack definition.
    fn pack(&self, id: &PackId) -> Option<PackDefinition>;

    /// Resolve a card definition.
    fn card(&self, id: &CardId) -> Option<CardDefinition>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn pack(&self, id: &PackId) -> Option<PackDefinition> {
        (**self).pack(id)
    }

    fn card(&self, id: &CardId) -> Option<CardDefinition> {
        (**self).card(id)
    }
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use star_packs::cards::{Catalog, CardDefinition, CardId, MemoryCatalog};
///
/// let catalog = MemoryCatalog::new()
///     .with_card(CardDefinition::new("46986414", "Dark Magician").with_sale_value(2.0));
///
/// let found = catalog.card(&CardId::new("46986414")).unwrap();
/// assert_eq!(found.name, "Dark Magician");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    packs: FxHashMap<PackId, PackDefinition>,
    cards: FxHashMap<CardId, CardDefinition>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pack, replacing any previous definition with the same ID.
    pub fn insert_pack(&mut self, pack: PackDefinition) -> Option<PackDefinition> {
        self.packs.insert(pack.id.clone(), pack)
    }

    /// Register a card, replacing any previous definition with the same ID.
    pub fn insert_card(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.id.clone(), card)
    }

    /// Register a pack (builder pattern).
    #[must_use]
    pub fn with_pack(mut self, pack: PackDefinition) -> Self {
        self.insert_pack(pack);
        self
    }

    /// Register a card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.insert_card(card);
        self
    }

    /// Remove a pack. Returns the removed definition.
    pub fn remove_pack(&mut self, id: &PackId) -> Option<PackDefinition> {
        self.packs.remove(id)
    }

    /// Number of registered packs.
    #[must_use]
    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }

    /// Number of registered cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

impl Catalog for MemoryCatalog {
    fn pack(&self, id: &PackId) -> Option<PackDefinition> {
        self.packs.get(id).cloned()
    }

    fn card(&self, id: &CardId) -> Option<CardDefinition> {
        self.cards.get(id).cloned()
    }
}

/// Catalog backed by per-entity JSON documents.
#[derive(Clone, Debug)]
pub struct JsonCatalog {
    root: PathBuf,
}

impl JsonCatalog {
    /// Create a catalog reading documents below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a pack document.
    #[must_use]
    pub fn pack_path(&self, id: &PackId) -> PathBuf {
        self.root.join("packs").join(format!("{}.json", id.as_str()))
    }

    /// Path of a card document.
    #[must_use]
    pub fn card_path(&self, id: &CardId) -> PathBuf {
        self.root
            .join("cards")
            .join("json")
            .join(format!("{}.json", id.as_str()))
    }

    fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read catalog document");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(doc) => Some(doc),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed catalog document");
                None
            }
        }
    }
}

impl Catalog for JsonCatalog {
    fn pack(&self, id: &PackId) -> Option<PackDefinition> {
        let path = self.pack_path(id);
        debug!(pack = %id, path = %path.display(), "loading pack definition");
        let mut pack: PackDefinition = Self::read_document(&path)?;
        if let Err(err) = pack.validate() {
            warn!(path = %path.display(), error = %err, "invalid pack document");
            return None;
        }
        pack.id = id.clone();
        Some(pack)
    }

    fn card(&self, id: &CardId) -> Option<CardDefinition> {
        let path = self.card_path(id);
        let mut card: CardDefinition = Self::read_document(&path)?;
        if let Err(err) = card.validate() {
            warn!(path = %path.display(), error = %err, "invalid card document");
            return None;
        }
        card.id = id.clone();
        Some(card)
    }
}
