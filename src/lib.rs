//! # star-packs
//!
//! Pack-opening draw engine and collection ledger for a card collecting game.
//!
//! Players spend stars to open packs. Each pack is a weighted probability
//! table; every draw slot samples it once. Drawn cards merge into a ledger
//! of owned counts, and cards can be sold back for stars.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: `GameState` is a plain value passed by `&mut` into
//!    each controller call. No globals, so every test builds its own.
//!
//! 2. **Check, Then Mutate, Then Save**: Catalog lookups and affordability
//!    checks happen before any mutation; the save slot is written once
//!    after the in-memory update.
//!
//! 3. **Tables Are Taken Literally**: Weights are never normalized. Mass
//!    left uncovered is a per-slot miss; first cumulative crossing wins.
//!
//! ## Modules
//!
//! - `core`: Game state, configuration, RNG, errors
//! - `cards`: Card and pack definitions, catalog access, pack authoring
//! - `draw`: Weighted draw engine and draw aggregation
//! - `collection`: The owned-card ledger
//! - `economy`: Purchase/sale controller, events, views
//! - `progress`: Catalog size and ownership percentages
//! - `persistence`: Save slot stores

pub mod core;
pub mod cards;
pub mod draw;
pub mod collection;
pub mod economy;
pub mod progress;
pub mod persistence;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng, GameState, UnitSource,
    CatalogError, ConfigError, LedgerError, PersistenceError, PurchaseError, SaleError,
};

pub use crate::cards::{
    CardId, CardDefinition, PackId, PackDefinition, PackEntry,
    Catalog, MemoryCatalog, JsonCatalog,
    CardCategory, PackAuthoring,
};

pub use crate::draw::{DrawTally, PackDraw};

pub use crate::collection::Ledger;

pub use crate::economy::{
    Economy, PurchaseOutcome,
    PendingSale, SaleReceipt, SaleStep,
    EventBus, GameEvent,
    CollectionEntry, ShopItem, StatusLine,
};

pub use crate::progress::PackProgress;

pub use crate::persistence::{FileStore, MemoryStore, SaveFormat, SaveStore};
