//! Card catalog: definitions, packs, and lookup.
//!
//! ## Key Types
//!
//! - `CardId` / `CardDefinition`: a collectible card and its sale value
//! - `PackId` / `PackDefinition`: a purchasable pack and its probability table
//! - `Catalog`: identifier lookup, in memory or from JSON documents
//! - `PackAuthoring`: building normalized tables from card categories

pub mod authoring;
pub mod catalog;
pub mod definition;
pub mod pack;

pub use authoring::{normalize_weights, CardCategory, PackAuthoring};
pub use catalog::{Catalog, JsonCatalog, MemoryCatalog};
pub use definition::{CardDefinition, CardId};
pub use pack::{PackDefinition, PackEntry, PackId};
