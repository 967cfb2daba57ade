//! Persistence: saving and loading the game state to a single slot.

pub mod store;

pub use store::{FileStore, MemoryStore, SaveFormat, SaveStore};
