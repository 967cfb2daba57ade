//! Core types: game state, configuration, RNG, errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use error::{CatalogError, ConfigError, LedgerError, PersistenceError, PurchaseError, SaleError};
pub use rng::{GameRng, UnitSource};
pub use state::GameState;
