//! Economy: turning stars into cards and cards back into stars.
//!
//! ## Key Types
//!
//! - `Economy`: the controller; owns catalog, save store, RNG, shop config
//! - `PurchaseOutcome`: what a purchase drew and spent
//! - `SaleStep` / `PendingSale` / `SaleReceipt`: the two-phase sale
//! - `GameEvent` / `EventBus`: notifications for the presentation layer
//! - `ShopItem` / `CollectionEntry` / `StatusLine`: read-only views

pub mod controller;
pub mod event;
pub mod listing;
pub mod sale;

pub use controller::{Economy, PurchaseOutcome};
pub use event::{EventBus, GameEvent};
pub use listing::{CollectionEntry, ShopItem, StatusLine};
pub use sale::{PendingSale, SaleReceipt, SaleStep};
