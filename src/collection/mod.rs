//! The player's collection: owned card counts.

pub mod ledger;

pub use ledger::Ledger;
