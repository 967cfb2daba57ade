//! Pack opening: weighted draws and their aggregation.
//!
//! - `select` / `draw` / `draw_many`: pure functions of a table and a sample source
//! - `DrawTally`: the opened cards as a first-seen-ordered multiset

pub mod engine;
pub mod tally;

pub use engine::{draw, draw_many, select, PackDraw};
pub use tally::DrawTally;
