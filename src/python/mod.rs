//! Python bindings for the star-packs collection game.
//!
//! # Quick Start
//!
//! ```python
//! import star_packs
//!
//! game = star_packs.CollectionGame("data", "saves", seed=42)
//!
//! # Open two packs
//! pulled = game.buy("pack_00001", 2)
//!
//! # Selling the last copy asks for confirmation
//! prompt = game.sell(pulled[0][0])
//! if prompt is not None:
//!     game.confirm_sale()
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// star-packs: pack opening and collection management.
#[pymodule]
fn star_packs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCollectionGame>()?;
    Ok(())
}
