//! Collection game bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::cards::{CardId, JsonCatalog, PackId};
use crate::core::{GameConfig, GameState};
use crate::economy::{Economy, PendingSale, SaleStep};
use crate::persistence::FileStore;

/// Python wrapper around the economy controller and its game state.
///
/// Reads catalog documents from `data_root` and keeps the save slot in `save_dir`.
#[pyclass(name = "CollectionGame", unsendable)]
pub struct PyCollectionGame {
    economy: Economy<JsonCatalog, FileStore>,
    state: GameState,
    pending: Option<PendingSale>,
}

#[pymethods]
impl PyCollectionGame {
    /// Create a game, loading the save slot if one exists.
    ///
    /// # Arguments
    /// - data_root: Directory containing `packs/` and `cards/json/`
    /// - save_dir: Directory for the save slot file
    /// - shop_packs: Pack IDs offered in the shop
    /// - seed: Fixed RNG seed, or None for entropy
    #[new]
    #[pyo3(signature = (data_root, save_dir, shop_packs = vec!["pack_00001".to_string()], seed = None))]
    fn new(
        data_root: String,
        save_dir: String,
        shop_packs: Vec<String>,
        seed: Option<u64>,
    ) -> Self {
        let mut config = GameConfig::default()
            .with_data_root(data_root)
            .with_shop_packs(shop_packs);
        config.seed = seed;

        let catalog = JsonCatalog::new(config.data_root.clone());
        let store = FileStore::for_config(&save_dir, &config);
        let economy = Economy::new(catalog, store, config);
        let state = economy.load_or_new();
        Self {
            economy,
            state,
            pending: None,
        }
    }

    /// Current star balance.
    #[getter]
    fn stars(&self) -> f64 {
        self.state.stars
    }

    /// Distinct cards owned.
    #[getter]
    fn unique_cards(&self) -> usize {
        self.state.collection.unique_count()
    }

    /// Ownership percentage of the shop catalog.
    fn progress(&self) -> f64 {
        self.economy.global_progress(&self.state)
    }

    /// Copies owned of a card.
    fn owned(&self, card_id: &str) -> u32 {
        self.state.collection.owned_count(&CardId::new(card_id))
    }

    /// Buy packs. Returns `(card_id, times_drawn)` pairs.
    #[pyo3(signature = (pack_id, quantity = 1))]
    fn buy(&mut self, pack_id: &str, quantity: u32) -> PyResult<Vec<(String, u32)>> {
        let outcome = self
            .economy
            .purchase(&mut self.state, &PackId::new(pack_id), quantity)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(outcome
            .cards
            .entries()
            .iter()
            .map(|(card, n)| (card.to_string(), *n))
            .collect())
    }

    /// Sell one copy. Returns the confirmation prompt if this is the last
    /// copy (call `confirm_sale` or `cancel_sale`), otherwise None.
    fn sell(&mut self, card_id: &str) -> PyResult<Option<String>> {
        let step = self
            .economy
            .sell(&mut self.state, &CardId::new(card_id))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        match step {
            SaleStep::Committed(_) => Ok(None),
            SaleStep::NeedsConfirmation(pending) => {
                let prompt = pending.prompt();
                self.pending = Some(pending);
                Ok(Some(prompt))
            }
        }
    }

    /// Commit the pending last-copy sale. Returns the stars credited.
    fn confirm_sale(&mut self) -> PyResult<f64> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| PyRuntimeError::new_err("no sale awaiting confirmation"))?;
        let receipt = self
            .economy
            .confirm_sale(&mut self.state, pending)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(receipt.refund)
    }

    /// Drop the pending last-copy sale.
    fn cancel_sale(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Owned cards as `(card_id, name, count)`.
    fn collection(&self) -> Vec<(String, String, u32)> {
        self.economy
            .collection_listing(&self.state)
            .into_iter()
            .map(|entry| (entry.card.to_string(), entry.name, entry.count))
            .collect()
    }

    /// Grant the debug star bonus. Returns the new balance.
    fn add_stars(&mut self) -> f64 {
        self.economy.add_stars(&mut self.state);
        self.state.stars
    }

    /// Reset to a fresh game.
    fn reset(&mut self) {
        self.pending = None;
        self.economy.reset(&mut self.state);
    }

    fn __repr__(&self) -> String {
        format!("CollectionGame({})", self.economy.status(&self.state))
    }
}
