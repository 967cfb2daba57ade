//! The economy controller: purchases, sales, and the debug actions.
//!
//! ## Ordering
//!
//! Every operation takes `&mut GameState`, so two operations can never
//! interleave on one state. Within an operation:
//!
//! 1. catalog lookups and all checks happen first, with no state touched;
//! 2. balance and ledger are mutated in memory;
//! 3. the save slot is written once, after every in-memory step succeeded;
//! 4. observers are notified.
//!
//! A failed save is logged and reported in the outcome (`saved: false`);
//! the in-memory state is kept as the source of truth until the next save.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event::{EventBus, GameEvent};
use super::listing::{CollectionEntry, ShopItem, StatusLine};
use super::sale::{PendingSale, SaleReceipt, SaleStep};
use crate::cards::{CardId, Catalog, PackId};
use crate::core::error::{PurchaseError, SaleError};
use crate::core::{GameConfig, GameRng, GameState};
use crate::draw::{draw_many, DrawTally, PackDraw};
use crate::persistence::SaveStore;
use crate::progress::{self, PackProgress};

/// Result of a successful purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    pub pack: PackId,
    pub quantity: u32,
    /// `cost * quantity`.
    pub total_spent: f64,
    /// Raw draws, one list per opened pack.
    pub draws: Vec<PackDraw>,
    /// All draws aggregated in first-seen order.
    pub cards: DrawTally,
    /// Balance after the debit.
    pub balance: f64,
    /// Whether the save slot was written.
    pub saved: bool,
}

/// Orchestrates catalog, draw engine, ledger and save slot.
///
/// ## Example
///
/// ```
/// use star_packs::cards::{CardDefinition, MemoryCatalog, PackDefinition, PackEntry, PackId};
/// use star_packs::core::GameConfig;
/// use star_packs::economy::Economy;
/// use star_packs::persistence::MemoryStore;
///
/// let catalog = MemoryCatalog::new()
///     .with_pack(PackDefinition::new("starter", "Starter", 30.0, 3).with_entry(PackEntry::new("a", 1.0)))
///     .with_card(CardDefinition::new("a", "Card A").with_sale_value(1.0));
///
/// let config = GameConfig::default().with_shop_packs(["starter"]).with_seed(42);
/// let mut economy = Economy::new(catalog, MemoryStore::new(), config);
/// let mut state = economy.load_or_new();
///
/// let outcome = economy.purchase(&mut state, &PackId::new("starter"), 2).unwrap();
/// assert_eq!(outcome.total_spent, 60.0);
/// assert_eq!(state.stars, 40.0);
/// assert_eq!(outcome.cards.total(), 6);
/// ```
pub struct Economy<C: Catalog, S: SaveStore> {
    catalog: C,
    store: S,
    rng: GameRng,
    config: GameConfig,
    catalog_size: usize,
    events: EventBus,
}

impl<C: Catalog, S: SaveStore> Economy<C, S> {
    /// Build a controller. The catalog size is computed from the config's
    /// shop packs right away.
    pub fn new(catalog: C, store: S, config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let catalog_size = progress::catalog_size(&catalog, &config.shop_packs);
        debug!(
            seed = rng.seed(),
            catalog_size,
            packs = config.shop_packs.len(),
            "economy initialized"
        );
        Self {
            catalog,
            store,
            rng,
            config,
            catalog_size,
            events: EventBus::new(),
        }
    }

    /// Replace the RNG (builder pattern).
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Register an observer for state-change events.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) {
        self.events.subscribe(observer);
    }

    // === Startup ===

    /// Load the saved slot, or start a fresh game.
    ///
    /// A slot that fails to load is logged and treated as absent.
    pub fn load_or_new(&self) -> GameState {
        match self.store.load() {
            Ok(Some(state)) => {
                info!(
                    stars = state.stars,
                    unique = state.collection.unique_count(),
                    "loaded saved game"
                );
                state
            }
            Ok(None) => GameState::new(self.config.starting_stars),
            Err(err) => {
                warn!(error = %err, "failed to load saved game, starting fresh");
                GameState::new(self.config.starting_stars)
            }
        }
    }

    // === Shop configuration ===

    /// Packs on offer, in display order.
    #[must_use]
    pub fn shop_packs(&self) -> &[PackId] {
        &self.config.shop_packs
    }

    /// Replace the shop's pack list and recompute the catalog size.
    pub fn set_shop_packs(&mut self, packs: Vec<PackId>) {
        self.config.shop_packs = packs;
        self.refresh_catalog_size();
    }

    /// Recompute the catalog size from the current shop list.
    ///
    /// Call after the underlying catalog documents change.
    pub fn refresh_catalog_size(&mut self) -> usize {
        self.catalog_size = progress::catalog_size(&self.catalog, &self.config.shop_packs);
        self.catalog_size
    }

    /// Cached catalog size.
    #[must_use]
    pub fn catalog_size(&self) -> usize {
        self.catalog_size
    }

    // === Purchase ===

    /// Buy and open `quantity` packs.
    ///
    /// Fails with no state change if the pack is unknown, the quantity is
    /// zero, or the balance does not cover `cost * quantity`.
    pub fn purchase(
        &mut self,
        state: &mut GameState,
        pack_id: &PackId,
        quantity: u32,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let pack = self
            .catalog
            .pack(pack_id)
            .ok_or_else(|| PurchaseError::UnknownPack(pack_id.clone()))?;
        if quantity == 0 {
            return Err(PurchaseError::InvalidQuantity);
        }

        let total_cost = pack.cost * f64::from(quantity);
        if !state.can_afford(total_cost) {
            debug!(pack = %pack_id, total_cost, stars = state.stars, "purchase rejected");
            return Err(PurchaseError::InsufficientFunds {
                needed: total_cost,
                available: state.stars,
            });
        }

        state.debit(total_cost);
        let draws = draw_many(&pack, quantity, &mut self.rng);
        let mut cards = DrawTally::new();
        for card in draws.iter().flatten() {
            state.collection.acquire(card, 1);
            cards.record(card.clone());
        }

        info!(
            pack = %pack_id,
            quantity,
            total_cost,
            drawn = cards.total(),
            stars = state.stars,
            "packs opened"
        );

        let saved = self.commit(state);
        self.events.emit(&GameEvent::PackOpened {
            pack: pack_id.clone(),
            quantity,
            cards: cards.entries().to_vec(),
        });
        self.notify_totals(state);

        Ok(PurchaseOutcome {
            pack: pack_id.clone(),
            quantity,
            total_spent: total_cost,
            draws,
            cards,
            balance: state.stars,
            saved,
        })
    }

    // === Sale ===

    /// Whether selling this card would give up the final copy.
    #[must_use]
    pub fn is_last_copy(&self, state: &GameState, card: &CardId) -> bool {
        state.collection.owned_count(card) == 1
    }

    /// Sell one copy of a card.
    ///
    /// Commits immediately unless this is the last copy, in which case a
    /// `PendingSale` is returned and nothing changes until it is confirmed.
    pub fn sell(&mut self, state: &mut GameState, card: &CardId) -> Result<SaleStep, SaleError> {
        if state.collection.owned_count(card) == 0 {
            return Err(SaleError::CardNotOwned(card.clone()));
        }
        let definition = self
            .catalog
            .card(card)
            .ok_or_else(|| SaleError::UnknownCard(card.clone()))?;

        let pending = PendingSale {
            card: card.clone(),
            name: definition.name.clone(),
            sale_value: definition.sale_value(),
        };

        if self.is_last_copy(state, card) {
            debug!(card = %card, "last copy, awaiting confirmation");
            return Ok(SaleStep::NeedsConfirmation(pending));
        }
        self.complete_sale(state, pending).map(SaleStep::Committed)
    }

    /// Commit a sale previously returned as `NeedsConfirmation`.
    ///
    /// Ownership is checked again, since the state may have changed while
    /// the user was deciding.
    pub fn confirm_sale(
        &mut self,
        state: &mut GameState,
        pending: PendingSale,
    ) -> Result<SaleReceipt, SaleError> {
        if state.collection.owned_count(&pending.card) == 0 {
            return Err(SaleError::CardNotOwned(pending.card));
        }
        self.complete_sale(state, pending)
    }

    fn complete_sale(
        &mut self,
        state: &mut GameState,
        sale: PendingSale,
    ) -> Result<SaleReceipt, SaleError> {
        let remaining = state.collection.release(&sale.card, 1)?;
        state.credit(sale.sale_value);

        info!(
            card = %sale.card,
            refund = sale.sale_value,
            remaining,
            stars = state.stars,
            "card sold"
        );

        let saved = self.commit(state);
        self.events.emit(&GameEvent::CardSold {
            card: sale.card.clone(),
            refund: sale.sale_value,
            remaining,
        });
        self.notify_totals(state);

        Ok(SaleReceipt {
            card: sale.card,
            refund: sale.sale_value,
            remaining,
            balance: state.stars,
            saved,
        })
    }

    // === Debug actions ===

    /// Grant the configured bonus stars. Returns whether the save slot was written.
    pub fn add_stars(&mut self, state: &mut GameState) -> bool {
        state.credit(self.config.bonus_stars);
        let saved = self.commit(state);
        self.events.emit(&GameEvent::BalanceChanged { stars: state.stars });
        saved
    }

    /// Start over: starting balance, empty collection. Returns whether the
    /// save slot was written.
    pub fn reset(&mut self, state: &mut GameState) -> bool {
        state.reset(self.config.starting_stars);
        info!(stars = state.stars, "game reset");
        let saved = self.commit(state);
        self.events.emit(&GameEvent::GameReset);
        self.notify_totals(state);
        saved
    }

    // === Progress and views ===

    /// Unique owned cards as a percentage of the catalog size.
    #[must_use]
    pub fn global_progress(&self, state: &GameState) -> f64 {
        progress::global_progress(&state.collection, self.catalog_size)
    }

    /// Ownership within one pack; `None` if the pack cannot be resolved.
    #[must_use]
    pub fn pack_progress(&self, state: &GameState, pack: &PackId) -> Option<PackProgress> {
        let pack = self.catalog.pack(pack)?;
        Some(progress::pack_progress(&state.collection, &pack))
    }

    /// Shop packs that resolve, in configured order.
    #[must_use]
    pub fn shop_listing(&self) -> Vec<ShopItem> {
        self.config
            .shop_packs
            .iter()
            .filter_map(|id| self.catalog.pack(id))
            .map(|pack| ShopItem {
                pack: pack.id,
                name: pack.name,
                cost: pack.cost,
                draws_per_pack: pack.draws_per_pack,
            })
            .collect()
    }

    /// Owned cards with definitions. Cards whose definition cannot be
    /// resolved are skipped.
    ///
    /// Numeric IDs come first in numeric order (`"900"` before `"1000"`),
    /// then every other ID in lexical order, matching the browser save's
    /// key order.
    #[must_use]
    pub fn collection_listing(&self, state: &GameState) -> Vec<CollectionEntry> {
        let mut owned: Vec<(&CardId, u32)> = state.collection.iter().collect();
        owned.sort_by(|a, b| listing_key(a.0).cmp(&listing_key(b.0)));
        owned
            .into_iter()
            .filter_map(|(card, count)| {
                let Some(definition) = self.catalog.card(card) else {
                    warn!(card = %card, "card missing from catalog, skipped in listing");
                    return None;
                };
                Some(CollectionEntry {
                    card: card.clone(),
                    name: definition.name,
                    count,
                    value: definition.value,
                })
            })
            .collect()
    }

    /// Header counters.
    #[must_use]
    pub fn status(&self, state: &GameState) -> StatusLine {
        StatusLine {
            stars: state.stars,
            unique: state.collection.unique_count(),
            catalog_size: self.catalog_size,
        }
    }

    // === Internals ===

    /// Write the save slot. Failures are logged, never rolled back.
    fn commit(&mut self, state: &GameState) -> bool {
        match self.store.save(state) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to save game, in-memory state kept");
                false
            }
        }
    }

    fn notify_totals(&mut self, state: &GameState) {
        self.events.emit(&GameEvent::BalanceChanged { stars: state.stars });
        self.events.emit(&GameEvent::ProgressChanged {
            unique: state.collection.unique_count(),
            catalog_size: self.catalog_size,
            percent: self.global_progress(state),
        });
    }
}

/// Canonical unsigned integer IDs sort numerically ahead of all others.
fn listing_key(card: &CardId) -> (bool, u32, &str) {
    let id = card.as_str();
    match id.parse::<u32>() {
        Ok(n) if n != u32::MAX && n.to_string() == id => (false, n, id),
        _ => (true, 0, id),
    }
}

impl<C: Catalog, S: SaveStore> std::fmt::Debug for Economy<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Economy")
            .field("config", &self.config)
            .field("catalog_size", &self.catalog_size)
            .field("seed", &self.rng.seed())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
