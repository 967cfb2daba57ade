//! Economy controller tests: purchases, two-phase sales, events, progress.

use std::cell::RefCell;
use std::rc::Rc;

use star_packs::cards::{CardDefinition, CardId, MemoryCatalog, PackDefinition, PackEntry, PackId};
use star_packs::core::{GameConfig, GameState, PersistenceError, PurchaseError, SaleError};
use star_packs::economy::{Economy, GameEvent, SaleStep};
use star_packs::persistence::{MemoryStore, SaveStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_pack(
            PackDefinition::new("p30", "Thirty Star Pack", 30.0, 5)
                .with_entry(PackEntry::new("common", 0.7))
                .with_entry(PackEntry::new("rare", 0.25))
                .with_entry(PackEntry::new("ultra", 0.05)),
        )
        .with_pack(
            PackDefinition::new("sure", "Single Card Pack", 10.0, 1)
                .with_entry(PackEntry::new("common", 1.0)),
        )
        .with_pack(
            PackDefinition::new("never", "Empty Table Pack", 5.0, 4),
        )
        .with_card(CardDefinition::new("common", "Common Card").with_sale_value(0.5))
        .with_card(CardDefinition::new("rare", "Rare Card").with_sale_value(3.0))
        .with_card(CardDefinition::new("ultra", "Ultra Rare Card").with_sale_value(10.0))
}

fn economy() -> Economy<MemoryCatalog, MemoryStore> {
    init_tracing();
    let config = GameConfig::default()
        .with_shop_packs(["p30", "sure"])
        .with_seed(2024);
    Economy::new(catalog(), MemoryStore::new(), config)
}

fn state_with(stars: f64, cards: &[(&str, u32)]) -> GameState {
    let mut state = GameState::new(stars);
    for &(card, count) in cards {
        state.collection.acquire(&CardId::new(card), count);
    }
    state
}

/// Store whose saves always fail.
struct BrokenStore;

impl SaveStore for BrokenStore {
    fn save(&mut self, _state: &GameState) -> Result<(), PersistenceError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        Ok(None)
    }
}

// =============================================================================
// Purchase
// =============================================================================

#[test]
fn test_purchase_debits_cost_times_quantity() {
    let mut economy = economy();
    let mut state = GameState::new(100.0);

    let outcome = economy
        .purchase(&mut state, &PackId::new("p30"), 2)
        .unwrap();

    assert_eq!(outcome.total_spent, 60.0);
    assert_eq!(outcome.balance, 40.0);
    assert_eq!(state.stars, 40.0);
    assert_eq!(outcome.quantity, 2);
    assert_eq!(outcome.draws.len(), 2);
}

#[test]
fn test_insufficient_funds_leaves_state_untouched() {
    let mut economy = economy();
    let mut state = state_with(50.0, &[("rare", 1)]);
    let before = state.clone();

    let err = economy
        .purchase(&mut state, &PackId::new("p30"), 2)
        .unwrap_err();

    assert_eq!(
        err,
        PurchaseError::InsufficientFunds {
            needed: 60.0,
            available: 50.0,
        }
    );
    assert_eq!(state, before);
    assert_eq!(economy.store().save_count(), 0);
}

#[test]
fn test_exact_balance_is_affordable() {
    let mut economy = economy();
    let mut state = GameState::new(30.0);

    economy.purchase(&mut state, &PackId::new("p30"), 1).unwrap();
    assert_eq!(state.stars, 0.0);
}

#[test]
fn test_unknown_pack_rejected_before_debit() {
    let mut economy = economy();
    let mut state = GameState::new(100.0);

    let err = economy
        .purchase(&mut state, &PackId::new("missing"), 1)
        .unwrap_err();

    assert_eq!(err, PurchaseError::UnknownPack(PackId::new("missing")));
    assert_eq!(state.stars, 100.0);
}

#[test]
fn test_drawn_cards_merge_into_ledger() {
    let mut economy = economy();
    let mut state = state_with(100.0, &[("rare", 2)]);

    let outcome = economy
        .purchase(&mut state, &PackId::new("p30"), 3)
        .unwrap();

    let drawn_rare = outcome.cards.count(&CardId::new("rare"));
    assert_eq!(state.collection.owned_count(&CardId::new("rare")), 2 + drawn_rare);
    assert_eq!(
        state.collection.owned_count(&CardId::new("common")),
        outcome.cards.count(&CardId::new("common"))
    );

    let flattened: u32 = outcome.draws.iter().map(|d| d.len() as u32).sum();
    assert_eq!(outcome.cards.total(), flattened);
    assert!(flattened <= 15);
}

#[test]
fn test_full_table_never_misses() {
    let mut economy = economy();
    let mut state = GameState::new(1000.0);

    let outcome = economy
        .purchase(&mut state, &PackId::new("sure"), 50)
        .unwrap();

    assert_eq!(outcome.cards.total(), 50);
    assert_eq!(state.collection.owned_count(&CardId::new("common")), 50);
    assert_eq!(state.stars, 500.0);
}

#[test]
fn test_empty_table_charges_but_draws_nothing() {
    let mut economy = economy();
    let mut state = GameState::new(10.0);

    let outcome = economy
        .purchase(&mut state, &PackId::new("never"), 2)
        .unwrap();

    assert!(outcome.cards.is_empty());
    assert_eq!(outcome.draws.len(), 2);
    assert!(state.collection.is_empty());
    assert_eq!(state.stars, 0.0);
}

#[test]
fn test_same_seed_same_pulls() {
    let mut first = economy();
    let mut second = economy();
    let mut s1 = GameState::new(300.0);
    let mut s2 = GameState::new(300.0);

    let o1 = first.purchase(&mut s1, &PackId::new("p30"), 10).unwrap();
    let o2 = second.purchase(&mut s2, &PackId::new("p30"), 10).unwrap();

    assert_eq!(o1.draws, o2.draws);
    assert_eq!(s1, s2);
}

#[test]
fn test_purchase_persists() {
    let mut economy = economy();
    let mut state = GameState::new(100.0);

    economy.purchase(&mut state, &PackId::new("sure"), 1).unwrap();

    assert_eq!(economy.store().load().unwrap(), Some(state));
}

#[test]
fn test_persistence_failure_keeps_memory_state() {
    init_tracing();
    let config = GameConfig::default().with_shop_packs(["sure"]).with_seed(1);
    let mut economy = Economy::new(catalog(), BrokenStore, config);
    let mut state = GameState::new(100.0);

    let outcome = economy
        .purchase(&mut state, &PackId::new("sure"), 1)
        .unwrap();

    assert!(!outcome.saved);
    assert_eq!(state.stars, 90.0);
    assert_eq!(state.collection.owned_count(&CardId::new("common")), 1);
}

#[test]
fn test_sale_and_debug_actions_report_failed_save() {
    init_tracing();
    let config = GameConfig::default().with_bonus_stars(5.0).with_seed(1);
    let mut economy = Economy::new(catalog(), BrokenStore, config);
    let mut state = state_with(0.0, &[("rare", 2)]);

    let SaleStep::Committed(receipt) = economy.sell(&mut state, &CardId::new("rare")).unwrap() else {
        panic!("duplicate sale should not need confirmation");
    };
    assert!(!receipt.saved);
    assert_eq!(state.stars, 3.0);
    assert_eq!(state.collection.owned_count(&CardId::new("rare")), 1);

    let SaleStep::NeedsConfirmation(pending) = economy.sell(&mut state, &CardId::new("rare")).unwrap() else {
        panic!("last copy should need confirmation");
    };
    let receipt = economy.confirm_sale(&mut state, pending).unwrap();
    assert!(!receipt.saved);
    assert_eq!(state.stars, 6.0);

    assert!(!economy.add_stars(&mut state));
    assert_eq!(state.stars, 11.0);

    assert!(!economy.reset(&mut state));
    assert_eq!(state, GameState::new(100.0));
}

// =============================================================================
// Sale
// =============================================================================

#[test]
fn test_sell_not_owned() {
    let mut economy = economy();
    let mut state = GameState::new(0.0);

    assert_eq!(
        economy.sell(&mut state, &CardId::new("rare")),
        Err(SaleError::CardNotOwned(CardId::new("rare")))
    );
    assert_eq!(economy.store().save_count(), 0);
}

#[test]
fn test_sell_duplicates_without_confirmation() {
    let mut economy = economy();
    let mut state = state_with(0.0, &[("rare", 3)]);
    let rare = CardId::new("rare");

    for expected_remaining in [2, 1] {
        assert!(!economy.is_last_copy(&state, &rare));
        match economy.sell(&mut state, &rare).unwrap() {
            SaleStep::Committed(receipt) => {
                assert_eq!(receipt.remaining, expected_remaining);
                assert_eq!(receipt.refund, 3.0);
                assert!(receipt.saved);
            }
            SaleStep::NeedsConfirmation(_) => panic!("duplicate sale should not need confirmation"),
        }
    }

    assert_eq!(state.collection.owned_count(&rare), 1);
    assert_eq!(state.stars, 6.0);
    assert!(economy.is_last_copy(&state, &rare));
}

#[test]
fn test_last_copy_cancel_changes_nothing() {
    let mut economy = economy();
    let mut state = state_with(5.0, &[("ultra", 1)]);
    let before = state.clone();

    let step = economy.sell(&mut state, &CardId::new("ultra")).unwrap();
    let SaleStep::NeedsConfirmation(pending) = step else {
        panic!("last copy should need confirmation");
    };

    assert_eq!(pending.name(), "Ultra Rare Card");
    assert_eq!(pending.sale_value(), 10.0);
    assert!(pending.prompt().contains("Ultra Rare Card"));

    pending.cancel();
    assert_eq!(state, before);
    assert_eq!(economy.store().save_count(), 0);
}

#[test]
fn test_last_copy_confirm_credits_and_removes() {
    let mut economy = economy();
    let mut state = state_with(5.0, &[("ultra", 1)]);
    let ultra = CardId::new("ultra");

    let SaleStep::NeedsConfirmation(pending) = economy.sell(&mut state, &ultra).unwrap() else {
        panic!("last copy should need confirmation");
    };
    let receipt = economy.confirm_sale(&mut state, pending).unwrap();

    assert_eq!(receipt.refund, 10.0);
    assert_eq!(receipt.remaining, 0);
    assert_eq!(state.stars, 15.0);
    assert!(!state.collection.contains(&ultra));
    assert_eq!(state.collection.unique_count(), 0);
    assert_eq!(economy.store().load().unwrap(), Some(state));
}

#[test]
fn test_confirm_after_card_gone_is_rejected() {
    let mut economy = economy();
    let mut state = state_with(0.0, &[("rare", 1)]);
    let rare = CardId::new("rare");

    let SaleStep::NeedsConfirmation(pending) = economy.sell(&mut state, &rare).unwrap() else {
        panic!("last copy should need confirmation");
    };

    economy.reset(&mut state);
    let stars = state.stars;

    assert_eq!(
        economy.confirm_sale(&mut state, pending),
        Err(SaleError::CardNotOwned(rare))
    );
    assert_eq!(state.stars, stars);
}

#[test]
fn test_card_without_value_sells_for_zero() {
    let catalog = catalog().with_card(CardDefinition::new("plain", "Plain Card"));
    let config = GameConfig::default().with_seed(3);
    let mut economy = Economy::new(catalog, MemoryStore::new(), config);
    let mut state = state_with(1.0, &[("plain", 2)]);

    let step = economy.sell(&mut state, &CardId::new("plain")).unwrap();
    assert!(step.is_committed());
    assert_eq!(state.stars, 1.0);
    assert_eq!(state.collection.owned_count(&CardId::new("plain")), 1);
}

// =============================================================================
// Events and progress
// =============================================================================

#[test]
fn test_events_emitted_after_purchase_and_sale() {
    let mut economy = economy();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    economy.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut state = GameState::new(100.0);
    economy.purchase(&mut state, &PackId::new("sure"), 2).unwrap();

    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[0],
            GameEvent::PackOpened {
                pack: PackId::new("sure"),
                quantity: 2,
                cards: vec![(CardId::new("common"), 2)],
            }
        );
        assert_eq!(seen[1], GameEvent::BalanceChanged { stars: 80.0 });
        assert_eq!(
            seen[2],
            GameEvent::ProgressChanged {
                unique: 1,
                catalog_size: 4,
                percent: 25.0,
            }
        );
    }

    economy.sell(&mut state, &CardId::new("common")).unwrap();
    let seen = events.borrow();
    assert_eq!(
        seen[3],
        GameEvent::CardSold {
            card: CardId::new("common"),
            refund: 0.5,
            remaining: 1,
        }
    );
}

#[test]
fn test_rejected_purchase_emits_nothing() {
    let mut economy = economy();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    economy.subscribe(move |_| *sink.borrow_mut() += 1);

    let mut state = GameState::new(0.0);
    assert!(economy.purchase(&mut state, &PackId::new("p30"), 1).is_err());
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_catalog_size_counts_shop_packs_without_dedup() {
    let mut economy = economy();
    // p30 has 3 rows, sure has 1 ("common" again).
    assert_eq!(economy.catalog_size(), 4);

    economy.set_shop_packs(vec![PackId::new("sure"), PackId::new("missing")]);
    assert_eq!(economy.catalog_size(), 1);

    economy.set_shop_packs(Vec::new());
    assert_eq!(economy.catalog_size(), 0);
    let state = state_with(0.0, &[("rare", 1)]);
    assert_eq!(economy.global_progress(&state), 0.0);
}

#[test]
fn test_progress_global_and_per_pack() {
    let economy = economy();
    let state = state_with(0.0, &[("common", 4), ("rare", 1)]);

    assert_eq!(economy.global_progress(&state), 50.0);

    let p30 = economy.pack_progress(&state, &PackId::new("p30")).unwrap();
    assert_eq!(p30.owned, 2);
    assert_eq!(p30.total, 3);
    assert_eq!(p30.percent, 66.7);

    assert!(economy.pack_progress(&state, &PackId::new("missing")).is_none());
}

// =============================================================================
// Views and debug actions
// =============================================================================

#[test]
fn test_shop_listing_skips_missing_packs() {
    let mut economy = economy();
    economy.set_shop_packs(vec![
        PackId::new("sure"),
        PackId::new("missing"),
        PackId::new("p30"),
    ]);

    let names: Vec<_> = economy.shop_listing().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Single Card Pack", "Thirty Star Pack"]);
}

#[test]
fn test_status_line() {
    let economy = economy();
    let state = state_with(12.346, &[("common", 2), ("rare", 1)]);

    assert_eq!(
        economy.status(&state).to_string(),
        "Stars: 12.35 | Cards: 2 / 4"
    );
}

#[test]
fn test_collection_listing_orders_numeric_ids_numerically() {
    init_tracing();
    let catalog = MemoryCatalog::new()
        .with_card(CardDefinition::new("1000", "Thousand"))
        .with_card(CardDefinition::new("900", "Nine Hundred"))
        .with_card(CardDefinition::new("token", "Token"));
    let economy = Economy::new(catalog, MemoryStore::new(), GameConfig::default().with_seed(1));
    let state = state_with(0.0, &[("token", 1), ("1000", 1), ("900", 2)]);

    let names: Vec<_> = economy
        .collection_listing(&state)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["Nine Hundred", "Thousand", "Token"]);
}

#[test]
fn test_add_stars_uses_configured_bonus() {
    init_tracing();
    let config = GameConfig::default().with_bonus_stars(25.0).with_seed(1);
    let mut economy = Economy::new(catalog(), MemoryStore::new(), config);
    let mut state = GameState::new(0.0);

    assert!(economy.add_stars(&mut state));
    assert!(economy.add_stars(&mut state));
    assert_eq!(state.stars, 50.0);
    assert_eq!(economy.store().save_count(), 2);
}

#[test]
fn test_load_or_new_prefers_saved_slot() {
    init_tracing();
    let mut store = MemoryStore::new();
    store.save(&state_with(7.0, &[("rare", 2)])).unwrap();

    let economy = Economy::new(catalog(), store, GameConfig::default().with_seed(1));
    let state = economy.load_or_new();

    assert_eq!(state.stars, 7.0);
    assert_eq!(state.collection.owned_count(&CardId::new("rare")), 2);
}

#[test]
fn test_load_or_new_fresh_game() {
    let economy = economy();
    let state = economy.load_or_new();
    assert_eq!(state, GameState::new(100.0));
}
