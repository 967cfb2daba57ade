//! State-change notifications for the presentation layer.
//!
//! Every controller operation that changes state returns an outcome value
//! and also emits events to registered observers, in this order:
//! the operation-specific event, `BalanceChanged`, then `ProgressChanged`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, PackId};

/// Something the presentation layer may want to re-render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Packs were bought and opened. `cards` is the aggregated result in
    /// first-seen order.
    PackOpened {
        pack: PackId,
        quantity: u32,
        cards: Vec<(CardId, u32)>,
    },

    /// One copy of a card was sold.
    CardSold {
        card: CardId,
        refund: f64,
        remaining: u32,
    },

    /// The collection was wiped and the balance restored.
    GameReset,

    BalanceChanged { stars: f64 },

    ProgressChanged {
        unique: usize,
        catalog_size: usize,
        percent: f64,
    },
}

type Observer = Box<dyn FnMut(&GameEvent)>;

/// Registered observers, called synchronously in registration order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Observer>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
