//! Two-phase sale values.
//!
//! Selling a card that is not the last copy commits immediately. Selling the
//! last copy stops at `PendingSale`; the presentation layer asks the user and
//! then either hands the pending sale back to `Economy::confirm_sale` or
//! drops it with `cancel`. Cancelling never touches state.
//!
//! ```text
//! Idle --sell (count > 1)--> Committed
//! Idle --sell (count == 1)--> PendingConfirmation --confirm--> Committed
//!                                                 --cancel---> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A sale of the final copy awaiting user confirmation.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "a pending sale does nothing until confirmed or cancelled"]
pub struct PendingSale {
    pub(crate) card: CardId,
    pub(crate) name: String,
    pub(crate) sale_value: f64,
}

impl PendingSale {
    /// Card being sold.
    #[must_use]
    pub fn card(&self) -> &CardId {
        &self.card
    }

    /// Display name of the card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stars that will be credited on confirmation.
    #[must_use]
    pub fn sale_value(&self) -> f64 {
        self.sale_value
    }

    /// Question to put to the user.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to sell your only copy of {}?",
            self.name
        )
    }

    /// Abandon the sale. Nothing was changed, so nothing is undone.
    pub fn cancel(self) {}
}

/// A completed sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub card: CardId,
    /// Stars credited.
    pub refund: f64,
    /// Copies still owned.
    pub remaining: u32,
    /// Balance after the credit.
    pub balance: f64,
    /// Whether the save slot was written.
    pub saved: bool,
}

/// Result of `Economy::sell`.
#[derive(Clone, Debug, PartialEq)]
pub enum SaleStep {
    /// The sale went through.
    Committed(SaleReceipt),
    /// The last copy is at stake; confirm or cancel.
    NeedsConfirmation(PendingSale),
}

impl SaleStep {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, SaleStep::Committed(_))
    }
}
