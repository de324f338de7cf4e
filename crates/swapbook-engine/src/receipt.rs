//! What a committed call returns.

use serde::{Deserialize, Serialize};
use swapbook_types::{OrderId, SwapEvent, SwapId, Transfer, TransactionId};

/// Result value of a committed call, with everything it emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReceipt<T> {
    pub transaction: TransactionId,
    pub value: T,
    /// Events in emission order.
    pub events: Vec<SwapEvent>,
    /// Transfers executed out of custody, in queue order.
    pub transfers: Vec<Transfer>,
}

impl<T> CallReceipt<T> {
    /// Total sent to refunds (`FundsReturned` events).
    #[must_use]
    pub fn returned(&self) -> u128 {
        self.events
            .iter()
            .map(|e| match e {
                SwapEvent::FundsReturned { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }
}

/// Outcome of creating a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateOutcome {
    Created {
        swap: SwapId,
        maker_order: OrderId,
        taker_order: OrderId,
    },
    /// One side rounded to nothing; the whole deposit went back.
    Dust { refunded: u128 },
}

impl CreateOutcome {
    #[must_use]
    pub fn swap(&self) -> Option<SwapId> {
        match self {
            Self::Created { swap, .. } => Some(*swap),
            Self::Dust { .. } => None,
        }
    }
}

/// Outcome of filling a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillOutcome {
    /// The whole swap settled.
    Settled { swap: SwapId },
    /// A slice was carved out of `parent` and settled.
    Partial {
        parent: SwapId,
        slice: SwapId,
        /// Maker asset paid to the taker.
        maker_share: u128,
        /// Taker asset paid to the maker.
        taker_amount: u128,
        /// The parent's remainder was dust and got cancelled.
        cleaned_up: bool,
    },
}

impl FillOutcome {
    /// The swap that actually settled.
    #[must_use]
    pub fn settled(&self) -> SwapId {
        match self {
            Self::Settled { swap } => *swap,
            Self::Partial { slice, .. } => *slice,
        }
    }
}

/// Outcome of a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LimitOrderOutcome {
    /// Fills against resting swaps, best price first.
    pub fills: Vec<FillOutcome>,
    /// Maker asset spent on those fills.
    pub spent: u128,
    /// Swap created for the unfilled remainder.
    pub resting: Option<SwapId>,
    /// Maker asset sent back (rounding and dust).
    pub refunded: u128,
}
