//! Observable outputs of engine calls.
//!
//! Events are collected per call and returned to the host only when the
//! call commits; an aborted call produces none.

use serde::{Deserialize, Serialize};

use crate::{Address, AssetId, OrderId, SwapId};

/// An outgoing movement of value from custody to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub asset: AssetId,
    pub amount: u128,
    pub destination: Address,
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.amount, self.asset, self.destination)
    }
}

/// Something that happened during a committed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapEvent {
    SwapCreated {
        swap: SwapId,
        maker_order: OrderId,
        taker_order: OrderId,
    },
    OrderFilled {
        order: OrderId,
    },
    OrderTransferred {
        order: OrderId,
        asset: AssetId,
        amount: u128,
        destination: Address,
    },
    OrderRefunded {
        order: OrderId,
    },
    SwapSuccess {
        swap: SwapId,
    },
    SwapCancelled {
        swap: SwapId,
    },
    /// A residual swap was force-cancelled because one side became dust.
    SwapCleanup {
        swap: SwapId,
    },
    /// Truncated or dust funds sent back to the caller.
    FundsReturned {
        asset: AssetId,
        amount: u128,
        destination: Address,
    },
}

impl SwapEvent {
    /// The swap this event concerns, if any.
    #[must_use]
    pub fn swap(&self) -> Option<SwapId> {
        match self {
            Self::SwapCreated { swap, .. }
            | Self::SwapSuccess { swap }
            | Self::SwapCancelled { swap }
            | Self::SwapCleanup { swap } => Some(*swap),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_accessor() {
        assert_eq!(SwapEvent::SwapSuccess { swap: SwapId(4) }.swap(), Some(SwapId(4)));
        assert_eq!(SwapEvent::OrderFilled { order: OrderId(2) }.swap(), None);
    }

    #[test]
    fn transfer_display() {
        let t = Transfer {
            asset: AssetId::new("cxa"),
            amount: 10,
            destination: Address::new("hx1"),
        };
        assert_eq!(format!("{t}"), "10 cxa -> hx1");
    }
}
