//! Swap: a maker order paired with a taker order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, OrderId, Result, SwapId, SwapbookError, TransactionId};

/// Lifecycle status of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    Pending,
    Cancelled,
    Success,
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Success => write!(f, "SUCCESS"),
        }
    }
}

/// A maker order waiting for (or matched with) a taker order.
///
/// Orders are referenced by id; the order table owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub id: SwapId,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Account that created the swap.
    pub maker_address: Address,
    pub status: SwapStatus,
    pub timestamp_create: DateTime<Utc>,
    /// Settlement time, `None` until the swap succeeds.
    pub timestamp_swap: Option<DateTime<Utc>>,
    /// Transaction that settled or cancelled the swap.
    pub transaction: Option<TransactionId>,
    /// Private swaps are reserved for one taker and never listed in the market.
    pub private: bool,
}

impl Swap {
    #[must_use]
    pub fn new(
        id: SwapId,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        maker_address: Address,
        timestamp_create: DateTime<Utc>,
        private: bool,
    ) -> Self {
        Self {
            id,
            maker_order_id,
            taker_order_id,
            maker_address,
            status: SwapStatus::Pending,
            timestamp_create,
            timestamp_swap: None,
            transaction: None,
            private,
        }
    }

    pub fn check_status(&self, expected: SwapStatus) -> Result<()> {
        if self.status != expected {
            return Err(SwapbookError::InvalidSwapStatus {
                swap: self.id,
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    pub fn check_maker_address(&self, caller: &Address) -> Result<()> {
        if self.maker_address != *caller {
            return Err(SwapbookError::Unauthorized {
                swap: self.id,
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// PENDING → SUCCESS.
    pub fn mark_success(&mut self, transaction: TransactionId, at: DateTime<Utc>) -> Result<()> {
        self.check_status(SwapStatus::Pending)?;
        self.status = SwapStatus::Success;
        self.transaction = Some(transaction);
        self.timestamp_swap = Some(at);
        Ok(())
    }

    /// PENDING → CANCELLED.
    pub fn mark_cancelled(&mut self, transaction: TransactionId) -> Result<()> {
        self.check_status(SwapStatus::Pending)?;
        self.status = SwapStatus::Cancelled;
        self.transaction = Some(transaction);
        Ok(())
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.private
    }
}
