//! Order: one side of a swap.
//!
//! An order holds the funds one party deposited (or is expected to
//! deposit) and walks a small state machine:
//!
//! ```text
//! EMPTY --fill--> FILLED --settle--> SUCCESS
//!   |               |
//!   |             empty (refund)
//!   |               v
//!   +---cancel--> EMPTY --cancel--> CANCELLED
//! ```

use serde::{Deserialize, Serialize};

use crate::{Address, AssetId, OrderId, Result, SwapbookError};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Funds not yet deposited by this side.
    Empty,
    /// Funds deposited, awaiting the counterparty.
    Filled,
    /// Funds refunded; terminal.
    Cancelled,
    /// Funds transferred to the counterparty; terminal.
    Success,
}

impl OrderStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Success)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "EMPTY"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Success => write!(f, "SUCCESS"),
        }
    }
}

/// One side of a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub asset: AssetId,
    /// Remaining amount, in the asset's smallest unit.
    pub amount: u128,
    pub status: OrderStatus,
    /// Who deposited (or is reserved to deposit) the funds. `None` lets any
    /// address fill the order.
    pub provider: Option<Address>,
}

impl Order {
    /// A fresh EMPTY order, optionally reserved for one provider.
    #[must_use]
    pub fn new(id: OrderId, asset: AssetId, amount: u128, provider: Option<Address>) -> Self {
        Self {
            id,
            asset,
            amount,
            status: OrderStatus::Empty,
            provider,
        }
    }

    // =================================================================
    // Checks
    // =================================================================

    pub fn check_status(&self, expected: OrderStatus) -> Result<()> {
        if self.status != expected {
            return Err(SwapbookError::InvalidOrderStatus {
                order: self.id,
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    /// Accepts any positive `amount` up to the remaining order amount.
    pub fn check_content(&self, asset: &AssetId, amount: u128) -> Result<()> {
        if self.asset != *asset || amount == 0 || amount > self.amount {
            return Err(SwapbookError::ContentMismatch {
                order: self.id,
                expected_asset: self.asset.clone(),
                expected_amount: self.amount,
                asset: asset.clone(),
                amount,
            });
        }
        Ok(())
    }

    pub fn check_provider(&self, provider: &Address) -> Result<()> {
        match &self.provider {
            Some(reserved) if reserved != provider => Err(SwapbookError::ProviderMismatch {
                order: self.id,
                expected: reserved.clone(),
                actual: provider.clone(),
            }),
            _ => Ok(()),
        }
    }

    // =================================================================
    // Transitions
    // =================================================================

    /// EMPTY → FILLED, recording who provided the funds.
    pub fn fill(&mut self, provider: Address) -> Result<()> {
        self.check_status(OrderStatus::Empty)?;
        self.provider = Some(provider);
        self.status = OrderStatus::Filled;
        Ok(())
    }

    /// Shrink the remaining amount after part of it was traded.
    pub fn partial_fill(&mut self, consumed: u128) -> Result<()> {
        self.amount = self
            .amount
            .checked_sub(consumed)
            .ok_or(SwapbookError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Funds left the order: clear the provider and go back to EMPTY.
    pub fn empty(&mut self) {
        self.provider = None;
        self.status = OrderStatus::Empty;
    }

    /// FILLED → SUCCESS.
    pub fn mark_success(&mut self) -> Result<()> {
        self.check_status(OrderStatus::Filled)?;
        self.status = OrderStatus::Success;
        Ok(())
    }

    /// EMPTY → CANCELLED. A filled order must be refunded and emptied first.
    pub fn mark_cancelled(&mut self) -> Result<()> {
        self.check_status(OrderStatus::Empty)?;
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy(id: u64, asset: &str, amount: u128) -> Self {
        Self::new(OrderId(id), AssetId::new(asset), amount, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_sets_provider_and_status() {
        let mut order = Order::dummy(1, "cxa", 100);
        order.fill(Address::new("hx1")).unwrap();
        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.provider, Some(Address::new("hx1")));
    }

    #[test]
    fn fill_requires_empty() {
        let mut order = Order::dummy(1, "cxa", 100);
        order.fill(Address::new("hx1")).unwrap();
        let err = order.fill(Address::new("hx2")).unwrap_err();
        assert!(matches!(err, SwapbookError::InvalidOrderStatus { .. }));
        assert_eq!(order.provider, Some(Address::new("hx1")));
    }

    #[test]
    fn content_check_bounds() {
        let order = Order::dummy(1, "cxa", 100);
        assert!(order.check_content(&AssetId::new("cxa"), 100).is_ok());
        assert!(order.check_content(&AssetId::new("cxa"), 40).is_ok());
        assert!(order.check_content(&AssetId::new("cxa"), 0).is_err());
        assert!(order.check_content(&AssetId::new("cxa"), 101).is_err());
        let err = order.check_content(&AssetId::new("cxb"), 100).unwrap_err();
        assert!(matches!(err, SwapbookError::ContentMismatch { .. }));
    }

    #[test]
    fn open_order_accepts_any_provider() {
        let order = Order::dummy(1, "cxa", 100);
        assert!(order.check_provider(&Address::new("hxany")).is_ok());
    }

    #[test]
    fn reserved_order_rejects_other_providers() {
        let order = Order::new(OrderId(1), AssetId::new("cxa"), 100, Some(Address::new("hx1")));
        assert!(order.check_provider(&Address::new("hx1")).is_ok());
        let err = order.check_provider(&Address::new("hx2")).unwrap_err();
        assert!(matches!(err, SwapbookError::ProviderMismatch { .. }));
    }

    #[test]
    fn partial_fill_shrinks_amount_only() {
        let mut order = Order::dummy(1, "cxa", 100);
        order.fill(Address::new("hx1")).unwrap();
        order.partial_fill(30).unwrap();
        assert_eq!(order.amount, 70);
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.partial_fill(71).is_err());
    }

    #[test]
    fn refund_path_reaches_cancelled() {
        let mut order = Order::dummy(1, "cxa", 100);
        order.fill(Address::new("hx1")).unwrap();
        assert!(order.mark_cancelled().is_err());
        order.empty();
        assert_eq!(order.provider, None);
        order.mark_cancelled().unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn success_requires_filled() {
        let mut order = Order::dummy(1, "cxa", 100);
        assert!(order.mark_success().is_err());
        order.fill(Address::new("hx1")).unwrap();
        order.mark_success().unwrap();
        assert_eq!(order.status, OrderStatus::Success);
        assert!(order.mark_cancelled().is_err());
    }
}
