//! Global and per-account listings.
//!
//! These are derived structures: everything here could be rebuilt by
//! scanning the tables. They are maintained synchronously inside the same
//! journal as the state transition that changes them.

use swapbook_types::{Address, OrderId, Result, SwapId, TradingPair};

use crate::linked_list::LinkedList;
use crate::set::UniqueSet;
use crate::store::KvStore;

/// Existence sets for every swap and order ever created.
#[derive(Debug, Clone)]
pub struct SystemIndex {
    swaps: UniqueSet<SwapId>,
    orders: UniqueSet<OrderId>,
}

impl Default for SystemIndex {
    fn default() -> Self {
        Self {
            swaps: UniqueSet::new("system:swaps"),
            orders: UniqueSet::new("system:orders"),
        }
    }
}

impl SystemIndex {
    #[must_use]
    pub fn swaps(&self) -> &UniqueSet<SwapId> {
        &self.swaps
    }

    #[must_use]
    pub fn orders(&self) -> &UniqueSet<OrderId> {
        &self.orders
    }
}

/// Pending and filled swap lists of one account, overall and per pair.
///
/// Pending lists keep creation order; filled lists are most-recent-first.
#[derive(Debug, Clone)]
pub struct AccountIndex {
    account: Address,
}

impl AccountIndex {
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    #[must_use]
    pub fn account(&self) -> &Address {
        &self.account
    }

    fn list(&self, pair: Option<&TradingPair>, kind: &str) -> LinkedList<SwapId> {
        let account = self.account.key_segment();
        match pair {
            Some(pair) => LinkedList::new(format!("account:{account}:{}:{kind}", pair.key_segment())),
            None => LinkedList::new(format!("account:{account}:{kind}")),
        }
    }

    #[must_use]
    pub fn pending(&self) -> LinkedList<SwapId> {
        self.list(None, "pending")
    }

    #[must_use]
    pub fn filled(&self) -> LinkedList<SwapId> {
        self.list(None, "filled")
    }

    #[must_use]
    pub fn pair_pending(&self, pair: &TradingPair) -> LinkedList<SwapId> {
        self.list(Some(pair), "pending")
    }

    #[must_use]
    pub fn pair_filled(&self, pair: &TradingPair) -> LinkedList<SwapId> {
        self.list(Some(pair), "filled")
    }

    pub fn add_pending<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        pair: &TradingPair,
        swap: SwapId,
    ) -> Result<()> {
        self.pending().append(kv, swap)?;
        self.pair_pending(pair).append(kv, swap)
    }

    pub fn remove_pending<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        pair: &TradingPair,
        swap: SwapId,
    ) -> Result<()> {
        self.pending().remove(kv, &swap)?;
        self.pair_pending(pair).remove(kv, &swap)
    }

    /// Prepend to both filled lists. A swap already listed (self-fill) is
    /// left where it is; returns whether it was inserted.
    pub fn add_filled<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        pair: &TradingPair,
        swap: SwapId,
    ) -> Result<bool> {
        let filled = self.filled();
        if filled.contains(kv, &swap)? {
            return Ok(false);
        }
        filled.prepend(kv, swap)?;
        self.pair_filled(pair).prepend(kv, swap)?;
        Ok(true)
    }
}
