//! Entity tables for orders and swaps.

use chrono::{DateTime, Utc};
use swapbook_types::{Address, AssetId, Order, OrderId, Result, Swap, SwapId, SwapbookError};

use crate::id_factory::IdFactory;
use crate::store::{KvStore, load, save};

// ===========================================================================
// Orders
// ===========================================================================

/// `order:{id} -> Order`.
#[derive(Debug, Clone)]
pub struct OrderTable {
    ids: IdFactory,
}

impl Default for OrderTable {
    fn default() -> Self {
        Self {
            ids: IdFactory::new("order"),
        }
    }
}

impl OrderTable {
    fn key(id: OrderId) -> String {
        format!("order:{}", id.0)
    }

    /// Allocate and store a fresh EMPTY order.
    pub fn create<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        asset: AssetId,
        amount: u128,
        provider: Option<Address>,
    ) -> Result<Order> {
        if amount == 0 {
            return Err(SwapbookError::ZeroAmount);
        }
        let id = OrderId(self.ids.next_id(kv)?);
        let order = Order::new(id, asset, amount, provider);
        self.put(kv, &order)?;
        Ok(order)
    }

    pub fn find<K: KvStore + ?Sized>(&self, kv: &K, id: OrderId) -> Result<Option<Order>> {
        if !id.is_valid() {
            return Ok(None);
        }
        load(kv, &Self::key(id))
    }

    pub fn get<K: KvStore + ?Sized>(&self, kv: &K, id: OrderId) -> Result<Order> {
        self.find(kv, id)?.ok_or(SwapbookError::OrderNotFound(id))
    }

    pub fn put<K: KvStore + ?Sized>(&self, kv: &mut K, order: &Order) -> Result<()> {
        save(kv, &Self::key(order.id), order)
    }

    /// Last allocated id.
    pub fn last_id<K: KvStore + ?Sized>(&self, kv: &K) -> Result<OrderId> {
        Ok(OrderId(self.ids.current(kv)?))
    }
}

// ===========================================================================
// Swaps
// ===========================================================================

/// `swap:{id} -> Swap`.
#[derive(Debug, Clone)]
pub struct SwapTable {
    ids: IdFactory,
}

impl Default for SwapTable {
    fn default() -> Self {
        Self {
            ids: IdFactory::new("swap"),
        }
    }
}

impl SwapTable {
    fn key(id: SwapId) -> String {
        format!("swap:{}", id.0)
    }

    /// Allocate and store a PENDING swap over two existing orders.
    pub fn create<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        maker_address: Address,
        created_at: DateTime<Utc>,
        private: bool,
    ) -> Result<Swap> {
        let id = SwapId(self.ids.next_id(kv)?);
        let swap = Swap::new(
            id,
            maker_order_id,
            taker_order_id,
            maker_address,
            created_at,
            private,
        );
        self.put(kv, &swap)?;
        Ok(swap)
    }

    pub fn find<K: KvStore + ?Sized>(&self, kv: &K, id: SwapId) -> Result<Option<Swap>> {
        if !id.is_valid() {
            return Ok(None);
        }
        load(kv, &Self::key(id))
    }

    pub fn get<K: KvStore + ?Sized>(&self, kv: &K, id: SwapId) -> Result<Swap> {
        self.find(kv, id)?.ok_or(SwapbookError::SwapNotFound(id))
    }

    pub fn put<K: KvStore + ?Sized>(&self, kv: &mut K, swap: &Swap) -> Result<()> {
        save(kv, &Self::key(swap.id), swap)
    }

    pub fn last_id<K: KvStore + ?Sized>(&self, kv: &K) -> Result<SwapId> {
        Ok(SwapId(self.ids.current(kv)?))
    }
}
