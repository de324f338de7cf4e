//! Store fixtures for tests.

use chrono::DateTime;
use swapbook_ledger::{KvStore, OrderTable, SwapTable};
use swapbook_types::{Address, AssetId, SwapId, TradingPair};

use crate::book::MarketBook;

/// Create a pending public swap with a filled maker order, without
/// touching any book.
pub fn list_swap_unbooked<K: KvStore + ?Sized>(
    kv: &mut K,
    maker_asset: &str,
    maker_amount: u128,
    taker_asset: &str,
    taker_amount: u128,
) -> SwapId {
    let orders = OrderTable::default();
    let maker = Address::new("hxmaker");
    let mut maker_order = orders
        .create(kv, AssetId::new(maker_asset), maker_amount, None)
        .expect("maker order");
    maker_order.fill(maker.clone()).expect("fill maker order");
    orders.put(kv, &maker_order).expect("store maker order");
    let taker_order = orders
        .create(kv, AssetId::new(taker_asset), taker_amount, None)
        .expect("taker order");
    SwapTable::default()
        .create(
            kv,
            maker_order.id,
            taker_order.id,
            maker,
            DateTime::UNIX_EPOCH,
            false,
        )
        .expect("swap")
        .id
}

/// Create a pending public swap and insert it into its pair's book.
pub fn list_swap<K: KvStore + ?Sized>(
    kv: &mut K,
    maker_asset: &str,
    maker_amount: u128,
    taker_asset: &str,
    taker_amount: u128,
) -> SwapId {
    let id = list_swap_unbooked(kv, maker_asset, maker_amount, taker_asset, taker_amount);
    let pair = TradingPair::new(AssetId::new(maker_asset), AssetId::new(taker_asset));
    MarketBook::new(pair).add(kv, id).expect("book insert");
    id
}
