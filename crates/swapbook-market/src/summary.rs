//! Per-pair market overview.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swapbook_ledger::KvStore;
use swapbook_types::{Price, Result, SwapId};

use crate::book::{BookSide, MarketBook};
use crate::determinism::compute_book_digest;
use crate::quote::Quote;

/// Prices are in whole second-asset tokens per whole first-asset token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub pair: String,
    /// Price of the most recently settled swap.
    pub last_price: Option<Decimal>,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub spread: Option<Decimal>,
    pub bid_depth: u64,
    pub ask_depth: u64,
    pub filled_count: u64,
    /// Hex book digest at the time of the snapshot.
    pub book_digest: String,
}

fn unit_price<K: KvStore + ?Sized>(kv: &K, swap: Option<SwapId>) -> Result<Option<Price>> {
    match swap {
        Some(id) => Ok(Some(Quote::load(kv, id)?.unit_price()?)),
        None => Ok(None),
    }
}

/// Snapshot a book. `first_decimals` / `second_decimals` are the native
/// decimals of the pair's two assets.
pub fn summarize<K: KvStore + ?Sized>(
    kv: &K,
    book: &MarketBook,
    first_decimals: u32,
    second_decimals: u32,
) -> Result<MarketSummary> {
    let scale = |p: Option<Price>| p.and_then(|p| p.to_decimal_scaled(second_decimals, first_decimals));

    let last_price = scale(unit_price(kv, book.last_filled(kv)?)?);
    let best_bid = scale(unit_price(kv, book.best_buyer(kv)?)?);
    let best_ask = scale(unit_price(kv, book.best_seller(kv)?)?);
    let spread = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => ask.checked_sub(bid),
        _ => None,
    };

    Ok(MarketSummary {
        pair: book.pair().name(),
        last_price,
        best_bid,
        best_ask,
        spread,
        bid_depth: book.depth(kv, BookSide::Buyers)?,
        ask_depth: book.depth(kv, BookSide::Sellers)?,
        filled_count: book.filled_count(kv)?,
        book_digest: hex::encode(compute_book_digest(kv, book)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::list_swap;
    use std::str::FromStr;
    use swapbook_ledger::MemoryStore;
    use swapbook_types::{AssetId, TradingPair};

    fn book() -> MarketBook {
        MarketBook::new(TradingPair::new(AssetId::new("cxa"), AssetId::new("cxb")))
    }

    #[test]
    fn empty_book_summary() {
        let store = MemoryStore::new();
        let s = summarize(&store, &book(), 0, 0).unwrap();
        assert_eq!(s.pair, "cxa/cxb");
        assert!(s.last_price.is_none());
        assert!(s.best_bid.is_none());
        assert!(s.spread.is_none());
        assert_eq!(s.bid_depth + s.ask_depth, 0);
    }

    #[test]
    fn bid_ask_and_last_price() {
        let mut store = MemoryStore::new();
        // Bid: 200 cxb for 100 cxa -> 2.
        list_swap(&mut store, "cxb", 200, "cxa", 100);
        // Ask: 100 cxa for 250 cxb -> 2.5.
        let ask = list_swap(&mut store, "cxa", 100, "cxb", 250);
        book().record_filled(&mut store, ask).unwrap();

        let s = summarize(&store, &book(), 0, 0).unwrap();
        assert_eq!(s.best_bid, Some(Decimal::from(2)));
        assert_eq!(s.best_ask, Some(Decimal::from_str("2.5").unwrap()));
        assert_eq!(s.spread, Some(Decimal::from_str("0.5").unwrap()));
        assert_eq!(s.last_price, Some(Decimal::from_str("2.5").unwrap()));
        assert_eq!((s.bid_depth, s.ask_depth, s.filled_count), (1, 1, 1));
    }

    #[test]
    fn decimals_are_applied() {
        let mut store = MemoryStore::new();
        // 2 cxb (6 decimals) per 1 cxa (18 decimals).
        list_swap(&mut store, "cxb", 2_000_000, "cxa", 1_000_000_000_000_000_000);
        let s = summarize(&store, &book(), 18, 6).unwrap();
        assert_eq!(s.best_bid, Some(Decimal::from(2)));
    }

    #[test]
    fn summary_serializes() {
        let store = MemoryStore::new();
        let s = summarize(&store, &book(), 0, 0).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("cxa/cxb"));
    }
}
