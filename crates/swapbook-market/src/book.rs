//! The market book for a single pair.
//!
//! ```text
//! market:{pair}:buyers   best bid first
//! market:{pair}:sellers  best ask first
//! market:{pair}:filled   most recent settlement first
//! ```
//!
//! Insertion walks the side from its best entry and stops at the first entry
//! the new one strictly beats. Removal is O(1).

use serde::{Deserialize, Serialize};
use swapbook_ledger::{KvStore, LinkedList};
use swapbook_types::{Price, Result, SwapId, SwapStatus, SwapbookError, TradingPair};
use tracing::debug;

use crate::ordering::{BookOrdering, BuyerOrdering, SellerOrdering};
use crate::quote::Quote;

/// One side of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookSide {
    Buyers,
    Sellers,
}

impl BookSide {
    /// The side an incoming maker trades against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buyers => Self::Sellers,
            Self::Sellers => Self::Buyers,
        }
    }
}

impl std::fmt::Display for BookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buyers => write!(f, "{}", BuyerOrdering::SIDE),
            Self::Sellers => write!(f, "{}", SellerOrdering::SIDE),
        }
    }
}

/// Handle to the lists of one trading pair.
#[derive(Debug, Clone)]
pub struct MarketBook {
    pair: TradingPair,
    buyers: LinkedList<SwapId>,
    sellers: LinkedList<SwapId>,
    filled: LinkedList<SwapId>,
}

impl MarketBook {
    pub fn new(pair: TradingPair) -> Self {
        let name = pair.key_segment();
        Self {
            buyers: LinkedList::new(format!("market:{name}:buyers")),
            sellers: LinkedList::new(format!("market:{name}:sellers")),
            filled: LinkedList::new(format!("market:{name}:filled")),
            pair,
        }
    }

    #[must_use]
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    fn list(&self, side: BookSide) -> &LinkedList<SwapId> {
        match side {
            BookSide::Buyers => &self.buyers,
            BookSide::Sellers => &self.sellers,
        }
    }

    /// Which side a swap of this pair belongs to.
    pub fn side_of(&self, quote: &Quote) -> Result<BookSide> {
        if quote.pair() != self.pair || quote.maker_asset == quote.taker_asset {
            return Err(SwapbookError::NotListable(quote.swap));
        }
        Ok(if quote.is_buyer() {
            BookSide::Buyers
        } else {
            BookSide::Sellers
        })
    }

    /// Ranking price of an entry on `side`.
    pub fn price_on(side: BookSide, quote: &Quote) -> Result<Price> {
        match side {
            BookSide::Buyers => BuyerOrdering::price_of(quote),
            BookSide::Sellers => SellerOrdering::price_of(quote),
        }
    }

    // =================================================================
    // Insertion / Removal
    // =================================================================

    /// List a pending public swap at its price-priority position.
    pub fn add<K: KvStore + ?Sized>(&self, kv: &mut K, swap: SwapId) -> Result<BookSide> {
        let quote = Quote::load(kv, swap)?;
        if quote.private || quote.status != SwapStatus::Pending {
            return Err(SwapbookError::NotListable(swap));
        }
        let side = self.side_of(&quote)?;
        match side {
            BookSide::Buyers => {
                Self::insert_ordered::<BuyerOrdering, K>(kv, &self.buyers, &quote)?;
            }
            BookSide::Sellers => {
                Self::insert_ordered::<SellerOrdering, K>(kv, &self.sellers, &quote)?;
            }
        }
        Ok(side)
    }

    fn insert_ordered<O: BookOrdering, K: KvStore + ?Sized>(
        kv: &mut K,
        list: &LinkedList<SwapId>,
        quote: &Quote,
    ) -> Result<()> {
        let price = O::price_of(quote)?;
        let mut cursor = list.head(kv)?;
        while let Some(current) = cursor {
            let current_price = O::price_of(&Quote::load(kv, current)?)?;
            if O::precedes(&price, &current_price) {
                list.insert_before(kv, quote.swap, &current)?;
                debug!(swap = %quote.swap, side = O::SIDE, %price, before = %current, "Book insert");
                return Ok(());
            }
            cursor = list.next(kv, &current)?;
        }
        list.append(kv, quote.swap)?;
        debug!(swap = %quote.swap, side = O::SIDE, %price, "Book append");
        Ok(())
    }

    /// Unlist a swap. Fails with `ItemNotFound` when it is not listed.
    pub fn remove<K: KvStore + ?Sized>(&self, kv: &mut K, swap: SwapId) -> Result<BookSide> {
        let quote = Quote::load(kv, swap)?;
        let side = self.side_of(&quote)?;
        self.list(side).remove(kv, &swap)?;
        debug!(swap = %swap, %side, "Book remove");
        Ok(side)
    }

    /// Re-position a listed swap whose amounts changed. Only moves it when
    /// it now outranks its predecessor or is outranked by its successor.
    /// Returns whether it moved.
    pub fn reprice<K: KvStore + ?Sized>(&self, kv: &mut K, swap: SwapId) -> Result<bool> {
        let quote = Quote::load(kv, swap)?;
        match self.side_of(&quote)? {
            BookSide::Buyers => Self::reprice_in::<BuyerOrdering, K>(kv, &self.buyers, &quote),
            BookSide::Sellers => Self::reprice_in::<SellerOrdering, K>(kv, &self.sellers, &quote),
        }
    }

    fn reprice_in<O: BookOrdering, K: KvStore + ?Sized>(
        kv: &mut K,
        list: &LinkedList<SwapId>,
        quote: &Quote,
    ) -> Result<bool> {
        let price = O::price_of(quote)?;
        let ahead_of_prev = match list.prev(kv, &quote.swap)? {
            Some(prev) => O::precedes(&price, &Self::price_at::<O, K>(kv, prev)?),
            None => false,
        };
        let behind_next = match list.next(kv, &quote.swap)? {
            Some(next) => O::precedes(&Self::price_at::<O, K>(kv, next)?, &price),
            None => false,
        };
        if !ahead_of_prev && !behind_next {
            return Ok(false);
        }
        list.remove(kv, &quote.swap)?;
        Self::insert_ordered::<O, K>(kv, list, quote)?;
        debug!(swap = %quote.swap, side = O::SIDE, %price, "Book reprice");
        Ok(true)
    }

    fn price_at<O: BookOrdering, K: KvStore + ?Sized>(kv: &K, swap: SwapId) -> Result<Price> {
        O::price_of(&Quote::load(kv, swap)?)
    }

    pub fn contains<K: KvStore + ?Sized>(&self, kv: &K, swap: SwapId) -> Result<bool> {
        Ok(self.buyers.contains(kv, &swap)? || self.sellers.contains(kv, &swap)?)
    }

    // =================================================================
    // Reads
    // =================================================================

    pub fn best<K: KvStore + ?Sized>(&self, kv: &K, side: BookSide) -> Result<Option<SwapId>> {
        self.list(side).head(kv)
    }

    /// Highest bid.
    pub fn best_buyer<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Option<SwapId>> {
        self.best(kv, BookSide::Buyers)
    }

    /// Lowest ask.
    pub fn best_seller<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Option<SwapId>> {
        self.best(kv, BookSide::Sellers)
    }

    /// Entries after `cursor` (from the best when `None`), best first.
    pub fn walk<K: KvStore + ?Sized>(
        &self,
        kv: &K,
        side: BookSide,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.list(side).after(kv, cursor.as_ref(), limit)
    }

    pub fn buyers<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.buyers.range(kv, offset, limit)
    }

    pub fn sellers<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.sellers.range(kv, offset, limit)
    }

    pub fn depth<K: KvStore + ?Sized>(&self, kv: &K, side: BookSide) -> Result<u64> {
        self.list(side).len(kv)
    }

    // =================================================================
    // Filled history
    // =================================================================

    pub fn record_filled<K: KvStore + ?Sized>(&self, kv: &mut K, swap: SwapId) -> Result<()> {
        self.filled.prepend(kv, swap)
    }

    pub fn filled<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.filled.range(kv, offset, limit)
    }

    /// Settlements after `cursor` (from the most recent when `None`).
    pub fn filled_after<K: KvStore + ?Sized>(
        &self,
        kv: &K,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.filled.after(kv, cursor.as_ref(), limit)
    }

    pub fn last_filled<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Option<SwapId>> {
        self.filled.head(kv)
    }

    pub fn filled_count<K: KvStore + ?Sized>(&self, kv: &K) -> Result<u64> {
        self.filled.len(kv)
    }
}
