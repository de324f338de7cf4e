//! Read-only queries.
//!
//! Paginated reads return at most `EngineConfig::page_size` items whatever
//! `limit` the caller asks for. Offset reads walk `offset` entries before
//! the page; the `*_after` variants resume from the last id of the previous
//! page, so every page costs the same however deep it is. A cursor that is
//! no longer listed fails with `ItemNotFound`.

use serde::{Deserialize, Serialize};
use swapbook_ledger::{AccountIndex, KvStore, LinkedList};
use swapbook_market::{BookSide, MarketBook, MarketSummary, compute_book_digest, summarize};
use swapbook_types::{Address, Order, OrderId, Result, Swap, SwapId, SwapbookError, TradingPair};

use crate::engine::SwapEngine;
use crate::registry::AssetRegistry;
use crate::vault::FundsTransfer;

/// A swap together with both of its orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapDetails {
    pub swap: Swap,
    pub maker_order: Order,
    pub taker_order: Order,
}

impl<S: KvStore, R: AssetRegistry, F: FundsTransfer> SwapEngine<S, R, F> {
    fn page(&self, limit: usize) -> usize {
        limit.min(self.config.page_size)
    }

    fn known_book(&self, pair: &TradingPair) -> Result<MarketBook> {
        if !self.markets.is_known(&self.store, pair)? {
            return Err(SwapbookError::not_found("market", pair));
        }
        Ok(self.markets.book(pair.clone()))
    }

    fn page_after(&self, list: &LinkedList<SwapId>, cursor: Option<SwapId>, limit: usize) -> Result<Vec<SwapId>> {
        list.after(&self.store, cursor.as_ref(), self.page(limit))
    }

    // =================================================================
    // Entities
    // =================================================================

    pub fn swap(&self, id: SwapId) -> Result<Swap> {
        self.swaps.get(&self.store, id)
    }

    pub fn order(&self, id: OrderId) -> Result<Order> {
        self.orders.get(&self.store, id)
    }

    pub fn swap_details(&self, id: SwapId) -> Result<SwapDetails> {
        let swap = self.swap(id)?;
        Ok(SwapDetails {
            maker_order: self.order(swap.maker_order_id)?,
            taker_order: self.order(swap.taker_order_id)?,
            swap,
        })
    }

    /// Ids of every swap ever created, ascending.
    pub fn swap_ids(&self, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.system.swaps().range(&self.store, offset, self.page(limit))
    }

    pub fn swap_ids_after(&self, cursor: Option<SwapId>, limit: usize) -> Result<Vec<SwapId>> {
        self.system.swaps().after(&self.store, cursor.as_ref(), self.page(limit))
    }

    pub fn swap_count(&self) -> Result<u64> {
        self.system.swaps().len(&self.store)
    }

    // =================================================================
    // Accounts
    // =================================================================

    /// Pending swaps made by `account`, oldest first.
    pub fn account_pending(&self, account: &Address, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        AccountIndex::new(account.clone())
            .pending()
            .range(&self.store, offset, self.page(limit))
    }

    /// Swaps `account` settled as maker or taker, most recent first.
    pub fn account_filled(&self, account: &Address, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        AccountIndex::new(account.clone())
            .filled()
            .range(&self.store, offset, self.page(limit))
    }

    pub fn account_pair_pending(
        &self,
        account: &Address,
        pair: &TradingPair,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        AccountIndex::new(account.clone())
            .pair_pending(pair)
            .range(&self.store, offset, self.page(limit))
    }

    pub fn account_pair_filled(
        &self,
        account: &Address,
        pair: &TradingPair,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        AccountIndex::new(account.clone())
            .pair_filled(pair)
            .range(&self.store, offset, self.page(limit))
    }

    pub fn account_pending_after(
        &self,
        account: &Address,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.page_after(&AccountIndex::new(account.clone()).pending(), cursor, limit)
    }

    pub fn account_filled_after(
        &self,
        account: &Address,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.page_after(&AccountIndex::new(account.clone()).filled(), cursor, limit)
    }

    pub fn account_pair_pending_after(
        &self,
        account: &Address,
        pair: &TradingPair,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.page_after(&AccountIndex::new(account.clone()).pair_pending(pair), cursor, limit)
    }

    pub fn account_pair_filled_after(
        &self,
        account: &Address,
        pair: &TradingPair,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.page_after(&AccountIndex::new(account.clone()).pair_filled(pair), cursor, limit)
    }

    pub fn account_pending_count(&self, account: &Address) -> Result<u64> {
        AccountIndex::new(account.clone()).pending().len(&self.store)
    }

    pub fn account_filled_count(&self, account: &Address) -> Result<u64> {
        AccountIndex::new(account.clone()).filled().len(&self.store)
    }

    // =================================================================
    // Markets
    // =================================================================

    /// Trading pairs that ever had a public listing, in registration order.
    pub fn pairs(&self, offset: usize, limit: usize) -> Result<Vec<TradingPair>> {
        self.markets.pairs(&self.store, offset, self.page(limit))
    }

    pub fn pairs_after(&self, cursor: Option<&TradingPair>, limit: usize) -> Result<Vec<TradingPair>> {
        self.markets.pairs_after(&self.store, cursor, self.page(limit))
    }

    pub fn pair_count(&self) -> Result<u64> {
        self.markets.count(&self.store)
    }

    /// Best bid first.
    pub fn market_buyers(&self, pair: &TradingPair, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .buyers(&self.store, offset, self.page(limit))
    }

    /// Best ask first.
    pub fn market_sellers(&self, pair: &TradingPair, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .sellers(&self.store, offset, self.page(limit))
    }

    /// Public settlements, most recent first.
    pub fn market_filled(&self, pair: &TradingPair, offset: usize, limit: usize) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .filled(&self.store, offset, self.page(limit))
    }

    pub fn market_buyers_after(
        &self,
        pair: &TradingPair,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .walk(&self.store, BookSide::Buyers, cursor, self.page(limit))
    }

    pub fn market_sellers_after(
        &self,
        pair: &TradingPair,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .walk(&self.store, BookSide::Sellers, cursor, self.page(limit))
    }

    pub fn market_filled_after(
        &self,
        pair: &TradingPair,
        cursor: Option<SwapId>,
        limit: usize,
    ) -> Result<Vec<SwapId>> {
        self.known_book(pair)?
            .filled_after(&self.store, cursor, self.page(limit))
    }

    pub fn market_depth(&self, pair: &TradingPair, side: BookSide) -> Result<u64> {
        self.known_book(pair)?.depth(&self.store, side)
    }

    pub fn market_summary(&self, pair: &TradingPair) -> Result<MarketSummary> {
        let book = self.known_book(pair)?;
        self.summarize_book(&book)
    }

    /// One summary per known pair, in registration order, from `cursor`
    /// on. Each carries the pair name and its last traded price.
    pub fn market_summaries(&self, cursor: Option<&TradingPair>, limit: usize) -> Result<Vec<MarketSummary>> {
        self.pairs_after(cursor, limit)?
            .into_iter()
            .map(|pair| self.summarize_book(&self.markets.book(pair)))
            .collect()
    }

    fn summarize_book(&self, book: &MarketBook) -> Result<MarketSummary> {
        let pair = book.pair();
        summarize(
            &self.store,
            book,
            self.registry.decimals(&pair.first)?,
            self.registry.decimals(&pair.second)?,
        )
    }

    /// SHA-256 digest of both sides of a book. An unknown pair hashes as
    /// an empty book.
    pub fn market_digest(&self, pair: &TradingPair) -> Result<[u8; 32]> {
        compute_book_digest(&self.store, &self.markets.book(pair.clone()))
    }
}
