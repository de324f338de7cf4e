//! Snapshot of a swap's two sides, as the book sees it.

use swapbook_ledger::{KvStore, OrderTable, SwapTable};
use swapbook_types::{AssetId, Price, Result, SwapId, SwapStatus, TradingPair};

/// Assets and remaining amounts of one swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub swap: SwapId,
    pub maker_asset: AssetId,
    pub maker_amount: u128,
    pub taker_asset: AssetId,
    pub taker_amount: u128,
    pub status: SwapStatus,
    pub private: bool,
}

impl Quote {
    /// Read a swap and both of its orders.
    pub fn load<K: KvStore + ?Sized>(kv: &K, swap: SwapId) -> Result<Self> {
        let orders = OrderTable::default();
        let record = SwapTable::default().get(kv, swap)?;
        let maker = orders.get(kv, record.maker_order_id)?;
        let taker = orders.get(kv, record.taker_order_id)?;
        Ok(Self {
            swap,
            maker_asset: maker.asset,
            maker_amount: maker.amount,
            taker_asset: taker.asset,
            taker_amount: taker.amount,
            status: record.status,
            private: record.private,
        })
    }

    #[must_use]
    pub fn pair(&self) -> TradingPair {
        TradingPair::new(self.maker_asset.clone(), self.taker_asset.clone())
    }

    /// Maker offers the pair's second asset.
    #[must_use]
    pub fn is_buyer(&self) -> bool {
        self.pair().is_buyer(&self.maker_asset)
    }

    /// `maker / taker`.
    pub fn price(&self) -> Result<Price> {
        Price::new(self.maker_amount, self.taker_amount)
    }

    /// `taker / maker`.
    pub fn inverted_price(&self) -> Result<Price> {
        Price::new(self.taker_amount, self.maker_amount)
    }

    /// Price in second-per-first units, whichever side the maker is on.
    pub fn unit_price(&self) -> Result<Price> {
        if self.is_buyer() {
            self.price()
        } else {
            self.inverted_price()
        }
    }
}
