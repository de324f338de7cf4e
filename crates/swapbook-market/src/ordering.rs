//! Price-priority strategies for the two sides of a book.
//!
//! Both sides rank by a price expressed in second-asset-per-first-asset
//! units. Buyers want that price high, sellers want it low. A new entry goes
//! in front of the first entry it strictly beats, so equal prices stay FIFO.

use swapbook_types::{Price, Result};

use crate::quote::Quote;

/// Ranking rule for one side of the book.
pub trait BookOrdering {
    /// Human-readable side name for logs.
    const SIDE: &'static str;

    /// The price this side ranks by.
    fn price_of(quote: &Quote) -> Result<Price>;

    /// Whether an entry at `new` must sit ahead of one at `current`.
    fn precedes(new: &Price, current: &Price) -> bool;

    /// Whether a resting entry at `resting` is acceptable to an incoming
    /// order limited at `limit`.
    fn crosses(limit: &Price, resting: &Price) -> bool {
        !Self::precedes(limit, resting)
    }
}

/// Buyers: `maker / taker`, highest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyerOrdering;

impl BookOrdering for BuyerOrdering {
    const SIDE: &'static str = "buyers";

    fn price_of(quote: &Quote) -> Result<Price> {
        quote.price()
    }

    fn precedes(new: &Price, current: &Price) -> bool {
        new > current
    }
}

/// Sellers: `taker / maker`, lowest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerOrdering;

impl BookOrdering for SellerOrdering {
    const SIDE: &'static str = "sellers";

    fn price_of(quote: &Quote) -> Result<Price> {
        quote.inverted_price()
    }

    fn precedes(new: &Price, current: &Price) -> bool {
        new < current
    }
}
