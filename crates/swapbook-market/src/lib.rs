//! # swapbook-market
//!
//! **Order-book layer of SwapBook.**
//!
//! Every trading pair has two price-ordered lists of pending public swaps:
//!
//! - **Buyers**: makers offering the lexicographically larger asset, best
//!   (highest) price first
//! - **Sellers**: makers offering the smaller asset, best (lowest) inverted
//!   price first
//!
//! Both lists rank in the same unit, "second asset per first asset", so the
//! head of each side is directly comparable. Equal prices keep arrival order.
//! The book stores only swap ids; amounts are read from the tables on demand.

pub mod book;
pub mod determinism;
pub mod ordering;
pub mod pairs;
pub mod quote;
pub mod summary;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures;

pub use book::{BookSide, MarketBook};
pub use determinism::{compute_book_digest, verify_book_digest};
pub use ordering::{BookOrdering, BuyerOrdering, SellerOrdering};
pub use pairs::MarketRegistry;
pub use quote::Quote;
pub use summary::{MarketSummary, summarize};
