//! # swapbook-types
//!
//! Shared types, errors, and configuration for the **SwapBook** exchange.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`SwapId`], [`Address`], [`AssetId`], [`TradingPair`], [`TransactionId`]
//! - **Order model**: [`Order`], [`OrderStatus`]
//! - **Swap model**: [`Swap`], [`SwapStatus`]
//! - **Pricing**: [`Price`] (exact rational), [`Precision`] (decimal truncation)
//! - **Events**: [`SwapEvent`], [`Transfer`]
//! - **Call context**: [`CallContext`]
//! - **Configuration**: [`EngineConfig`], [`AssetConfig`]
//! - **Errors**: [`SwapbookError`] with `SB_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod price;
pub mod swap;

// Re-export all primary types at crate root for ergonomic imports:
//   use swapbook_types::{Order, Swap, SwapId, Price, ...};

pub use amount::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use price::*;
pub use swap::*;

// Constants are accessed via `swapbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
