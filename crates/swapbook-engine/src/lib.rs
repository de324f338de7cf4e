//! # swapbook-engine
//!
//! **Swap orchestration for SwapBook.**
//!
//! ```text
//!   Host ──attach funds──► SwapEngine ──► Journal ──commit──► KvStore
//!                              │             │
//!                              │             └─ queued transfers ──► FundsTransfer (Vault)
//!                              ├─ OrderTable / SwapTable / indices   (swapbook-ledger)
//!                              └─ MarketBook per pair                (swapbook-market)
//! ```
//!
//! ## Operations
//!
//! | Call | Effect |
//! |---|---|
//! | `create_swap` | Maker escrows an offer; public offers are listed |
//! | `fill_swap` | Taker settles a swap in full, or a proportional slice of it |
//! | `cancel_swap` | Maker withdraws a pending swap and is refunded |
//! | `create_limit_order` | Walk the opposite side of the book, rest the remainder |
//!
//! Every call is all or nothing. Amounts are truncated to each asset's
//! tradable precision; remainders below one unit go straight back to the
//! caller.

pub mod engine;
pub mod host;
pub mod limit_order;
pub mod query;
pub mod receipt;
pub mod registry;
pub mod supply;
pub mod vault;

pub use engine::{SwapEngine, SwapRequest};
pub use host::Host;
pub use limit_order::LimitOrder;
pub use query::SwapDetails;
pub use receipt::{CallReceipt, CreateOutcome, FillOutcome, LimitOrderOutcome};
pub use registry::{AssetRegistry, StaticRegistry};
pub use supply::{SupplyConservation, verify_custody};
pub use vault::{FundsTransfer, Vault};
