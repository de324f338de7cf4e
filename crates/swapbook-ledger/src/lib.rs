//! # swapbook-ledger
//!
//! **Storage plane**: everything SwapBook persists, expressed over a plain
//! ordered key-value store.
//!
//! - [`KvStore`] / [`MemoryStore`]: the storage abstraction and an in-memory backend
//! - [`Journal`]: per-call staging overlay; writes, transfers and events are
//!   kept aside until the call commits, and vanish when it aborts
//! - [`IdFactory`]: monotonically increasing ids starting at 1
//! - [`OrderTable`] / [`SwapTable`]: entity tables
//! - [`LinkedList`]: doubly linked list with O(1) append/prepend/insert-before/remove
//! - [`UniqueSet`]: idempotent membership set with ordered pagination
//! - [`AccountIndex`] / [`SystemIndex`]: the per-account and global listings
//!
//! ## Key Layout
//!
//! ```text
//! order:{id}                      -> Order
//! swap:{id}                       -> Swap
//! {factory}:uid                   -> last allocated id
//! {list}:meta                     -> head / tail / len
//! {list}:node:{item key}          -> prev / next
//! ```
//!
//! Account and asset ids enter list names only through their hex
//! `key_segment`, so no two lists can share a name.

pub mod id_factory;
pub mod index;
pub mod journal;
pub mod linked_list;
pub mod set;
pub mod store;
pub mod tables;

pub use id_factory::IdFactory;
pub use index::{AccountIndex, SystemIndex};
pub use journal::{Journal, JournalCommit};
pub use linked_list::{LinkedList, ListItem};
pub use set::UniqueSet;
pub use store::{KvStore, MemoryStore, load, save};
pub use tables::{OrderTable, SwapTable};
