//! Membership set with idempotent insertion.

use swapbook_types::Result;

use crate::linked_list::{LinkedList, ListItem};
use crate::store::KvStore;

/// Unique members in insertion order. Adding a present member is a no-op;
/// removing an absent one is an error.
#[derive(Debug, Clone)]
pub struct UniqueSet<T> {
    items: LinkedList<T>,
}

impl<T: ListItem> UniqueSet<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            items: LinkedList::new(name),
        }
    }

    /// Returns `true` when the item was newly inserted.
    pub fn add<K: KvStore + ?Sized>(&self, kv: &mut K, item: T) -> Result<bool> {
        if self.items.contains(kv, &item)? {
            return Ok(false);
        }
        self.items.append(kv, item)?;
        Ok(true)
    }

    pub fn remove<K: KvStore + ?Sized>(&self, kv: &mut K, item: &T) -> Result<()> {
        self.items.remove(kv, item)
    }

    pub fn contains<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<bool> {
        self.items.contains(kv, item)
    }

    pub fn len<K: KvStore + ?Sized>(&self, kv: &K) -> Result<u64> {
        self.items.len(kv)
    }

    pub fn is_empty<K: KvStore + ?Sized>(&self, kv: &K) -> Result<bool> {
        self.items.is_empty(kv)
    }

    /// Up to `limit` members following `cursor`.
    pub fn after<K: KvStore + ?Sized>(
        &self,
        kv: &K,
        cursor: Option<&T>,
        limit: usize,
    ) -> Result<Vec<T>> {
        self.items.after(kv, cursor, limit)
    }

    pub fn range<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<T>> {
        self.items.range(kv, offset, limit)
    }
}
