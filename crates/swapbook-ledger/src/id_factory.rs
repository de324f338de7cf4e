//! Monotonic id allocation.

use swapbook_types::Result;

use crate::store::{KvStore, load, save};

/// Hands out `1, 2, 3, ...` under `{name}:uid`. Zero is never produced.
#[derive(Debug, Clone)]
pub struct IdFactory {
    key: String,
}

impl IdFactory {
    pub fn new(name: &str) -> Self {
        Self {
            key: format!("{name}:uid"),
        }
    }

    /// Last id handed out, 0 if none.
    pub fn current<K: KvStore + ?Sized>(&self, kv: &K) -> Result<u64> {
        Ok(load(kv, &self.key)?.unwrap_or(0))
    }

    pub fn next_id<K: KvStore + ?Sized>(&self, kv: &mut K) -> Result<u64> {
        let next = self
            .current(kv)?
            .checked_add(1)
            .ok_or(swapbook_types::SwapbookError::ArithmeticOverflow)?;
        save(kv, &self.key, &next)?;
        Ok(next)
    }
}
