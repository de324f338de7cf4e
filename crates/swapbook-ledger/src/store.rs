//! Key-value storage abstraction.
//!
//! The engine never assumes a physical storage engine: it only needs
//! single-key get / set / delete. Values are JSON documents.

use std::collections::BTreeMap;

use serde::{Serialize, de::DeserializeOwned};
use swapbook_types::Result;

/// Ordered key-value store with single-key atomic writes.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn delete(&mut self, key: &str);
}

/// Read and decode a value.
pub fn load<T, K>(kv: &K, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    K: KvStore + ?Sized,
{
    kv.get(key)
        .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
        .transpose()
}

/// Encode and write a value.
pub fn save<T, K>(kv: &mut K, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    K: KvStore + ?Sized,
{
    kv.set(key, serde_json::to_string(value)?);
    Ok(())
}

/// In-memory store backed by a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys starting with `prefix`, in key order.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .range(prefix.to_string()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.as_str())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
