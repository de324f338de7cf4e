//! Staged per-call overlay.
//!
//! A [`Journal`] reads through to the underlying store but keeps every write
//! to itself, together with the transfers and events the call produced.
//! Nothing reaches the store until the caller turns the journal into a
//! [`JournalCommit`] and applies it; dropping the journal discards the call.

use std::collections::BTreeMap;

use swapbook_types::{SwapEvent, Transfer};

use crate::store::KvStore;

/// Write-staging view over a store.
#[derive(Debug)]
pub struct Journal<'a, S: KvStore + ?Sized> {
    base: &'a S,
    /// `None` marks a staged delete.
    writes: BTreeMap<String, Option<String>>,
    transfers: Vec<Transfer>,
    events: Vec<SwapEvent>,
}

impl<'a, S: KvStore + ?Sized> Journal<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
            transfers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue an outgoing transfer from custody.
    pub fn transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    pub fn emit(&mut self, event: SwapEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    #[must_use]
    pub fn events(&self) -> &[SwapEvent] {
        &self.events
    }

    /// Number of staged key writes (deletes included).
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Release the store borrow and hand over everything staged.
    #[must_use]
    pub fn into_commit(self) -> JournalCommit {
        JournalCommit {
            writes: self.writes,
            transfers: self.transfers,
            events: self.events,
        }
    }
}

impl<S: KvStore + ?Sized> KvStore for Journal<'_, S> {
    fn get(&self, key: &str) -> Option<String> {
        match self.writes.get(key) {
            Some(staged) => staged.clone(),
            None => self.base.get(key),
        }
    }

    fn set(&mut self, key: &str, value: String) {
        self.writes.insert(key.to_string(), Some(value));
    }

    fn delete(&mut self, key: &str) {
        self.writes.insert(key.to_string(), None);
    }
}

/// The staged outcome of one call, detached from the store.
#[derive(Debug, Default)]
pub struct JournalCommit {
    writes: BTreeMap<String, Option<String>>,
    pub transfers: Vec<Transfer>,
    pub events: Vec<SwapEvent>,
}

impl JournalCommit {
    /// Apply staged writes in key order. Transfers and events are left for
    /// the caller.
    pub fn write_into<S: KvStore + ?Sized>(&mut self, store: &mut S) -> usize {
        let writes = std::mem::take(&mut self.writes);
        let count = writes.len();
        for (key, value) in writes {
            match value {
                Some(v) => store.set(&key, v),
                None => store.delete(&key),
            }
        }
        tracing::debug!(writes = count, "Journal applied");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use swapbook_types::{Address, AssetId, SwapId};

    #[test]
    fn reads_see_staged_writes_and_deletes() {
        let mut store = MemoryStore::new();
        store.set("a", "1".into());
        store.set("b", "2".into());

        let mut journal = Journal::new(&store);
        journal.set("a", "10".into());
        journal.delete("b");
        journal.set("c", "3".into());

        assert_eq!(journal.get("a").as_deref(), Some("10"));
        assert!(journal.get("b").is_none());
        assert_eq!(journal.get("c").as_deref(), Some("3"));
        assert_eq!(journal.pending_writes(), 3);
    }

    #[test]
    fn dropped_journal_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        store.set("a", "1".into());
        {
            let mut journal = Journal::new(&store);
            journal.set("a", "2".into());
            journal.delete("a");
        }
        assert_eq!(store.get("a").as_deref(), Some("1"));
    }

    #[test]
    fn commit_applies_writes_and_keeps_side_effects() {
        let mut store = MemoryStore::new();
        store.set("gone", "x".into());

        let mut journal = Journal::new(&store);
        journal.set("k", "v".into());
        journal.delete("gone");
        journal.transfer(Transfer {
            asset: AssetId::new("cxa"),
            amount: 5,
            destination: Address::new("hx1"),
        });
        journal.emit(SwapEvent::SwapSuccess { swap: SwapId(1) });
        let mut commit = journal.into_commit();

        assert_eq!(commit.write_into(&mut store), 2);
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert!(store.get("gone").is_none());
        assert_eq!(commit.transfers.len(), 1);
        assert_eq!(commit.events, vec![SwapEvent::SwapSuccess { swap: SwapId(1) }]);

        // Second application is a no-op.
        assert_eq!(commit.write_into(&mut store), 0);
    }
}
