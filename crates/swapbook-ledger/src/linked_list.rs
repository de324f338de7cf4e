//! Doubly linked list over a key-value store.
//!
//! Every list keeps one metadata record and one node per member:
//!
//! ```text
//! {name}:meta           -> { head, tail, len }
//! {name}:node:{key}     -> { prev, next }      key = ListItem::item_key
//! ```
//!
//! Members are unique. Append, prepend, insert-before and remove touch at
//! most three nodes plus the metadata record, so they cost O(1) regardless
//! of list length. Reads walk from the head or from a cursor.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use swapbook_types::{OrderId, Result, SwapId, SwapbookError, TradingPair};

use crate::store::{KvStore, load, save};

/// Anything that can live in a [`LinkedList`].
pub trait ListItem: Serialize + DeserializeOwned + Clone + PartialEq + fmt::Display {
    /// Node key suffix. Distinct values must give distinct keys.
    fn item_key(&self) -> String;
}

impl ListItem for SwapId {
    fn item_key(&self) -> String {
        self.0.to_string()
    }
}

impl ListItem for OrderId {
    fn item_key(&self) -> String {
        self.0.to_string()
    }
}

impl ListItem for TradingPair {
    fn item_key(&self) -> String {
        self.key_segment()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ListMeta<T> {
    head: Option<T>,
    tail: Option<T>,
    len: u64,
}

impl<T> Default for ListMeta<T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Node<T> {
    prev: Option<T>,
    next: Option<T>,
}

/// Handle to a named list. Holds no data itself.
#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    name: String,
    _item: PhantomData<fn() -> T>,
}

impl<T: ListItem> LinkedList<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _item: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn meta_key(&self) -> String {
        format!("{}:meta", self.name)
    }

    fn node_key(&self, item: &T) -> String {
        format!("{}:node:{}", self.name, item.item_key())
    }

    fn meta<K: KvStore + ?Sized>(&self, kv: &K) -> Result<ListMeta<T>> {
        Ok(load(kv, &self.meta_key())?.unwrap_or_default())
    }

    fn node<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<Option<Node<T>>> {
        load(kv, &self.node_key(item))
    }

    fn require_node<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<Node<T>> {
        self.node(kv, item)?
            .ok_or_else(|| SwapbookError::not_found(&self.name, item))
    }

    fn ensure_absent<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<()> {
        if self.node(kv, item)?.is_some() {
            return Err(SwapbookError::already_exists(&self.name, item));
        }
        Ok(())
    }

    /// Rewrite one pointer of an existing neighbour.
    fn relink<K: KvStore + ?Sized>(
        &self,
        kv: &mut K,
        neighbour: &T,
        update: impl FnOnce(&mut Node<T>),
    ) -> Result<()> {
        let mut node = self.node(kv, neighbour)?.ok_or_else(|| SwapbookError::BookCorrupted {
            reason: format!("{} links to missing node {neighbour}", self.name),
        })?;
        update(&mut node);
        save(kv, &self.node_key(neighbour), &node)
    }

    // =================================================================
    // Queries
    // =================================================================

    pub fn len<K: KvStore + ?Sized>(&self, kv: &K) -> Result<u64> {
        Ok(self.meta(kv)?.len)
    }

    pub fn is_empty<K: KvStore + ?Sized>(&self, kv: &K) -> Result<bool> {
        Ok(self.len(kv)? == 0)
    }

    pub fn contains<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<bool> {
        Ok(self.node(kv, item)?.is_some())
    }

    pub fn head<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Option<T>> {
        Ok(self.meta(kv)?.head)
    }

    pub fn tail<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Option<T>> {
        Ok(self.meta(kv)?.tail)
    }

    /// Successor of a member.
    pub fn next<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<Option<T>> {
        Ok(self.require_node(kv, item)?.next)
    }

    /// Predecessor of a member.
    pub fn prev<K: KvStore + ?Sized>(&self, kv: &K, item: &T) -> Result<Option<T>> {
        Ok(self.require_node(kv, item)?.prev)
    }

    // =================================================================
    // Mutation
    // =================================================================

    pub fn append<K: KvStore + ?Sized>(&self, kv: &mut K, item: T) -> Result<()> {
        self.ensure_absent(kv, &item)?;
        let mut meta = self.meta(kv)?;
        match &meta.tail {
            Some(tail) => self.relink(kv, tail, |n| n.next = Some(item.clone()))?,
            None => meta.head = Some(item.clone()),
        }
        let node = Node {
            prev: meta.tail.take(),
            next: None,
        };
        save(kv, &self.node_key(&item), &node)?;
        meta.tail = Some(item);
        meta.len += 1;
        save(kv, &self.meta_key(), &meta)
    }

    pub fn prepend<K: KvStore + ?Sized>(&self, kv: &mut K, item: T) -> Result<()> {
        self.ensure_absent(kv, &item)?;
        let mut meta = self.meta(kv)?;
        match &meta.head {
            Some(head) => self.relink(kv, head, |n| n.prev = Some(item.clone()))?,
            None => meta.tail = Some(item.clone()),
        }
        let node = Node {
            prev: None,
            next: meta.head.take(),
        };
        save(kv, &self.node_key(&item), &node)?;
        meta.head = Some(item);
        meta.len += 1;
        save(kv, &self.meta_key(), &meta)
    }

    /// Insert `item` immediately before the member `anchor`.
    pub fn insert_before<K: KvStore + ?Sized>(&self, kv: &mut K, item: T, anchor: &T) -> Result<()> {
        self.ensure_absent(kv, &item)?;
        let mut anchor_node = self.require_node(kv, anchor)?;
        let mut meta = self.meta(kv)?;
        match &anchor_node.prev {
            Some(prev) => self.relink(kv, prev, |n| n.next = Some(item.clone()))?,
            None => meta.head = Some(item.clone()),
        }
        let node = Node {
            prev: anchor_node.prev.take(),
            next: Some(anchor.clone()),
        };
        anchor_node.prev = Some(item.clone());
        save(kv, &self.node_key(anchor), &anchor_node)?;
        save(kv, &self.node_key(&item), &node)?;
        meta.len += 1;
        save(kv, &self.meta_key(), &meta)
    }

    pub fn remove<K: KvStore + ?Sized>(&self, kv: &mut K, item: &T) -> Result<()> {
        let node = self.require_node(kv, item)?;
        let mut meta = self.meta(kv)?;
        match &node.prev {
            Some(prev) => self.relink(kv, prev, |n| n.next.clone_from(&node.next))?,
            None => meta.head.clone_from(&node.next),
        }
        match &node.next {
            Some(next) => self.relink(kv, next, |n| n.prev.clone_from(&node.prev))?,
            None => meta.tail.clone_from(&node.prev),
        }
        kv.delete(&self.node_key(item));
        meta.len = meta.len.saturating_sub(1);
        save(kv, &self.meta_key(), &meta)
    }

    // =================================================================
    // Pagination
    // =================================================================

    /// Up to `limit` members starting at position `offset`.
    pub fn range<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<T>> {
        self.iter(kv)?.skip(offset).take(limit).collect()
    }

    /// Up to `limit` members following `cursor` (from the head when `None`).
    pub fn after<K: KvStore + ?Sized>(
        &self,
        kv: &K,
        cursor: Option<&T>,
        limit: usize,
    ) -> Result<Vec<T>> {
        let start = match cursor {
            Some(c) => self.next(kv, c)?,
            None => self.head(kv)?,
        };
        self.iter_from(kv, start).take(limit).collect()
    }

    /// Every member, head to tail.
    pub fn to_vec<K: KvStore + ?Sized>(&self, kv: &K) -> Result<Vec<T>> {
        self.iter(kv)?.collect()
    }

    /// Lazy head-to-tail walk.
    pub fn iter<'k, K: KvStore + ?Sized>(&self, kv: &'k K) -> Result<Iter<'k, K, T>> {
        let head = self.head(kv)?;
        Ok(self.iter_from(kv, head))
    }

    fn iter_from<'k, K: KvStore + ?Sized>(&self, kv: &'k K, start: Option<T>) -> Iter<'k, K, T> {
        Iter {
            list: self.clone(),
            kv,
            cursor: start,
        }
    }
}

/// Iterator returned by [`LinkedList::iter`].
pub struct Iter<'k, K: KvStore + ?Sized, T> {
    list: LinkedList<T>,
    kv: &'k K,
    cursor: Option<T>,
}

impl<K: KvStore + ?Sized, T: ListItem> Iterator for Iter<'_, K, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        match self.list.require_node(self.kv, &current) {
            Ok(node) => {
                self.cursor = node.next;
                Some(Ok(current))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use swapbook_types::SwapId;

    fn list() -> LinkedList<SwapId> {
        LinkedList::new("test")
    }

    fn ids(raw: &[u64]) -> Vec<SwapId> {
        raw.iter().map(|&i| SwapId(i)).collect()
    }

    /// Forward and backward walks agree and match `len`.
    fn assert_consistent(store: &MemoryStore, list: &LinkedList<SwapId>) {
        let forward = list.to_vec(store).unwrap();
        let mut backward = Vec::new();
        let mut cursor = list.tail(store).unwrap();
        while let Some(item) = cursor {
            cursor = list.prev(store, &item).unwrap();
            backward.push(item);
        }
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len() as u64, list.len(store).unwrap());
    }

    #[test]
    fn append_and_prepend_order() {
        let mut store = MemoryStore::new();
        let l = list();
        l.append(&mut store, SwapId(2)).unwrap();
        l.append(&mut store, SwapId(3)).unwrap();
        l.prepend(&mut store, SwapId(1)).unwrap();
        assert_eq!(l.to_vec(&store).unwrap(), ids(&[1, 2, 3]));
        assert_eq!(l.head(&store).unwrap(), Some(SwapId(1)));
        assert_eq!(l.tail(&store).unwrap(), Some(SwapId(3)));
        assert_consistent(&store, &l);
    }

    #[test]
    fn insert_before_head_and_middle() {
        let mut store = MemoryStore::new();
        let l = list();
        l.append(&mut store, SwapId(10)).unwrap();
        l.append(&mut store, SwapId(30)).unwrap();
        l.insert_before(&mut store, SwapId(20), &SwapId(30)).unwrap();
        l.insert_before(&mut store, SwapId(5), &SwapId(10)).unwrap();
        assert_eq!(l.to_vec(&store).unwrap(), ids(&[5, 10, 20, 30]));
        assert_consistent(&store, &l);
    }

    #[test]
    fn remove_head_middle_tail_and_last() {
        let mut store = MemoryStore::new();
        let l = list();
        for i in 1..=4 {
            l.append(&mut store, SwapId(i)).unwrap();
        }
        l.remove(&mut store, &SwapId(2)).unwrap();
        assert_eq!(l.to_vec(&store).unwrap(), ids(&[1, 3, 4]));
        l.remove(&mut store, &SwapId(1)).unwrap();
        l.remove(&mut store, &SwapId(4)).unwrap();
        assert_eq!(l.to_vec(&store).unwrap(), ids(&[3]));
        assert_consistent(&store, &l);
        l.remove(&mut store, &SwapId(3)).unwrap();
        assert!(l.is_empty(&store).unwrap());
        assert_eq!(l.head(&store).unwrap(), None);
        assert_eq!(l.tail(&store).unwrap(), None);
    }

    #[test]
    fn duplicates_and_missing_items_rejected() {
        let mut store = MemoryStore::new();
        let l = list();
        l.append(&mut store, SwapId(1)).unwrap();
        assert!(matches!(
            l.append(&mut store, SwapId(1)),
            Err(SwapbookError::ItemAlreadyExists { .. })
        ));
        assert!(matches!(
            l.prepend(&mut store, SwapId(1)),
            Err(SwapbookError::ItemAlreadyExists { .. })
        ));
        assert!(matches!(
            l.remove(&mut store, &SwapId(9)),
            Err(SwapbookError::ItemNotFound { .. })
        ));
        assert!(matches!(
            l.insert_before(&mut store, SwapId(2), &SwapId(9)),
            Err(SwapbookError::ItemNotFound { .. })
        ));
        assert_eq!(l.len(&store).unwrap(), 1);
    }

    #[test]
    fn range_and_cursor_pagination() {
        let mut store = MemoryStore::new();
        let l = list();
        for i in 1..=7 {
            l.append(&mut store, SwapId(i)).unwrap();
        }
        assert_eq!(l.range(&store, 0, 3).unwrap(), ids(&[1, 2, 3]));
        assert_eq!(l.range(&store, 5, 10).unwrap(), ids(&[6, 7]));
        assert!(l.range(&store, 9, 3).unwrap().is_empty());

        let first = l.after(&store, None, 3).unwrap();
        assert_eq!(first, ids(&[1, 2, 3]));
        let second = l.after(&store, first.last(), 3).unwrap();
        assert_eq!(second, ids(&[4, 5, 6]));
        let third = l.after(&store, second.last(), 3).unwrap();
        assert_eq!(third, ids(&[7]));
        assert!(l.after(&store, third.last(), 3).unwrap().is_empty());
    }

    #[test]
    fn lists_with_different_names_do_not_share_nodes() {
        let mut store = MemoryStore::new();
        let a = LinkedList::<SwapId>::new("a");
        let b = LinkedList::<SwapId>::new("b");
        a.append(&mut store, SwapId(1)).unwrap();
        b.append(&mut store, SwapId(1)).unwrap();
        a.remove(&mut store, &SwapId(1)).unwrap();
        assert!(b.contains(&store, &SwapId(1)).unwrap());
    }

    #[test]
    fn randomized_operations_match_vec_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut store = MemoryStore::new();
        let l = list();
        let mut model: Vec<SwapId> = Vec::new();

        for _ in 0..500 {
            let item = SwapId(rng.gen_range(1..40));
            let present = model.contains(&item);
            match rng.gen_range(0..4) {
                0 if !present => {
                    l.append(&mut store, item).unwrap();
                    model.push(item);
                }
                1 if !present => {
                    l.prepend(&mut store, item).unwrap();
                    model.insert(0, item);
                }
                2 if !present && !model.is_empty() => {
                    let pos = rng.gen_range(0..model.len());
                    let anchor = model[pos];
                    l.insert_before(&mut store, item, &anchor).unwrap();
                    model.insert(pos, item);
                }
                3 if present => {
                    l.remove(&mut store, &item).unwrap();
                    model.retain(|x| *x != item);
                }
                _ => {}
            }
        }
        assert_eq!(l.to_vec(&store).unwrap(), model);
        assert_consistent(&store, &l);
    }
}
