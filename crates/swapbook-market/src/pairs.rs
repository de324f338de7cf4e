//! Registry of pairs that ever had a public listing.

use swapbook_ledger::{KvStore, UniqueSet};
use swapbook_types::{Result, TradingPair};
use tracing::info;

use crate::book::MarketBook;

#[derive(Debug, Clone)]
pub struct MarketRegistry {
    pairs: UniqueSet<TradingPair>,
}

impl Default for MarketRegistry {
    fn default() -> Self {
        Self {
            pairs: UniqueSet::new("market:pairs"),
        }
    }
}

impl MarketRegistry {
    /// Record a pair. Registering a known pair is a no-op.
    pub fn register<K: KvStore + ?Sized>(&self, kv: &mut K, pair: &TradingPair) -> Result<()> {
        if self.pairs.add(kv, pair.clone())? {
            info!(pair = %pair, "New trading pair");
        }
        Ok(())
    }

    pub fn is_known<K: KvStore + ?Sized>(&self, kv: &K, pair: &TradingPair) -> Result<bool> {
        self.pairs.contains(kv, pair)
    }

    pub fn pairs<K: KvStore + ?Sized>(&self, kv: &K, offset: usize, limit: usize) -> Result<Vec<TradingPair>> {
        self.pairs.range(kv, offset, limit)
    }

    pub fn pairs_after<K: KvStore + ?Sized>(
        &self,
        kv: &K,
        cursor: Option<&TradingPair>,
        limit: usize,
    ) -> Result<Vec<TradingPair>> {
        self.pairs.after(kv, cursor, limit)
    }

    pub fn count<K: KvStore + ?Sized>(&self, kv: &K) -> Result<u64> {
        self.pairs.len(kv)
    }

    #[must_use]
    pub fn book(&self, pair: TradingPair) -> MarketBook {
        MarketBook::new(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapbook_ledger::MemoryStore;
    use swapbook_types::AssetId;

    #[test]
    fn register_is_idempotent_and_orientation_free() {
        let mut store = MemoryStore::new();
        let registry = MarketRegistry::default();
        let ab = TradingPair::new(AssetId::new("cxa"), AssetId::new("cxb"));
        let ba = TradingPair::new(AssetId::new("cxb"), AssetId::new("cxa"));
        registry.register(&mut store, &ab).unwrap();
        registry.register(&mut store, &ba).unwrap();
        assert_eq!(registry.count(&store).unwrap(), 1);
        assert!(registry.is_known(&store, &ba).unwrap());
        assert_eq!(registry.pairs(&store, 0, 10).unwrap(), vec![ab]);
    }

    #[test]
    fn pairs_with_colliding_names_stay_apart() {
        let mut store = MemoryStore::new();
        let registry = MarketRegistry::default();
        let left = TradingPair::new(AssetId::new("cxa/cxb"), AssetId::new("cxc"));
        let right = TradingPair::new(AssetId::new("cxa"), AssetId::new("cxb/cxc"));
        registry.register(&mut store, &left).unwrap();
        registry.register(&mut store, &right).unwrap();
        assert_eq!(registry.count(&store).unwrap(), 2);
        assert_eq!(registry.pairs_after(&store, Some(&left), 10).unwrap(), vec![right]);
    }
}
