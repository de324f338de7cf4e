//! Asset allow-list and precision lookup.

use std::collections::BTreeMap;

use swapbook_types::{AssetId, EngineConfig, Result, SwapbookError};
use tracing::info;

/// Which assets may trade, and how many decimals each has.
pub trait AssetRegistry {
    fn is_allowed(&self, asset: &AssetId) -> bool;

    /// Native decimals. `AssetNotAllowed` for unknown assets.
    fn decimals(&self, asset: &AssetId) -> Result<u32>;

    fn ensure_allowed(&self, asset: &AssetId) -> Result<()> {
        if self.is_allowed(asset) {
            Ok(())
        } else {
            Err(SwapbookError::AssetNotAllowed(asset.clone()))
        }
    }
}

/// Fixed allow-list held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    assets: BTreeMap<AssetId, u32>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            assets: config
                .assets
                .iter()
                .map(|a| (a.id.clone(), a.decimals))
                .collect(),
        }
    }

    /// Allow an asset, or update its decimals.
    pub fn add(&mut self, asset: AssetId, decimals: u32) {
        info!(asset = %asset, decimals, "Asset allowed");
        self.assets.insert(asset, decimals);
    }

    /// Stop allowing new swaps on an asset. Open swaps on it can still be
    /// settled in full or cancelled.
    pub fn remove(&mut self, asset: &AssetId) -> Result<()> {
        self.assets
            .remove(asset)
            .map(|_| info!(asset = %asset, "Asset removed"))
            .ok_or_else(|| SwapbookError::AssetNotAllowed(asset.clone()))
    }

    pub fn assets(&self) -> impl Iterator<Item = (&AssetId, u32)> {
        self.assets.iter().map(|(a, d)| (a, *d))
    }
}

impl AssetRegistry for StaticRegistry {
    fn is_allowed(&self, asset: &AssetId) -> bool {
        self.assets.contains_key(asset)
    }

    fn decimals(&self, asset: &AssetId) -> Result<u32> {
        self.assets
            .get(asset)
            .copied()
            .ok_or_else(|| SwapbookError::AssetNotAllowed(asset.clone()))
    }
}
