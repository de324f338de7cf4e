//! Configuration types for a SwapBook engine.

use serde::{Deserialize, Serialize};

use crate::{Address, AssetId, Precision, Result, SwapbookError, constants};

/// An allow-listed asset and its native decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub id: AssetId,
    pub decimals: u32,
}

impl AssetConfig {
    #[must_use]
    pub fn new(id: AssetId, decimals: u32) -> Self {
        Self { id, decimals }
    }

    /// The native currency with its default decimals.
    #[must_use]
    pub fn native() -> Self {
        Self {
            id: AssetId::native(),
            decimals: constants::NATIVE_DECIMALS,
        }
    }
}

fn default_max_decimals() -> u32 {
    constants::SWAP_MAX_DECIMALS
}

fn default_page_size() -> usize {
    constants::MAX_ITERATION_LOOP
}

fn default_custody() -> Address {
    Address::new(constants::DEFAULT_CUSTODY_ADDRESS)
}

/// Engine-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fractional digits kept for traded amounts.
    #[serde(default = "default_max_decimals")]
    pub max_decimals: u32,
    /// Maximum items returned by a paginated read.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Account holding funds of open orders.
    #[serde(default = "default_custody")]
    pub custody: Address,
    /// Initial allow-list.
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_decimals: default_max_decimals(),
            page_size: default_page_size(),
            custody: default_custody(),
            assets: vec![AssetConfig::native()],
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SwapbookError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SwapbookError::Configuration(
                "page_size must be greater than zero".into(),
            ));
        }
        for (i, asset) in self.assets.iter().enumerate() {
            Precision::new(asset.decimals, self.max_decimals)?;
            if self.assets[..i].iter().any(|a| a.id == asset.id) {
                return Err(SwapbookError::Configuration(format!(
                    "asset {} listed twice",
                    asset.id
                )));
            }
        }
        Ok(())
    }
}
