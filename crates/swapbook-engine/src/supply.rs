//! Supply conservation.
//!
//! Two invariants hold after every committed call:
//! ```text
//! ∀ asset: Σ balances            == Σ deposits
//! ∀ asset: custody balance       == Σ amount of FILLED orders
//! ```
//!
//! The first says the engine never creates or destroys funds; the second
//! says custody holds exactly what open orders promise, so every rounding
//! remainder and dust amount went back to its owner.

use std::collections::BTreeMap;

use swapbook_ledger::KvStore;
use swapbook_types::{AssetId, OrderId, OrderStatus, Result, SwapbookError};

use crate::engine::SwapEngine;
use crate::registry::AssetRegistry;
use crate::vault::{FundsTransfer, Vault};

/// Per-asset deposit totals since genesis.
#[derive(Debug, Clone, Default)]
pub struct SupplyConservation {
    deposits: BTreeMap<AssetId, u128>,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_deposit(&mut self, asset: &AssetId, amount: u128) -> Result<()> {
        let total = self.deposits.entry(asset.clone()).or_default();
        *total = total
            .checked_add(amount)
            .ok_or(SwapbookError::ArithmeticOverflow)?;
        Ok(())
    }

    #[must_use]
    pub fn expected_supply(&self, asset: &AssetId) -> u128 {
        self.deposits.get(asset).copied().unwrap_or(0)
    }

    pub fn tracked_assets(&self) -> impl Iterator<Item = &AssetId> {
        self.deposits.keys()
    }

    /// # Errors
    /// [`SwapbookError::SupplyViolation`] if `actual` differs from the
    /// deposited total.
    pub fn verify(&self, asset: &AssetId, actual: u128) -> Result<()> {
        let expected = self.expected_supply(asset);
        if actual != expected {
            return Err(SwapbookError::SupplyViolation {
                reason: format!("{asset}: actual supply {actual} != deposited {expected}"),
            });
        }
        Ok(())
    }

    /// Check every tracked asset against the vault.
    pub fn verify_vault(&self, vault: &Vault) -> Result<()> {
        for asset in vault.assets().iter().chain(self.tracked_assets()) {
            self.verify(asset, vault.total_supply(asset))?;
        }
        Ok(())
    }
}

impl<S: KvStore, R: AssetRegistry, F: FundsTransfer> SwapEngine<S, R, F> {
    /// Amount held by FILLED orders, per asset. Scans the whole order table.
    pub fn escrowed(&self) -> Result<BTreeMap<AssetId, u128>> {
        let mut held: BTreeMap<AssetId, u128> = BTreeMap::new();
        let OrderId(last) = self.orders.last_id(&self.store)?;
        for id in 1..=last {
            let order = self.orders.get(&self.store, OrderId(id))?;
            if order.status == OrderStatus::Filled {
                let total = held.entry(order.asset).or_default();
                *total = total
                    .checked_add(order.amount)
                    .ok_or(SwapbookError::ArithmeticOverflow)?;
            }
        }
        Ok(held)
    }
}

/// Custody must hold exactly the escrowed amounts, nothing more.
pub fn verify_custody(escrowed: &BTreeMap<AssetId, u128>, vault: &Vault) -> Result<()> {
    for asset in vault.assets().iter().chain(escrowed.keys()) {
        let expected = escrowed.get(asset).copied().unwrap_or(0);
        let actual = vault.custody_balance(asset);
        if actual != expected {
            return Err(SwapbookError::SupplyViolation {
                reason: format!("{asset}: custody holds {actual}, open orders hold {expected}"),
            });
        }
    }
    Ok(())
}
