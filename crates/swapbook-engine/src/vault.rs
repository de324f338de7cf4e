//! Fund movement.
//!
//! The engine never touches balances directly. Each call queues
//! [`Transfer`]s out of custody and hands them to a [`FundsTransfer`]
//! implementation in one batch when the call commits.
//!
//! [`Vault`] is the in-memory implementation: per-(account, asset) balances
//! with a custody account holding the funds of every open order.

use std::collections::{BTreeMap, BTreeSet};

use swapbook_types::{Address, AssetId, Result, SwapbookError, Transfer};
use tracing::{debug, warn};

/// Executes outgoing transfers from custody.
pub trait FundsTransfer {
    fn transfer(&mut self, transfer: &Transfer) -> Result<()>;

    /// Execute a batch. Implementations that can should apply all or none;
    /// the default runs the batch in order and stops at the first failure.
    fn transfer_all(&mut self, transfers: &[Transfer]) -> Result<()> {
        for transfer in transfers {
            self.transfer(transfer)?;
        }
        Ok(())
    }
}

/// In-memory balances with a custody account.
#[derive(Debug, Clone)]
pub struct Vault {
    custody: Address,
    balances: BTreeMap<(Address, AssetId), u128>,
    /// Destinations that refuse incoming funds.
    rejecting: BTreeSet<Address>,
}

impl Vault {
    #[must_use]
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: BTreeMap::new(),
            rejecting: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn custody(&self) -> &Address {
        &self.custody
    }

    /// Credit an account from outside the system.
    pub fn deposit(&mut self, account: &Address, asset: &AssetId, amount: u128) -> Result<()> {
        let entry = self
            .balances
            .entry((account.clone(), asset.clone()))
            .or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(SwapbookError::ArithmeticOverflow)?;
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, account: &Address, asset: &AssetId) -> u128 {
        self.balances
            .get(&(account.clone(), asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn custody_balance(&self, asset: &AssetId) -> u128 {
        self.balance(&self.custody, asset)
    }

    /// Sum of every account's balance of `asset`, custody included.
    #[must_use]
    pub fn total_supply(&self, asset: &AssetId) -> u128 {
        self.balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Assets with at least one balance entry.
    #[must_use]
    pub fn assets(&self) -> BTreeSet<AssetId> {
        self.balances.keys().map(|(_, a)| a.clone()).collect()
    }

    /// Make `account` refuse every incoming transfer.
    pub fn reject_transfers_to(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    pub fn accept_transfers_to(&mut self, account: &Address) {
        self.rejecting.remove(account);
    }

    /// Move funds a caller attached to a call into custody.
    pub fn attach(&mut self, from: &Address, asset: &AssetId, amount: u128) -> Result<()> {
        let custody = self.custody.clone();
        self.move_funds(from, &custody, asset, amount)
    }

    /// Return attached funds from custody to the caller.
    pub fn detach(&mut self, to: &Address, asset: &AssetId, amount: u128) -> Result<()> {
        let custody = self.custody.clone();
        self.move_funds(&custody, to, asset, amount)
    }

    fn move_funds(&mut self, from: &Address, to: &Address, asset: &AssetId, amount: u128) -> Result<()> {
        let available = self.balance(from, asset);
        if available < amount {
            return Err(SwapbookError::InsufficientFunds {
                account: from.clone(),
                asset: asset.clone(),
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to, asset)
            .checked_add(amount)
            .ok_or(SwapbookError::ArithmeticOverflow)?;
        self.balances
            .insert((from.clone(), asset.clone()), available - amount);
        self.balances.insert((to.clone(), asset.clone()), credited);
        Ok(())
    }

    fn check_destination(&self, transfer: &Transfer) -> Result<()> {
        if self.rejecting.contains(&transfer.destination) {
            return Err(SwapbookError::TransferFailed {
                reason: format!("{} refused {}", transfer.destination, transfer),
            });
        }
        Ok(())
    }
}

impl FundsTransfer for Vault {
    fn transfer(&mut self, transfer: &Transfer) -> Result<()> {
        self.check_destination(transfer)?;
        let custody = self.custody.clone();
        self.move_funds(&custody, &transfer.destination, &transfer.asset, transfer.amount)?;
        debug!(%transfer, "Transfer executed");
        Ok(())
    }

    /// All or nothing: every destination and the aggregate custody debit
    /// per asset are checked before any balance changes.
    fn transfer_all(&mut self, transfers: &[Transfer]) -> Result<()> {
        let mut needed: BTreeMap<&AssetId, u128> = BTreeMap::new();
        for transfer in transfers {
            self.check_destination(transfer)?;
            let total = needed.entry(&transfer.asset).or_default();
            *total = total
                .checked_add(transfer.amount)
                .ok_or(SwapbookError::ArithmeticOverflow)?;
        }
        for (asset, amount) in &needed {
            let available = self.custody_balance(asset);
            if available < *amount {
                warn!(asset = %asset, needed = amount, available, "Custody short for batch");
                return Err(SwapbookError::InsufficientFunds {
                    account: self.custody.clone(),
                    asset: (*asset).clone(),
                    needed: *amount,
                    available,
                });
            }
        }
        for transfer in transfers {
            self.transfer(transfer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    fn asset() -> AssetId {
        AssetId::new("cxa")
    }

    fn send(amount: u128, to: &str) -> Transfer {
        Transfer {
            asset: asset(),
            amount,
            destination: addr(to),
        }
    }

    #[test]
    fn attach_and_detach_roundtrip() {
        let mut vault = Vault::new(addr("cxcustody"));
        vault.deposit(&addr("hxalice"), &asset(), 100).unwrap();
        vault.attach(&addr("hxalice"), &asset(), 60).unwrap();
        assert_eq!(vault.balance(&addr("hxalice"), &asset()), 40);
        assert_eq!(vault.custody_balance(&asset()), 60);
        vault.detach(&addr("hxalice"), &asset(), 60).unwrap();
        assert_eq!(vault.balance(&addr("hxalice"), &asset()), 100);
        assert_eq!(vault.total_supply(&asset()), 100);
    }

    #[test]
    fn attach_more_than_owned_fails() {
        let mut vault = Vault::new(addr("cxcustody"));
        vault.deposit(&addr("hxalice"), &asset(), 10).unwrap();
        let err = vault.attach(&addr("hxalice"), &asset(), 11).unwrap_err();
        assert!(matches!(
            err,
            SwapbookError::InsufficientFunds {
                needed: 11,
                available: 10,
                ..
            }
        ));
    }

    #[test]
    fn batch_is_all_or_nothing_on_rejection() {
        let mut vault = Vault::new(addr("cxcustody"));
        vault.deposit(&addr("cxcustody"), &asset(), 100).unwrap();
        vault.reject_transfers_to(addr("hxbad"));

        let err = vault
            .transfer_all(&[send(10, "hxgood"), send(10, "hxbad")])
            .unwrap_err();
        assert!(matches!(err, SwapbookError::TransferFailed { .. }));
        assert_eq!(vault.balance(&addr("hxgood"), &asset()), 0);
        assert_eq!(vault.custody_balance(&asset()), 100);
    }

    #[test]
    fn batch_is_all_or_nothing_on_shortfall() {
        let mut vault = Vault::new(addr("cxcustody"));
        vault.deposit(&addr("cxcustody"), &asset(), 15).unwrap();
        assert!(vault.transfer_all(&[send(10, "hx1"), send(10, "hx2")]).is_err());
        assert_eq!(vault.custody_balance(&asset()), 15);

        vault.transfer_all(&[send(10, "hx1"), send(5, "hx2")]).unwrap();
        assert_eq!(vault.custody_balance(&asset()), 0);
        assert_eq!(vault.balance(&addr("hx2"), &asset()), 5);
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut vault = Vault::new(addr("cxcustody"));
        vault.deposit(&addr("cxcustody"), &asset(), 7).unwrap();
        vault.transfer(&send(7, "cxcustody")).unwrap();
        assert_eq!(vault.custody_balance(&asset()), 7);
    }
}
