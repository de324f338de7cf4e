//! In-process call driver.
//!
//! [`Host`] plays the part of the surrounding chain: it stamps each call
//! with a caller, a monotonic timestamp and a fresh transaction id, moves
//! the funds a call carries into custody before the engine runs, and hands
//! them back if the call fails. Balances live in a [`Vault`].

use chrono::{DateTime, Duration, Utc};
use swapbook_ledger::KvStore;
use swapbook_types::{Address, AssetId, CallContext, EngineConfig, Result, SwapId, TransactionId};
use tracing::{debug, info};

use crate::engine::{SwapEngine, SwapRequest};
use crate::limit_order::LimitOrder;
use crate::receipt::{CallReceipt, CreateOutcome, FillOutcome, LimitOrderOutcome};
use crate::registry::AssetRegistry;
use crate::supply::{SupplyConservation, verify_custody};
use crate::vault::Vault;

pub struct Host<S, R> {
    engine: SwapEngine<S, R, Vault>,
    supply: SupplyConservation,
    clock: DateTime<Utc>,
    nonce: u64,
}

impl<S: KvStore, R: AssetRegistry> Host<S, R> {
    pub fn new(store: S, registry: R, config: EngineConfig) -> Result<Self> {
        let vault = Vault::new(config.custody.clone());
        Ok(Self {
            engine: SwapEngine::new(store, registry, vault, config)?,
            supply: SupplyConservation::new(),
            clock: DateTime::UNIX_EPOCH,
            nonce: 0,
        })
    }

    /// Start the clock at `start` instead of the epoch.
    #[must_use]
    pub fn with_clock(mut self, start: DateTime<Utc>) -> Self {
        self.clock = start;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &SwapEngine<S, R, Vault> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SwapEngine<S, R, Vault> {
        &mut self.engine
    }

    #[must_use]
    pub fn vault(&self) -> &Vault {
        self.engine.funds()
    }

    pub fn vault_mut(&mut self) -> &mut Vault {
        self.engine.funds_mut()
    }

    #[must_use]
    pub fn balance(&self, account: &Address, asset: &AssetId) -> u128 {
        self.vault().balance(account, asset)
    }

    /// Next call context: one second later, a new transaction id.
    pub fn context(&mut self, caller: &Address) -> CallContext {
        self.nonce += 1;
        self.clock += Duration::seconds(1);
        CallContext::new(
            caller.clone(),
            self.clock,
            TransactionId::derive(&self.nonce.to_be_bytes()),
        )
    }

    /// Mint funds to an account from outside the system.
    pub fn deposit(&mut self, account: &Address, asset: &AssetId, amount: u128) -> Result<()> {
        self.engine.funds_mut().deposit(account, asset, amount)?;
        self.supply.record_deposit(asset, amount)?;
        info!(account = %account, asset = %asset, amount, "Deposit");
        Ok(())
    }

    /// Run an engine call carrying `amount` of `asset` from `caller`.
    fn with_attached<T>(
        &mut self,
        caller: &Address,
        asset: &AssetId,
        amount: u128,
        call: impl FnOnce(&mut SwapEngine<S, R, Vault>, &CallContext) -> Result<T>,
    ) -> Result<T> {
        let ctx = self.context(caller);
        self.engine.funds_mut().attach(caller, asset, amount)?;
        match call(&mut self.engine, &ctx) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.engine.funds_mut().detach(caller, asset, amount)?;
                debug!(caller = %caller, asset = %asset, amount, "Attached funds returned");
                Err(err)
            }
        }
    }

    pub fn create_swap(&mut self, caller: &Address, request: SwapRequest) -> Result<CallReceipt<CreateOutcome>> {
        let asset = request.maker_asset.clone();
        let amount = request.maker_amount;
        self.with_attached(caller, &asset, amount, |engine, ctx| engine.create_swap(ctx, request))
    }

    pub fn fill_swap(
        &mut self,
        caller: &Address,
        swap: SwapId,
        taker_asset: AssetId,
        taker_amount: u128,
    ) -> Result<CallReceipt<FillOutcome>> {
        let asset = taker_asset.clone();
        self.with_attached(caller, &asset, taker_amount, |engine, ctx| {
            engine.fill_swap(ctx, swap, taker_asset, taker_amount)
        })
    }

    pub fn create_limit_order(
        &mut self,
        caller: &Address,
        order: LimitOrder,
    ) -> Result<CallReceipt<LimitOrderOutcome>> {
        let asset = order.maker_asset.clone();
        let amount = order.maker_amount;
        self.with_attached(caller, &asset, amount, |engine, ctx| {
            engine.create_limit_order(ctx, order)
        })
    }

    /// Cancel carries no funds.
    pub fn cancel_swap(&mut self, caller: &Address, swap: SwapId) -> Result<CallReceipt<SwapId>> {
        let ctx = self.context(caller);
        self.engine.cancel_swap(&ctx, swap)
    }

    /// Both supply invariants, for every asset the vault has seen.
    pub fn check_supply(&self) -> Result<()> {
        self.supply.verify_vault(self.vault())?;
        verify_custody(&self.engine.escrowed()?, self.vault())
    }
}
