//! The swap engine.
//!
//! Every public operation runs inside [`SwapEngine::run`]:
//!
//! 1. A [`Journal`] is opened over the store
//! 2. The operation stages writes, transfers and events into it
//! 3. On success, the queued transfers execute as one batch
//! 4. Only then are the staged writes applied to the store
//!
//! An error at any step drops the journal, so a failed call leaves no
//! trace: no index changes, no transfers, no events.

use swapbook_ledger::{AccountIndex, Journal, KvStore, OrderTable, SwapTable, SystemIndex};
use swapbook_market::MarketRegistry;
use swapbook_types::{
    Address, AssetId, CallContext, EngineConfig, Order, OrderStatus, Precision, Result, Swap,
    SwapEvent, SwapId, SwapStatus, SwapbookError, TradingPair, Transfer, mul_div_floor,
};
use tracing::{debug, info, warn};

use crate::receipt::{CallReceipt, CreateOutcome, FillOutcome};
use crate::registry::AssetRegistry;
use crate::vault::FundsTransfer;

/// A swap offer as submitted by its maker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub maker_asset: AssetId,
    pub maker_amount: u128,
    pub taker_asset: AssetId,
    pub taker_amount: u128,
    /// Reserve the swap for one taker. Reserved swaps are private.
    pub taker: Option<Address>,
}

impl SwapRequest {
    #[must_use]
    pub fn new(maker_asset: AssetId, maker_amount: u128, taker_asset: AssetId, taker_amount: u128) -> Self {
        Self {
            maker_asset,
            maker_amount,
            taker_asset,
            taker_amount,
            taker: None,
        }
    }

    #[must_use]
    pub fn reserved_for(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }
}

/// Why a swap is being cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cancellation {
    /// The maker asked for it.
    ByMaker,
    /// A partial fill left dust behind.
    Cleanup,
}

/// Everything needed to open a swap.
pub(crate) struct NewSwap<'a> {
    pub maker_asset: &'a AssetId,
    pub maker_amount: u128,
    pub taker_asset: &'a AssetId,
    pub taker_amount: u128,
    pub maker: &'a Address,
    pub taker: Option<Address>,
    pub private: bool,
    /// Insert into the market book.
    pub listed: bool,
}

/// `floor(paid * maker_amount / taker_amount)`, cut down to the maker
/// asset's tradable precision.
pub(crate) fn slice_share(
    precision: Precision,
    maker_amount: u128,
    taker_amount: u128,
    paid: u128,
) -> Result<u128> {
    Ok(precision
        .truncate(mul_div_floor(paid, maker_amount, taker_amount)?)
        .kept)
}

/// Orchestrates orders, swaps, indices and the market books over one store.
pub struct SwapEngine<S, R, F> {
    pub(crate) store: S,
    pub(crate) registry: R,
    pub(crate) funds: F,
    pub(crate) config: EngineConfig,
    pub(crate) orders: OrderTable,
    pub(crate) swaps: SwapTable,
    pub(crate) system: SystemIndex,
    pub(crate) markets: MarketRegistry,
}

impl<S: KvStore, R: AssetRegistry, F: FundsTransfer> SwapEngine<S, R, F> {
    pub fn new(store: S, registry: R, funds: F, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            max_decimals = config.max_decimals,
            page_size = config.page_size,
            custody = %config.custody,
            "Swap engine ready"
        );
        Ok(Self {
            store,
            registry,
            funds,
            config,
            orders: OrderTable::default(),
            swaps: SwapTable::default(),
            system: SystemIndex::default(),
            markets: MarketRegistry::default(),
        })
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    #[must_use]
    pub fn funds(&self) -> &F {
        &self.funds
    }

    pub fn funds_mut(&mut self) -> &mut F {
        &mut self.funds
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =================================================================
    // Call boundary
    // =================================================================

    /// Run `op` in a fresh journal and commit it.
    pub(crate) fn run<T>(
        &mut self,
        op: &'static str,
        ctx: &CallContext,
        f: impl FnOnce(&Self, &mut Journal<'_, S>) -> Result<T>,
    ) -> Result<CallReceipt<T>> {
        let (value, mut commit) = {
            let mut tx = Journal::new(&self.store);
            match f(self, &mut tx) {
                Ok(value) => (value, tx.into_commit()),
                Err(err) => {
                    warn!(op, caller = %ctx.caller, error = %err, "Call aborted");
                    return Err(err);
                }
            }
        };

        if let Err(err) = self.funds.transfer_all(&commit.transfers) {
            warn!(op, caller = %ctx.caller, error = %err, "Transfers refused, call aborted");
            return Err(err);
        }
        let writes = commit.write_into(&mut self.store);
        debug!(op, writes, events = commit.events.len(), "Call committed");

        Ok(CallReceipt {
            transaction: ctx.transaction,
            value,
            events: commit.events,
            transfers: commit.transfers,
        })
    }

    // =================================================================
    // Public operations
    // =================================================================

    /// Open a swap with the maker funds the caller attached.
    pub fn create_swap(
        &mut self,
        ctx: &CallContext,
        request: SwapRequest,
    ) -> Result<CallReceipt<CreateOutcome>> {
        self.run("create_swap", ctx, |engine, tx| engine.create_in(tx, ctx, &request))
    }

    /// Fill a pending swap, fully or partially, with the taker funds the
    /// caller attached.
    pub fn fill_swap(
        &mut self,
        ctx: &CallContext,
        swap: SwapId,
        taker_asset: AssetId,
        taker_amount: u128,
    ) -> Result<CallReceipt<FillOutcome>> {
        self.run("fill_swap", ctx, |engine, tx| {
            engine.fill_in(tx, ctx, swap, &taker_asset, taker_amount)
        })
    }

    /// Cancel a pending swap and refund its maker. Only the maker may.
    pub fn cancel_swap(&mut self, ctx: &CallContext, swap: SwapId) -> Result<CallReceipt<SwapId>> {
        self.run("cancel_swap", ctx, |engine, tx| {
            engine
                .cancel_in(tx, ctx, swap, Cancellation::ByMaker)
                .map(|()| swap)
        })
    }

    // =================================================================
    // Helpers
    // =================================================================

    pub(crate) fn precision(&self, asset: &AssetId) -> Result<Precision> {
        Precision::new(self.registry.decimals(asset)?, self.config.max_decimals)
    }

    pub(crate) fn validate_request(
        &self,
        maker_asset: &AssetId,
        maker_amount: u128,
        taker_asset: &AssetId,
        taker_amount: u128,
    ) -> Result<()> {
        self.registry.ensure_allowed(maker_asset)?;
        self.registry.ensure_allowed(taker_asset)?;
        if maker_asset == taker_asset {
            return Err(SwapbookError::SameAsset(maker_asset.clone()));
        }
        if maker_amount == 0 || taker_amount == 0 {
            return Err(SwapbookError::ZeroAmount);
        }
        Ok(())
    }

    /// Send funds back to `to` out of custody.
    pub(crate) fn refund(tx: &mut Journal<'_, S>, asset: &AssetId, amount: u128, to: &Address) {
        if amount == 0 {
            return;
        }
        tx.transfer(Transfer {
            asset: asset.clone(),
            amount,
            destination: to.clone(),
        });
        tx.emit(SwapEvent::FundsReturned {
            asset: asset.clone(),
            amount,
            destination: to.clone(),
        });
        debug!(asset = %asset, amount, to = %to, "Funds returned");
    }

    fn provider_of(order: &Order) -> Result<Address> {
        order
            .provider
            .clone()
            .ok_or_else(|| SwapbookError::Internal(format!("{} is filled without a provider", order.id)))
    }

    /// Pay an order's whole amount to `to`.
    fn pay_out(tx: &mut Journal<'_, S>, order: &Order, to: &Address) {
        tx.transfer(Transfer {
            asset: order.asset.clone(),
            amount: order.amount,
            destination: to.clone(),
        });
        tx.emit(SwapEvent::OrderTransferred {
            order: order.id,
            asset: order.asset.clone(),
            amount: order.amount,
            destination: to.clone(),
        });
    }

    // =================================================================
    // Create
    // =================================================================

    fn create_in(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        request: &SwapRequest,
    ) -> Result<CreateOutcome> {
        self.validate_request(
            &request.maker_asset,
            request.maker_amount,
            &request.taker_asset,
            request.taker_amount,
        )?;
        let maker_precision = self.precision(&request.maker_asset)?;
        let taker_precision = self.precision(&request.taker_asset)?;
        let maker = maker_precision.truncate(request.maker_amount);
        let taker = taker_precision.truncate(request.taker_amount);

        if maker_precision.is_dust(maker.kept) || taker_precision.is_dust(taker.kept) {
            Self::refund(tx, &request.maker_asset, request.maker_amount, &ctx.caller);
            warn!(
                maker = %ctx.caller,
                maker_amount = request.maker_amount,
                taker_amount = request.taker_amount,
                "Dust swap refunded"
            );
            return Ok(CreateOutcome::Dust {
                refunded: request.maker_amount,
            });
        }
        Self::refund(tx, &request.maker_asset, maker.exceed, &ctx.caller);

        let swap = self.open_swap(
            tx,
            ctx,
            NewSwap {
                maker_asset: &request.maker_asset,
                maker_amount: maker.kept,
                taker_asset: &request.taker_asset,
                taker_amount: taker.kept,
                maker: &ctx.caller,
                taker: request.taker.clone(),
                private: request.taker.is_some(),
                listed: request.taker.is_none(),
            },
        )?;
        Ok(CreateOutcome::Created {
            swap: swap.id,
            maker_order: swap.maker_order_id,
            taker_order: swap.taker_order_id,
        })
    }

    /// Allocate both orders and the swap, then index them.
    pub(crate) fn open_swap(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        new: NewSwap<'_>,
    ) -> Result<Swap> {
        let mut maker_order = self
            .orders
            .create(tx, new.maker_asset.clone(), new.maker_amount, None)?;
        maker_order.fill(new.maker.clone())?;
        self.orders.put(tx, &maker_order)?;
        let taker_order = self
            .orders
            .create(tx, new.taker_asset.clone(), new.taker_amount, new.taker)?;
        let swap = self.swaps.create(
            tx,
            maker_order.id,
            taker_order.id,
            new.maker.clone(),
            ctx.timestamp,
            new.private,
        )?;

        self.system.orders().add(tx, maker_order.id)?;
        self.system.orders().add(tx, taker_order.id)?;
        self.system.swaps().add(tx, swap.id)?;

        let pair = TradingPair::new(new.maker_asset.clone(), new.taker_asset.clone());
        AccountIndex::new(new.maker.clone()).add_pending(tx, &pair, swap.id)?;
        if new.listed {
            self.markets.register(tx, &pair)?;
            self.markets.book(pair.clone()).add(tx, swap.id)?;
        }

        tx.emit(SwapEvent::SwapCreated {
            swap: swap.id,
            maker_order: maker_order.id,
            taker_order: taker_order.id,
        });
        tx.emit(SwapEvent::OrderFilled {
            order: maker_order.id,
        });
        info!(
            swap = %swap.id,
            maker = %new.maker,
            pair = %pair,
            maker_amount = new.maker_amount,
            taker_amount = new.taker_amount,
            private = new.private,
            "Swap created"
        );
        Ok(swap)
    }

    // =================================================================
    // Fill
    // =================================================================

    pub(crate) fn fill_in(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        swap_id: SwapId,
        taker_asset: &AssetId,
        taker_amount: u128,
    ) -> Result<FillOutcome> {
        let swap = self.swaps.get(tx, swap_id)?;
        swap.check_status(SwapStatus::Pending)?;
        let maker_order = self.orders.get(tx, swap.maker_order_id)?;
        let taker_order = self.orders.get(tx, swap.taker_order_id)?;
        maker_order.check_status(OrderStatus::Filled)?;
        taker_order.check_status(OrderStatus::Empty)?;
        taker_order.check_provider(&ctx.caller)?;
        taker_order.check_content(taker_asset, taker_amount)?;

        if taker_amount < taker_order.amount {
            return self.partial_fill_in(tx, ctx, &swap, maker_order, taker_order, taker_amount);
        }
        self.settle(tx, ctx, swap, maker_order, taker_order)?;
        Ok(FillOutcome::Settled { swap: swap_id })
    }

    /// Exchange both orders in full. The caller is the taker.
    fn settle(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        mut swap: Swap,
        mut maker_order: Order,
        mut taker_order: Order,
    ) -> Result<()> {
        let taker = ctx.caller.clone();
        let maker = Self::provider_of(&maker_order)?;

        taker_order.fill(taker.clone())?;
        tx.emit(SwapEvent::OrderFilled {
            order: taker_order.id,
        });

        Self::pay_out(tx, &maker_order, &taker);
        Self::pay_out(tx, &taker_order, &maker);

        maker_order.mark_success()?;
        taker_order.mark_success()?;
        swap.mark_success(ctx.transaction, ctx.timestamp)?;
        self.orders.put(tx, &maker_order)?;
        self.orders.put(tx, &taker_order)?;
        self.swaps.put(tx, &swap)?;

        let pair = TradingPair::new(maker_order.asset.clone(), taker_order.asset.clone());
        self.move_to_filled(tx, &swap, &pair, &taker)?;

        tx.emit(SwapEvent::SwapSuccess { swap: swap.id });
        info!(
            swap = %swap.id,
            maker = %maker,
            taker = %taker,
            maker_amount = maker_order.amount,
            taker_amount = taker_order.amount,
            "Swap settled"
        );
        Ok(())
    }

    /// Carve a fully funded slice out of `parent` and settle it.
    fn partial_fill_in(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        parent: &Swap,
        mut maker_order: Order,
        mut taker_order: Order,
        paid: u128,
    ) -> Result<FillOutcome> {
        let maker_precision = self.precision(&maker_order.asset)?;
        let taker_precision = self.precision(&taker_order.asset)?;
        let share = slice_share(maker_precision, maker_order.amount, taker_order.amount, paid)?;
        if share == 0 {
            return Err(SwapbookError::FillTooSmall {
                swap: parent.id,
                amount: paid,
            });
        }

        maker_order.partial_fill(share)?;
        taker_order.partial_fill(paid)?;
        self.orders.put(tx, &maker_order)?;
        self.orders.put(tx, &taker_order)?;

        let slice = self.open_swap(
            tx,
            ctx,
            NewSwap {
                maker_asset: &maker_order.asset,
                maker_amount: share,
                taker_asset: &taker_order.asset,
                taker_amount: paid,
                maker: &parent.maker_address,
                taker: taker_order.provider.clone(),
                private: parent.private,
                listed: false,
            },
        )?;
        let slice_id = slice.id;
        let slice_maker = self.orders.get(tx, slice.maker_order_id)?;
        let slice_taker = self.orders.get(tx, slice.taker_order_id)?;
        self.settle(tx, ctx, slice, slice_maker, slice_taker)?;

        let book = self
            .markets
            .book(TradingPair::new(maker_order.asset.clone(), taker_order.asset.clone()));
        if book.contains(tx, parent.id)? {
            book.reprice(tx, parent.id)?;
        }

        let cleaned_up = maker_precision.is_dust(maker_order.amount)
            || taker_precision.is_dust(taker_order.amount);
        if cleaned_up {
            self.cancel_in(tx, ctx, parent.id, Cancellation::Cleanup)?;
        }

        info!(
            parent = %parent.id,
            slice = %slice_id,
            maker_share = share,
            taker_amount = paid,
            maker_left = maker_order.amount,
            taker_left = taker_order.amount,
            "Swap partially filled"
        );
        Ok(FillOutcome::Partial {
            parent: parent.id,
            slice: slice_id,
            maker_share: share,
            taker_amount: paid,
            cleaned_up,
        })
    }

    // =================================================================
    // Cancel
    // =================================================================

    pub(crate) fn cancel_in(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        swap_id: SwapId,
        reason: Cancellation,
    ) -> Result<()> {
        let mut swap = self.swaps.get(tx, swap_id)?;
        swap.check_status(SwapStatus::Pending)?;
        let mut maker_order = self.orders.get(tx, swap.maker_order_id)?;
        let mut taker_order = self.orders.get(tx, swap.taker_order_id)?;
        if reason == Cancellation::ByMaker && maker_order.provider.as_ref() != Some(&ctx.caller) {
            return Err(SwapbookError::Unauthorized {
                swap: swap_id,
                caller: ctx.caller.clone(),
            });
        }

        for order in [&mut maker_order, &mut taker_order] {
            if order.status == OrderStatus::Filled {
                let provider = Self::provider_of(order)?;
                tx.transfer(Transfer {
                    asset: order.asset.clone(),
                    amount: order.amount,
                    destination: provider,
                });
                tx.emit(SwapEvent::OrderRefunded { order: order.id });
                order.empty();
            }
            order.mark_cancelled()?;
            self.orders.put(tx, order)?;
        }
        swap.mark_cancelled(ctx.transaction)?;
        self.swaps.put(tx, &swap)?;

        let pair = TradingPair::new(maker_order.asset.clone(), taker_order.asset.clone());
        self.remove_pending(tx, &swap, &pair)?;

        match reason {
            Cancellation::ByMaker => {
                tx.emit(SwapEvent::SwapCancelled { swap: swap_id });
                info!(swap = %swap_id, maker = %ctx.caller, "Swap cancelled");
            }
            Cancellation::Cleanup => {
                tx.emit(SwapEvent::SwapCleanup { swap: swap_id });
                warn!(swap = %swap_id, "Dust remainder cleaned up");
            }
        }
        Ok(())
    }

    // =================================================================
    // Index maintenance
    // =================================================================

    /// Drop a swap from every pending listing it is in.
    fn remove_pending(&self, tx: &mut Journal<'_, S>, swap: &Swap, pair: &TradingPair) -> Result<()> {
        AccountIndex::new(swap.maker_address.clone()).remove_pending(tx, pair, swap.id)?;
        let book = self.markets.book(pair.clone());
        if book.contains(tx, swap.id)? {
            book.remove(tx, swap.id)?;
        }
        Ok(())
    }

    /// Pending listings out, filled listings in (most recent first).
    fn move_to_filled(
        &self,
        tx: &mut Journal<'_, S>,
        swap: &Swap,
        pair: &TradingPair,
        taker: &Address,
    ) -> Result<()> {
        self.remove_pending(tx, swap, pair)?;
        AccountIndex::new(swap.maker_address.clone()).add_filled(tx, pair, swap.id)?;
        AccountIndex::new(taker.clone()).add_filled(tx, pair, swap.id)?;
        if swap.is_public() {
            self.markets.book(pair.clone()).record_filled(tx, swap.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticRegistry;
    use crate::vault::Vault;
    use chrono::{TimeZone, Utc};
    use swapbook_ledger::MemoryStore;
    use swapbook_types::{AssetConfig, OrderId, TransactionId};

    type Engine = SwapEngine<MemoryStore, StaticRegistry, Vault>;

    const A: &str = "cx1000000000000000000000000000000000000001";
    const B: &str = "cx2000000000000000000000000000000000000002";

    fn engine() -> Engine {
        let config = EngineConfig {
            assets: vec![
                AssetConfig::new(AssetId::new(A), 0),
                AssetConfig::new(AssetId::new(B), 0),
                AssetConfig::native(),
            ],
            ..EngineConfig::default()
        };
        let mut vault = Vault::new(config.custody.clone());
        vault.deposit(&config.custody, &AssetId::new(A), 1_000_000).unwrap();
        vault.deposit(&config.custody, &AssetId::new(B), 1_000_000).unwrap();
        vault.deposit(&config.custody, &AssetId::native(), u128::from(u64::MAX)).unwrap();
        SwapEngine::new(
            MemoryStore::new(),
            StaticRegistry::from_config(&config),
            vault,
            config,
        )
        .unwrap()
    }

    fn ctx(caller: &str, n: u8) -> CallContext {
        CallContext::new(
            Address::new(caller),
            Utc.timestamp_opt(1_700_000_000 + i64::from(n), 0).unwrap(),
            TransactionId::derive(&[n]),
        )
    }

    fn create(engine: &mut Engine, who: &str, m: u128, t: u128) -> SwapId {
        engine
            .create_swap(
                &ctx(who, 1),
                SwapRequest::new(AssetId::new(A), m, AssetId::new(B), t),
            )
            .unwrap()
            .value
            .swap()
            .unwrap()
    }

    #[test]
    fn slice_share_floors_then_truncates() {
        let unit = Precision::new(18, 7).unwrap();
        // floor(60 * 1e12 / 200) = 3e11 -> already aligned.
        assert_eq!(slice_share(unit, 1_000_000_000_000, 200, 60).unwrap(), 300_000_000_000);
        // floor(1 * 1e12 / 3) = 333_333_333_333 -> 300_000_000_000.
        assert_eq!(slice_share(unit, 1_000_000_000_000, 3, 1).unwrap(), 300_000_000_000);
        // Below one unit.
        assert_eq!(slice_share(unit, 1_000_000_000_000, 100, 1).unwrap(), 0);
    }

    #[test]
    fn create_rejects_bad_requests_without_side_effects() {
        let mut engine = engine();
        let c = ctx("hxalice", 1);
        let same = SwapRequest::new(AssetId::new(A), 1, AssetId::new(A), 1);
        assert!(matches!(
            engine.create_swap(&c, same),
            Err(SwapbookError::SameAsset(_))
        ));
        let zero = SwapRequest::new(AssetId::new(A), 0, AssetId::new(B), 1);
        assert!(matches!(engine.create_swap(&c, zero), Err(SwapbookError::ZeroAmount)));
        let unknown = SwapRequest::new(AssetId::new("cxnope"), 1, AssetId::new(B), 1);
        assert!(matches!(
            engine.create_swap(&c, unknown),
            Err(SwapbookError::AssetNotAllowed(_))
        ));
        assert!(engine.store().is_empty());
    }

    #[test]
    fn create_lists_public_swap() {
        let mut engine = engine();
        let receipt = engine
            .create_swap(
                &ctx("hxalice", 1),
                SwapRequest::new(AssetId::new(A), 100, AssetId::new(B), 200),
            )
            .unwrap();
        let CreateOutcome::Created { swap, maker_order, taker_order } = receipt.value else {
            panic!("expected a swap");
        };
        assert_eq!((swap, maker_order, taker_order), (SwapId(1), OrderId(1), OrderId(2)));
        assert_eq!(
            receipt.events,
            vec![
                SwapEvent::SwapCreated {
                    swap,
                    maker_order,
                    taker_order
                },
                SwapEvent::OrderFilled { order: maker_order },
            ]
        );
        let book = engine.markets.book(TradingPair::new(AssetId::new(A), AssetId::new(B)));
        assert!(book.contains(engine.store(), swap).unwrap());
    }

    #[test]
    fn reserved_swap_is_private_and_unlisted() {
        let mut engine = engine();
        let request = SwapRequest::new(AssetId::new(A), 100, AssetId::new(B), 200)
            .reserved_for(Address::new("hxbob"));
        let swap = engine
            .create_swap(&ctx("hxalice", 1), request)
            .unwrap()
            .value
            .swap()
            .unwrap();
        let record = engine.swaps.get(engine.store(), swap).unwrap();
        assert!(record.private);
        let book = engine.markets.book(TradingPair::new(AssetId::new(A), AssetId::new(B)));
        assert!(!book.contains(engine.store(), swap).unwrap());

        // Anyone else is turned away.
        let err = engine
            .fill_swap(&ctx("hxcarol", 2), swap, AssetId::new(B), 200)
            .unwrap_err();
        assert!(matches!(err, SwapbookError::ProviderMismatch { .. }));
        engine
            .fill_swap(&ctx("hxbob", 3), swap, AssetId::new(B), 200)
            .unwrap();
    }

    #[test]
    fn only_maker_cancels() {
        let mut engine = engine();
        let swap = create(&mut engine, "hxalice", 100, 200);
        assert!(matches!(
            engine.cancel_swap(&ctx("hxmallory", 2), swap),
            Err(SwapbookError::Unauthorized { .. })
        ));
        let receipt = engine.cancel_swap(&ctx("hxalice", 3), swap).unwrap();
        assert!(receipt.events.contains(&SwapEvent::SwapCancelled { swap }));
        // Second cancel hits the status guard.
        assert!(matches!(
            engine.cancel_swap(&ctx("hxalice", 4), swap),
            Err(SwapbookError::InvalidSwapStatus { .. })
        ));
    }

    #[test]
    fn fill_too_small_is_rejected() {
        let mut engine = engine();
        // 18-decimal native asset as maker side: unit is 1e11.
        let swap = engine
            .create_swap(
                &ctx("hxalice", 1),
                SwapRequest::new(AssetId::native(), 1_000_000_000_000, AssetId::new(B), 100),
            )
            .unwrap()
            .value
            .swap()
            .unwrap();
        let err = engine
            .fill_swap(&ctx("hxbob", 2), swap, AssetId::new(B), 1)
            .unwrap_err();
        assert!(matches!(err, SwapbookError::FillTooSmall { amount: 1, .. }));
    }
}
