//! Limit orders against the market book.
//!
//! The incoming maker walks the opposite side best-first, filling resting
//! swaps as their taker until its funds run out, the next price is worse
//! than its limit, or the book is empty. Whatever is left rests as a new
//! public swap at the original limit ratio.

use swapbook_ledger::{Journal, KvStore};
use swapbook_market::{BookOrdering, BookSide, BuyerOrdering, MarketBook, Quote, SellerOrdering};
use swapbook_types::{AssetId, CallContext, Price, Result, TradingPair, mul_div_floor};
use tracing::{debug, info, warn};

use crate::engine::{NewSwap, SwapEngine, slice_share};
use crate::receipt::{CallReceipt, LimitOrderOutcome};
use crate::registry::AssetRegistry;
use crate::vault::FundsTransfer;

/// A limit order: give at most `maker_amount` of `maker_asset` at a ratio
/// no worse than `maker_amount : taker_amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
    pub maker_asset: AssetId,
    pub maker_amount: u128,
    pub taker_asset: AssetId,
    pub taker_amount: u128,
}

impl LimitOrder {
    #[must_use]
    pub fn new(maker_asset: AssetId, maker_amount: u128, taker_asset: AssetId, taker_amount: u128) -> Self {
        Self {
            maker_asset,
            maker_amount,
            taker_asset,
            taker_amount,
        }
    }
}

impl<S: KvStore, R: AssetRegistry, F: FundsTransfer> SwapEngine<S, R, F> {
    /// Match a limit order against the book and rest the remainder.
    pub fn create_limit_order(
        &mut self,
        ctx: &CallContext,
        order: LimitOrder,
    ) -> Result<CallReceipt<LimitOrderOutcome>> {
        self.run("create_limit_order", ctx, |engine, tx| {
            engine.limit_order_in(tx, ctx, &order)
        })
    }

    fn limit_order_in(
        &self,
        tx: &mut Journal<'_, S>,
        ctx: &CallContext,
        order: &LimitOrder,
    ) -> Result<LimitOrderOutcome> {
        let LimitOrder {
            maker_asset,
            maker_amount,
            taker_asset,
            taker_amount,
        } = order;
        self.validate_request(maker_asset, *maker_amount, taker_asset, *taker_amount)?;
        let maker_precision = self.precision(maker_asset)?;
        let taker_precision = self.precision(taker_asset)?;
        let maker = maker_precision.truncate(*maker_amount);
        let taker = taker_precision.truncate(*taker_amount);

        let mut outcome = LimitOrderOutcome::default();
        if maker_precision.is_dust(maker.kept) || taker_precision.is_dust(taker.kept) {
            Self::refund(tx, maker_asset, *maker_amount, &ctx.caller);
            outcome.refunded = *maker_amount;
            warn!(maker = %ctx.caller, maker_amount, taker_amount, "Dust limit order refunded");
            return Ok(outcome);
        }
        Self::refund(tx, maker_asset, maker.exceed, &ctx.caller);
        outcome.refunded = maker.exceed;

        let pair = TradingPair::new(maker_asset.clone(), taker_asset.clone());
        let book = self.markets.book(pair.clone());
        // Limit in second-per-first units, checked against the opposite side.
        let (against, limit) = if pair.is_buyer(maker_asset) {
            (BookSide::Sellers, Price::new(maker.kept, taker.kept)?)
        } else {
            (BookSide::Buyers, Price::new(taker.kept, maker.kept)?)
        };

        let mut remaining = maker.kept;
        while remaining > 0 {
            let Some(resting) = book.best(tx, against)? else {
                break;
            };
            let quote = Quote::load(tx, resting)?;
            let price = MarketBook::price_on(against, &quote)?;
            let acceptable = match against {
                BookSide::Buyers => BuyerOrdering::crosses(&limit, &price),
                BookSide::Sellers => SellerOrdering::crosses(&limit, &price),
            };
            if !acceptable {
                debug!(swap = %resting, %price, %limit, "Limit reached");
                break;
            }

            let paid = quote.taker_amount.min(remaining);
            if paid < quote.taker_amount {
                let resting_precision = self.precision(&quote.maker_asset)?;
                if slice_share(resting_precision, quote.maker_amount, quote.taker_amount, paid)? == 0 {
                    debug!(swap = %resting, paid, "Remaining slice too small to trade");
                    break;
                }
            }

            let fill = self.fill_in(tx, ctx, resting, maker_asset, paid)?;
            outcome.fills.push(fill);
            outcome.spent += paid;
            remaining -= paid;
        }

        if remaining > 0 {
            let counter = mul_div_floor(remaining, taker.kept, maker.kept)?;
            let rest_maker = maker_precision.truncate(remaining);
            let rest_taker = taker_precision.truncate(counter);
            if maker_precision.is_dust(rest_maker.kept) || taker_precision.is_dust(rest_taker.kept) {
                Self::refund(tx, maker_asset, remaining, &ctx.caller);
                outcome.refunded += remaining;
            } else {
                Self::refund(tx, maker_asset, rest_maker.exceed, &ctx.caller);
                outcome.refunded += rest_maker.exceed;
                let swap = self.open_swap(
                    tx,
                    ctx,
                    NewSwap {
                        maker_asset,
                        maker_amount: rest_maker.kept,
                        taker_asset,
                        taker_amount: rest_taker.kept,
                        maker: &ctx.caller,
                        taker: None,
                        private: false,
                        listed: true,
                    },
                )?;
                outcome.resting = Some(swap.id);
            }
        }

        info!(
            maker = %ctx.caller,
            pair = %pair,
            fills = outcome.fills.len(),
            spent = outcome.spent,
            refunded = outcome.refunded,
            resting = ?outcome.resting,
            "Limit order processed"
        );
        Ok(outcome)
    }
}
