//! Integration test: seeded random traffic
//!
//! A deterministic stream of creates, fills, cancels and limit orders from a
//! handful of accounts. After every call the supply invariants must hold;
//! replaying the same stream must rebuild a bit-identical book.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swapbook_engine::{Host, LimitOrder, StaticRegistry, SwapRequest};
use swapbook_ledger::MemoryStore;
use swapbook_market::{BookOrdering, BookSide, BuyerOrdering, MarketBook, Quote, SellerOrdering};
use swapbook_types::{Address, AssetConfig, AssetId, EngineConfig, SwapId, SwapStatus, TradingPair};

const A: &str = "cx1111111111111111111111111111111111111111";
const B: &str = "cx2222222222222222222222222222222222222222";
const ACCOUNTS: [&str; 4] = ["hxalice", "hxbob", "hxcarol", "hxdave"];

type TestHost = Host<MemoryStore, StaticRegistry>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pair() -> TradingPair {
    TradingPair::new(AssetId::new(A), AssetId::new(B))
}

fn setup(page_size: usize) -> TestHost {
    init_tracing();
    let config = EngineConfig {
        page_size,
        assets: vec![
            AssetConfig::new(AssetId::new(A), 0),
            // Wider than the tradable precision, so truncation kicks in.
            AssetConfig::new(AssetId::new(B), 9),
        ],
        ..EngineConfig::default()
    };
    let mut host = Host::new(MemoryStore::new(), StaticRegistry::from_config(&config), config).unwrap();
    for name in ACCOUNTS {
        let account = Address::new(name);
        host.deposit(&account, &AssetId::new(A), 1_000_000).unwrap();
        host.deposit(&account, &AssetId::new(B), 1_000_000_000_000_000).unwrap();
    }
    host
}

/// Random (maker asset, maker amount, taker asset, taker amount).
fn random_terms(rng: &mut StdRng) -> (AssetId, u128, AssetId, u128) {
    let a_amount = rng.gen_range(1..=500u128);
    let b_amount = rng.gen_range(1..=1_000u128) * 1_000_000 + rng.gen_range(0..1_000u128);
    if rng.gen_bool(0.5) {
        (AssetId::new(A), a_amount, AssetId::new(B), b_amount)
    } else {
        (AssetId::new(B), b_amount, AssetId::new(A), a_amount)
    }
}

/// Play `steps` random calls. Failed calls are expected (wrong caller,
/// too-small fills); they must simply leave no trace.
fn play(host: &mut TestHost, seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..steps {
        let caller = Address::new(ACCOUNTS[rng.gen_range(0..ACCOUNTS.len())]);
        let created = host.engine().swap_count().unwrap();
        match rng.gen_range(0..5) {
            0 => {
                let (ma, m, ta, t) = random_terms(&mut rng);
                let _ = host.create_swap(&caller, SwapRequest::new(ma, m, ta, t));
            }
            1 | 2 if created > 0 => {
                let swap = SwapId(rng.gen_range(1..=created));
                let details = host.engine().swap_details(swap).unwrap();
                if details.swap.status == SwapStatus::Pending {
                    let full = details.taker_order.amount;
                    let amount = if rng.gen_bool(0.5) { full } else { rng.gen_range(1..=full) };
                    let _ = host.fill_swap(&caller, swap, details.taker_order.asset, amount);
                }
            }
            3 => {
                let (ma, m, ta, t) = random_terms(&mut rng);
                let _ = host.create_limit_order(&caller, LimitOrder::new(ma, m, ta, t));
            }
            4 if created > 0 => {
                let _ = host.cancel_swap(&caller, SwapId(rng.gen_range(1..=created)));
            }
            _ => {}
        }
        host.check_supply().unwrap();
    }
}

fn assert_side_sorted<O: BookOrdering>(host: &TestHost, side: BookSide) {
    let book = MarketBook::new(pair());
    let store = host.engine().store();
    let ids = book.walk(store, side, None, usize::MAX).unwrap();
    for window in ids.windows(2) {
        let first = O::price_of(&Quote::load(store, window[0]).unwrap()).unwrap();
        let second = O::price_of(&Quote::load(store, window[1]).unwrap()).unwrap();
        assert!(!O::precedes(&second, &first), "{} ranked before {}", window[0], window[1]);
    }
    for id in ids {
        assert_eq!(host.engine().swap(id).unwrap().status, SwapStatus::Pending);
    }
}

// =========================================================================
// Test: supply is conserved under random traffic
// =========================================================================

#[test]
fn random_traffic_conserves_supply() {
    let mut host = setup(100);
    play(&mut host, 2024, 400);
    assert!(host.engine().swap_count().unwrap() > 0);
    assert_side_sorted::<BuyerOrdering>(&host, BookSide::Buyers);
    assert_side_sorted::<SellerOrdering>(&host, BookSide::Sellers);
}

// =========================================================================
// Test: replaying the same traffic rebuilds the same book
// =========================================================================

#[test]
fn replay_is_deterministic() {
    let mut first = setup(100);
    let mut second = setup(100);
    play(&mut first, 77, 250);
    play(&mut second, 77, 250);

    assert_eq!(
        first.engine().market_digest(&pair()).unwrap(),
        second.engine().market_digest(&pair()).unwrap()
    );
    assert_eq!(first.engine().store(), second.engine().store());

    let mut third = setup(100);
    play(&mut third, 78, 250);
    assert_ne!(first.engine().store(), third.engine().store());
}

// =========================================================================
// Test: no read returns more than a page
// =========================================================================

#[test]
fn reads_are_bounded_by_page_size() {
    let mut host = setup(7);
    let alice = Address::new("hxalice");
    for i in 1..=20u128 {
        host.create_swap(
            &alice,
            SwapRequest::new(AssetId::new(A), i, AssetId::new(B), 1_000_000_000),
        )
        .unwrap();
    }
    let engine = host.engine();
    assert_eq!(engine.account_pending(&alice, 0, usize::MAX).unwrap().len(), 7);
    assert_eq!(engine.account_pair_pending(&alice, &pair(), 0, 100).unwrap().len(), 7);
    assert_eq!(engine.market_sellers(&pair(), 0, 100).unwrap().len(), 7);
    assert_eq!(engine.swap_ids(0, 100).unwrap().len(), 7);

    // Walking page by page covers everything exactly once.
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page = engine.market_sellers(&pair(), offset, 7).unwrap();
        if page.is_empty() {
            break;
        }
        offset += page.len();
        seen.extend(page);
    }
    assert_eq!(seen.len(), 20);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 20);
}
