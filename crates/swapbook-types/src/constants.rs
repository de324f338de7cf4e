//! System-wide constants for the SwapBook exchange.

/// Maximum fractional digits kept for any traded amount. Amounts of assets
/// with more native decimals are truncated to this precision.
pub const SWAP_MAX_DECIMALS: u32 = 7;

/// Decimals of the native currency.
pub const NATIVE_DECIMALS: u32 = 18;

/// Native currency sentinel asset id.
pub const NATIVE_ASSET: &str = "cx0000000000000000000000000000000000000000";

/// Upper bound on items returned by any paginated read.
pub const MAX_ITERATION_LOOP: usize = 100;

/// Default address holding funds in custody for open orders.
pub const DEFAULT_CUSTODY_ADDRESS: &str = "cx5b5e6a9a1f5c7e0b3c0d4e8f2a1b9c8d7e6f5a4b";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SwapBook";
