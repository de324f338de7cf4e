//! Error types for the SwapBook exchange.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Swap errors
//! - 3xx: Asset errors
//! - 4xx: Index / collection errors
//! - 5xx: Market book errors
//! - 6xx: Transfer errors
//! - 7xx: Arithmetic guards
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Address, AssetId, OrderId, OrderStatus, SwapId, SwapStatus};

/// Broad classification of a failure, used by callers to decide how to
/// surface it. No kind is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller violated a precondition.
    Validation,
    /// Moving value between accounts failed.
    Transfer,
    /// An amount computation was rejected.
    Arithmetic,
    /// Storage or index corruption, bad configuration.
    Internal,
}

/// Central error enum for all SwapBook operations.
#[derive(Debug, Error)]
pub enum SwapbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The requested order does not exist.
    #[error("SB_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order is not in the status the operation requires.
    #[error("SB_ERR_101: Invalid status for {order}: expected {expected}, got {actual}")]
    InvalidOrderStatus {
        order: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// The provided asset or amount does not match the order.
    #[error(
        "SB_ERR_102: Content mismatch for {order}: order holds {expected_amount} {expected_asset}, got {amount} {asset}"
    )]
    ContentMismatch {
        order: OrderId,
        expected_asset: AssetId,
        expected_amount: u128,
        asset: AssetId,
        amount: u128,
    },

    /// The order is reserved for another provider.
    #[error("SB_ERR_103: Provider mismatch for {order}: reserved for {expected}, got {actual}")]
    ProviderMismatch {
        order: OrderId,
        expected: Address,
        actual: Address,
    },

    /// Amounts must be strictly positive.
    #[error("SB_ERR_104: Invalid amount: must be greater than zero")]
    ZeroAmount,

    // =================================================================
    // Swap Errors (2xx)
    // =================================================================
    /// The requested swap does not exist.
    #[error("SB_ERR_200: Swap not found: {0}")]
    SwapNotFound(SwapId),

    /// The swap is not in the status the operation requires.
    #[error("SB_ERR_201: Invalid status for {swap}: expected {expected}, got {actual}")]
    InvalidSwapStatus {
        swap: SwapId,
        expected: SwapStatus,
        actual: SwapStatus,
    },

    /// Only the maker may cancel a swap.
    #[error("SB_ERR_202: {caller} is not allowed to cancel {swap}")]
    Unauthorized { swap: SwapId, caller: Address },

    // =================================================================
    // Asset Errors (3xx)
    // =================================================================
    /// The asset is not on the allow-list.
    #[error("SB_ERR_300: Asset not allowed: {0}")]
    AssetNotAllowed(AssetId),

    /// Both sides of a swap must trade different assets.
    #[error("SB_ERR_301: Cannot swap {0} against itself")]
    SameAsset(AssetId),

    // =================================================================
    // Index / Collection Errors (4xx)
    // =================================================================
    /// The item is not a member of the collection.
    #[error("SB_ERR_400: Item {item} not found in {collection}")]
    ItemNotFound { collection: String, item: String },

    /// The item is already a member of the collection.
    #[error("SB_ERR_401: Item {item} already exists in {collection}")]
    ItemAlreadyExists { collection: String, item: String },

    // =================================================================
    // Market Errors (5xx)
    // =================================================================
    /// A swap cannot be listed in the market book.
    #[error("SB_ERR_500: Swap {0} cannot be listed in the market")]
    NotListable(SwapId),

    /// The book structure disagrees with the tables.
    #[error("SB_ERR_501: Market book corrupted: {reason}")]
    BookCorrupted { reason: String },

    // =================================================================
    // Transfer Errors (6xx)
    // =================================================================
    /// The destination rejected the funds or the host refused the move.
    #[error("SB_ERR_600: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// The source account does not hold enough of the asset.
    #[error("SB_ERR_601: Insufficient funds for {account}: need {needed} {asset}, have {available}")]
    InsufficientFunds {
        account: Address,
        asset: AssetId,
        needed: u128,
        available: u128,
    },

    /// Balances no longer add up. Never expected outside a bug.
    #[error("SB_ERR_602: Supply invariant violated: {reason}")]
    SupplyViolation { reason: String },

    // =================================================================
    // Arithmetic Guards (7xx)
    // =================================================================
    /// An amount computation overflowed.
    #[error("SB_ERR_700: Arithmetic overflow")]
    ArithmeticOverflow,

    /// A partial fill is too small to move a single tradable unit.
    #[error("SB_ERR_701: Fill of {amount} on {swap} is too small to trade")]
    FillTooSmall { swap: SwapId, amount: u128 },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SB_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl SwapbookError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TransferFailed { .. } | Self::InsufficientFunds { .. } => ErrorKind::Transfer,
            Self::ArithmeticOverflow | Self::FillTooSmall { .. } => ErrorKind::Arithmetic,
            Self::BookCorrupted { .. }
            | Self::SupplyViolation { .. }
            | Self::Internal(_)
            | Self::Serialization(_)
            | Self::Configuration(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }

    #[must_use]
    pub fn not_found(collection: &str, item: impl std::fmt::Display) -> Self {
        Self::ItemNotFound {
            collection: collection.to_string(),
            item: item.to_string(),
        }
    }

    #[must_use]
    pub fn already_exists(collection: &str, item: impl std::fmt::Display) -> Self {
        Self::ItemAlreadyExists {
            collection: collection.to_string(),
            item: item.to_string(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SwapbookError>;

impl From<serde_json::Error> for SwapbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
