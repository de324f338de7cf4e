//! Identifiers used throughout SwapBook.
//!
//! Orders and swaps are numbered by monotonically increasing factories
//! starting at 1; the value 0 is reserved as "no id". Accounts and assets
//! are opaque string addresses compared lexicographically.
//!
//! Store keys never embed an address as written. `key_segment` hex-encodes
//! it, so a segment cannot contain the `:` and `/` separators.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Unique order identifier. Allocated by the order factory, never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Returns `true` for any id a factory could have produced.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SwapId
// ---------------------------------------------------------------------------

/// Unique swap identifier. Allocated by the swap factory, never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SwapId(pub u64);

impl SwapId {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An account address (wallet or contract).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Separator-free form for store keys.
    #[must_use]
    pub fn key_segment(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Identifier of a tradable asset: a token contract address, or the
/// native-currency sentinel returned by [`AssetId::native`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    #[must_use]
    pub fn new(asset: impl Into<String>) -> Self {
        Self(asset.into())
    }

    /// The native currency sentinel.
    #[must_use]
    pub fn native() -> Self {
        Self(crate::constants::NATIVE_ASSET.to_string())
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        self.0 == crate::constants::NATIVE_ASSET
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Separator-free form for store keys.
    #[must_use]
    pub fn key_segment(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// TradingPair
// ---------------------------------------------------------------------------

/// An unordered pair of assets with a fixed canonical orientation.
///
/// `first` is always the lexicographically smaller asset, so `A/B` and `B/A`
/// name the same market. A maker offering `second` is a **buyer** on the
/// pair; a maker offering `first` is a **seller**.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TradingPair {
    pub first: AssetId,
    pub second: AssetId,
}

impl TradingPair {
    #[must_use]
    pub fn new(a: AssetId, b: AssetId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Canonical market name, e.g. `cx12/cx34`. For display only: two
    /// different pairs can share a name when an asset id contains `/`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}/{}", self.first, self.second)
    }

    /// Unambiguous form for store keys: both asset segments joined by `-`.
    #[must_use]
    pub fn key_segment(&self) -> String {
        format!("{}-{}", self.first.key_segment(), self.second.key_segment())
    }

    /// Whether a maker offering `maker_asset` sits on the buyer side.
    #[must_use]
    pub fn is_buyer(&self, maker_asset: &AssetId) -> bool {
        *maker_asset == self.second
    }

    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        *asset == self.first || *asset == self.second
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

/// Hash of the host transaction that carried a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TransactionId(pub [u8; 32]);

impl TransactionId {
    /// Deterministic id derived from an arbitrary seed (hosts and tests).
    #[must_use]
    pub fn derive(seed: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"swapbook:tx:v1:");
        hasher.update(seed);
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ids_are_invalid() {
        assert!(!OrderId(0).is_valid());
        assert!(!SwapId(0).is_valid());
        assert!(OrderId(1).is_valid());
        assert!(SwapId(7).is_valid());
    }

    #[test]
    fn pair_is_canonical() {
        let a = AssetId::new("cxaaa");
        let b = AssetId::new("cxbbb");
        let ab = TradingPair::new(a.clone(), b.clone());
        let ba = TradingPair::new(b.clone(), a.clone());
        assert_eq!(ab, ba);
        assert_eq!(ab.name(), "cxaaa/cxbbb");
        assert_eq!(ab.first, a);
        assert_eq!(ab.second, b);
    }

    #[test]
    fn buyer_offers_the_larger_asset() {
        let pair = TradingPair::new(AssetId::new("cxbbb"), AssetId::new("cxaaa"));
        assert!(pair.is_buyer(&AssetId::new("cxbbb")));
        assert!(!pair.is_buyer(&AssetId::new("cxaaa")));
    }

    #[test]
    fn key_segments_keep_separators_out() {
        let tricky = Address::new("hxbob:cxa/cxb");
        assert!(!tricky.key_segment().contains([':', '/']));
        assert_ne!(tricky.key_segment(), Address::new("hxbob").key_segment());

        // Same display name, different markets.
        let left = TradingPair::new(AssetId::new("a/b"), AssetId::new("c"));
        let right = TradingPair::new(AssetId::new("a"), AssetId::new("b/c"));
        assert_eq!(left.name(), right.name());
        assert_ne!(left.key_segment(), right.key_segment());
    }

    #[test]
    fn native_sentinel() {
        assert!(AssetId::native().is_native());
        assert!(!AssetId::new("cx1").is_native());
    }

    #[test]
    fn transaction_id_is_deterministic() {
        let a = TransactionId::derive(b"call-1");
        let b = TransactionId::derive(b"call-1");
        let c = TransactionId::derive(b"call-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(format!("{a}").starts_with("0x"));
        assert_eq!(a.to_hex().len(), 64);
    }
}
