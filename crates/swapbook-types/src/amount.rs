//! Decimal truncation of traded amounts.
//!
//! Every asset trades with at most `SWAP_MAX_DECIMALS` fractional digits.
//! For an asset with `d` native decimals the smallest tradable unit is
//! `10^(d - SWAP_MAX_DECIMALS)` base units (or 1 when `d` is already within
//! the limit). Anything below one unit is dust.

use serde::{Deserialize, Serialize};

use crate::{Result, SwapbookError};

/// An amount split into its tradable part and the truncated remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncated {
    pub kept: u128,
    pub exceed: u128,
}

/// Tradable precision of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    unit: u128,
}

impl Precision {
    pub fn new(decimals: u32, max_decimals: u32) -> Result<Self> {
        let exponent = decimals.saturating_sub(max_decimals);
        let unit = 10u128.checked_pow(exponent).ok_or_else(|| {
            SwapbookError::Configuration(format!("{decimals} decimals exceed the u128 range"))
        })?;
        Ok(Self { unit })
    }

    /// Smallest tradable amount in base units.
    #[must_use]
    pub fn unit(self) -> u128 {
        self.unit
    }

    #[must_use]
    pub fn truncate(self, amount: u128) -> Truncated {
        let exceed = amount % self.unit;
        Truncated {
            kept: amount - exceed,
            exceed,
        }
    }

    /// Below one tradable unit, zero included.
    #[must_use]
    pub fn is_dust(self, amount: u128) -> bool {
        amount < self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SWAP_MAX_DECIMALS;

    #[test]
    fn eighteen_decimals_trade_in_units_of_1e11() {
        let p = Precision::new(18, SWAP_MAX_DECIMALS).unwrap();
        assert_eq!(p.unit(), 100_000_000_000);
        let t = p.truncate(1_234_567_890_123_456_789);
        assert_eq!(t.kept, 1_234_567_800_000_000_000);
        assert_eq!(t.exceed, 90_123_456_789);
        assert_eq!(t.kept + t.exceed, 1_234_567_890_123_456_789);
    }

    #[test]
    fn low_decimal_assets_are_untouched() {
        let p = Precision::new(6, SWAP_MAX_DECIMALS).unwrap();
        assert_eq!(p.unit(), 1);
        let t = p.truncate(123);
        assert_eq!(t.kept, 123);
        assert_eq!(t.exceed, 0);
        assert!(!p.is_dust(1));
        assert!(p.is_dust(0));
    }

    #[test]
    fn dust_is_below_one_unit() {
        let p = Precision::new(18, SWAP_MAX_DECIMALS).unwrap();
        assert!(p.is_dust(99_999_999_999));
        assert!(!p.is_dust(100_000_000_000));
        assert_eq!(p.truncate(99_999_999_999).kept, 0);
    }

    #[test]
    fn absurd_decimals_rejected() {
        assert!(Precision::new(60, SWAP_MAX_DECIMALS).is_err());
    }
}
