//! Exact rational prices.
//!
//! A swap's price is the ratio of two integer amounts. Prices are never
//! converted to floating point for ordering: two prices are compared by
//! cross-multiplying in 256-bit arithmetic, so every node orders the book
//! identically.

use std::cmp::Ordering;
use std::str::FromStr;

use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, SwapbookError};

/// `num / den`, with `den > 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    pub num: u128,
    pub den: u128,
}

impl Price {
    /// Build a price. A zero denominator is rejected.
    pub fn new(num: u128, den: u128) -> Result<Self> {
        if den == 0 {
            return Err(SwapbookError::ZeroAmount);
        }
        Ok(Self { num, den })
    }

    /// The reciprocal `den / num`.
    pub fn inverted(self) -> Result<Self> {
        Self::new(self.den, self.num)
    }

    /// Lossy decimal rendering for display (raw smallest-unit ratio).
    #[must_use]
    pub fn to_decimal(self) -> Option<Decimal> {
        let num = Decimal::from_str(&self.num.to_string()).ok()?;
        let den = Decimal::from_str(&self.den.to_string()).ok()?;
        num.checked_div(den)
    }

    /// Decimal rendering in whole-token units, given the decimals of the
    /// numerator and denominator assets.
    #[must_use]
    pub fn to_decimal_scaled(self, num_decimals: u32, den_decimals: u32) -> Option<Decimal> {
        let raw = self.to_decimal()?;
        let num_scale = Decimal::from_str(&10u128.checked_pow(num_decimals)?.to_string()).ok()?;
        let den_scale = Decimal::from_str(&10u128.checked_pow(den_decimals)?.to_string()).ok()?;
        raw.checked_mul(den_scale)?.checked_div(num_scale)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = U256::from(self.num) * U256::from(other.den);
        let rhs = U256::from(other.num) * U256::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// `floor(a * b / c)` without intermediate overflow.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(SwapbookError::ZeroAmount);
    }
    let result = U256::from(a) * U256::from(b) / U256::from(c);
    if result > U256::from(u128::MAX) {
        return Err(SwapbookError::ArithmeticOverflow);
    }
    Ok(result.as_u128())
}
