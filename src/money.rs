//! Fixed-precision money arithmetic.
//!
//! Uses `rust_decimal` internally so monetary calculations never accumulate
//! floating-point error. Rounding to the minor unit (cents) happens in exactly
//! one place: [`distribute_equally`]. Everything else stays exact, which is
//! what keeps interactive slider math conservative (see `rebalance`).

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount backed by an exact decimal.
///
/// Unlike a scale-pinned decimal, `Money` does not rescale on every operation:
/// share maps produced by live slider edits must keep sub-cent precision so
/// that an unclamped edit conserves the item total exactly. Minor-unit
/// rounding is confined to [`distribute_equally`].
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use split_engine::Money;
///
/// let amount = Money::from_str("10.50").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Number of decimal places in the minor unit (cents).
    pub const MINOR_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a `Money` from an exact decimal value.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Splits `amount` into `n` shares that sum to `amount` exactly.
///
/// Every share is `floor(amount * 100 / n) / 100`; the first share
/// additionally receives whatever rounding remainder is left, which is at most
/// `n - 1` minor units. Crediting the remainder to the first share is a
/// deterministic tie-break, not a fair distribution of rounding error.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if `amount` is negative or `n` is 0.
pub fn distribute_equally(amount: Money, n: usize) -> Result<Vec<Money>> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "cannot distribute negative amount {}",
            amount
        )));
    }
    if n == 0 {
        return Err(EngineError::InvalidAmount(
            "cannot distribute across zero shares".to_string(),
        ));
    }

    let count = Decimal::from(n);
    let base = (amount.value() * Decimal::ONE_HUNDRED / count).floor() / Decimal::ONE_HUNDRED;

    let mut shares = vec![Money::new(base); n];
    shares[0] += Money::new(amount.value() - base * count);

    Ok(shares)
}

/// Clamps `value` into `[lo, hi]`.
pub fn clamp(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    value.max(lo).min(hi)
}
