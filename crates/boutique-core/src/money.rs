//! # Money Module
//!
//! Provides the `Money` type for whole-franc FCFA amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FCFA HAS NO MINOR UNIT                                                 │
//! │                                                                         │
//! │  Prices, totals and expenses are whole francs:                          │
//! │    1 500 FCFA + 300 FCFA = 1 800 FCFA                                   │
//! │                                                                         │
//! │  Storing i64 francs keeps every sum exact. Values that arrive as       │
//! │  JSON floats (older blobs) are truncated toward zero on decode.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boutique_core::money::Money;
//!
//! let price = Money::from_fcfa(250);
//! let line = price.multiply_quantity(4);
//! assert_eq!(line.fcfa(), 1000);
//! assert_eq!(line.to_string(), "1000 FCFA");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Currency label printed after every amount.
pub const CURRENCY_LABEL: &str = "FCFA";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole FCFA.
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit and negated expense lines go below zero
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: totals clamp at the i64 bounds instead of
///   overflowing
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► SaleItem.price ──► line total ──► Sale.total
///                                                        │
/// Expense.amount ─────────────────────────┐              ▼
///                                         └──► net profit, report totals
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole francs.
    #[inline]
    pub const fn from_fcfa(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole francs.
    #[inline]
    pub const fn fcfa(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    ///
    /// let unit_price = Money::from_fcfa(350);
    /// assert_eq!(unit_price.multiply_quantity(3).fcfa(), 1050);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount followed by the currency label, e.g. `1500 FCFA`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, CURRENCY_LABEL)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Lenient Decoding
// =============================================================================

/// Any shape an amount has been stored in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

/// Deserializes an integer amount, truncating floats toward zero.
///
/// Numeric text is parsed the same way. `null` (a `NaN` written by
/// `JSON.stringify`) and anything else unreadable decode as `0`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    Ok(match raw {
        RawAmount::Int(value) => value,
        RawAmount::Float(value) => value.trunc() as i64,
        RawAmount::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) => value.trunc() as i64,
            Err(_) => {
                tracing::warn!(value = %text, "Unparseable amount, using 0");
                0
            }
        },
        RawAmount::Null => {
            tracing::warn!("Null amount, using 0");
            0
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_amount")]
        amount: i64,
    }

    fn decode(json: &str) -> i64 {
        serde_json::from_str::<Wrapper>(json).unwrap().amount
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_fcfa(1500).to_string(), "1500 FCFA");
        assert_eq!(Money::from_fcfa(0).to_string(), "0 FCFA");
        assert_eq!(Money::from_fcfa(-300).to_string(), "-300 FCFA");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_fcfa(1000);
        let b = Money::from_fcfa(500);

        assert_eq!((a + b).fcfa(), 1500);
        assert_eq!((a - b).fcfa(), 500);
        assert_eq!((-b).fcfa(), -500);
        assert_eq!((a * 3).fcfa(), 3000);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_fcfa(100), Money::from_fcfa(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.fcfa(), 350);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::from_fcfa(1).is_positive());
        assert!(Money::from_fcfa(-1).is_negative());
        assert_eq!(Money::from_fcfa(-40).abs().fcfa(), 40);
    }

    #[test]
    fn test_lenient_amount_decoding() {
        assert_eq!(decode(r#"{"amount": 1500}"#), 1500);
        assert_eq!(decode(r#"{"amount": 1499.99}"#), 1499);
        assert_eq!(decode(r#"{"amount": "250"}"#), 250);
        assert_eq!(decode(r#"{"amount": "abc"}"#), 0);
        assert_eq!(decode(r#"{"amount": null}"#), 0);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = decode(r#"{"amount": 1e19}"#);
        assert_eq!(huge, i64::MAX);

        let amounts = [Money::from_fcfa(huge), Money::from_fcfa(huge)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.fcfa(), i64::MAX);

        assert_eq!((Money::zero() - total - total).fcfa(), i64::MIN);
        assert_eq!(Money::from_fcfa(i64::MIN).abs().fcfa(), i64::MAX);
        assert_eq!((-Money::from_fcfa(i64::MIN)).fcfa(), i64::MAX);
        assert_eq!(Money::from_fcfa(huge).multiply_quantity(3).fcfa(), i64::MAX);
    }
}
