//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    699.99 × 3 = 2099.9700000000003  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    69999 cents × 3 = 209997 cents = 2099.97  ✅ EXACT                   │
//! │                                                                         │
//! │  Prices arrive as decimal strings with at most two fractional digits   │
//! │  and are parsed straight into cents. No f64 ever touches a price.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashier_core::money::Money;
//!
//! let price = Money::from_decimal_str("699.99").unwrap();
//! assert_eq!(price.cents(), 69_999);
//!
//! let line = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.to_string(), "2099.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Serializes as the bare integer, so `Money::from_cents(1099)` is `1099`
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use cashier_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount with at most two fractional digits.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "699.99" → 69999     "5" → 500      "5.5" → 550
    /// "0.07"   → 7         "-1.25" → -125
    /// ```
    ///
    /// Anything else (three decimals, exponents, stray characters, an
    /// amount outside `i64` cents) is an `InvalidFormat` error.
    pub fn from_decimal_str(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number such as 12.50"));
        }
        if minor_str.len() > 2 || !minor_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("at most two fractional digits are allowed"));
        }
        if digits.ends_with('.') {
            return Err(invalid("missing fractional digits after '.'"));
        }

        let major: i64 = major_str
            .parse()
            .map_err(|_| invalid("amount is out of range"))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// This is the only multiplication the checkout path uses: a cart that
    /// would overflow `i64` cents is rejected, never wrapped.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, e.g. `2099.97` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_str() {
        assert_eq!(Money::from_decimal_str("699.99").unwrap().cents(), 69_999);
        assert_eq!(Money::from_decimal_str("1299.99").unwrap().cents(), 129_999);
        assert_eq!(Money::from_decimal_str("5").unwrap().cents(), 500);
        assert_eq!(Money::from_decimal_str("5.5").unwrap().cents(), 550);
        assert_eq!(Money::from_decimal_str("0.07").unwrap().cents(), 7);
        assert_eq!(Money::from_decimal_str(" 10.00 ").unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal_str("-1.25").unwrap().cents(), -125);
    }

    #[test]
    fn test_from_decimal_str_rejects_bad_input() {
        for bad in ["", "abc", "1.234", "1.", ".5", "1e3", "1,50", "--1", "99999999999999999999"] {
            assert!(Money::from_decimal_str(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(209_997).to_string(), "2099.97");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_exact_decimal_multiplication() {
        let price = Money::from_decimal_str("699.99").unwrap();
        let line = price.checked_multiply_quantity(3).unwrap();
        assert_eq!(line, Money::from_decimal_str("2099.97").unwrap());
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_none());
        assert_eq!(
            Money::from_cents(100).checked_add(Money::from_cents(1)),
            Some(Money::from_cents(101))
        );
    }

    #[test]
    fn test_sum_and_arithmetic() {
        let total: Money = [1000, 2000, 3000].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 6000);
        assert_eq!((total - Money::from_cents(1000)).cents(), 5000);
        assert_eq!((Money::from_cents(250) * 4).cents(), 1000);
    }

    #[test]
    fn test_serializes_as_integer_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
