//! # Money Module
//!
//! Monetary values as integer minor units.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  All money in the cart flows through this type:                     │
//! │                                                                     │
//! │  ProductDetails.unit_price ──► LineItem.unit_price ──► line_total   │
//! │                                                                     │
//! │  subtotal ──► bundle/coupon discount ──► final_total ──► checkout   │
//! │                                                                     │
//! │  Internally everything is i64 minor units. Fractions only appear    │
//! │  inside percentage math, which rounds half-up before returning.     │
//! │  The two-decimal rendering in Display is the presentation boundary. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Signed so that discount arithmetic can be expressed naturally; the cart
/// clamps customer-facing totals at zero before they leave the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use velora_core::money::Money;
    ///
    /// let price = Money::from_cents(129900); // 1299.00
    /// assert_eq!(price.cents(), 129900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use velora_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(39900);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 119700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes `pct` percent of this amount, rounded half-up.
    ///
    /// Intermediate math runs in i128 so large subtotals cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use velora_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(500);
    /// assert_eq!(subtotal.percent_of(10).cents(), 50);
    ///
    /// // 333 * 15% = 49.95 -> rounds up to 50
    /// assert_eq!(Money::from_cents(333).percent_of(15).cents(), 50);
    /// ```
    pub fn percent_of(&self, pct: i64) -> Money {
        let discounted = (self.0 as i128 * pct as i128 + 50) / 100;
        Money(discounted as i64)
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamps a would-be-negative amount to zero.
    #[inline]
    pub const fn floor_at_zero(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering; this is the presentation boundary for money.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 10% of 500 = 50, exact
        assert_eq!(Money::from_cents(500).percent_of(10).cents(), 50);
        // 15% of 333 = 49.95 -> 50
        assert_eq!(Money::from_cents(333).percent_of(15).cents(), 50);
        // 10% of 45 = 4.5 -> 5 (half rounds up)
        assert_eq!(Money::from_cents(45).percent_of(10).cents(), 5);
        // 10% of 44 = 4.4 -> 4
        assert_eq!(Money::from_cents(44).percent_of(10).cents(), 4);
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!((Money::from_cents(500) - Money::from_cents(1000)).floor_at_zero(), Money::zero());
        assert_eq!(Money::from_cents(250).floor_at_zero().cents(), 250);
    }

    #[test]
    fn test_min() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(29900);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 89700);
    }
}
