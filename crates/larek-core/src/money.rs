//! # Money Module
//!
//! Provides the `Money` type for prices and basket totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE RUNNING TOTAL PROBLEM                                              │
//! │                                                                         │
//! │  The basket total is a cache adjusted on every add/remove:              │
//! │    total += price   (add)                                               │
//! │    total -= price   (remove)                                            │
//! │                                                                         │
//! │  With floating point, add-then-remove may not return to exactly 0.      │
//! │  With integers it always does:                                          │
//! │    0 + 750 - 750 = 0                                                    │
//! │                                                                         │
//! │  The shop API quotes every price as a whole number of "синапсы".        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use larek_core::money::Money;
//!
//! let price = Money::from_units(750);
//! let total = price + Money::from_units(1450);
//!
//! assert_eq!(total.units(), 2200);
//! assert_eq!(total.to_string(), "2200 синапсов");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Label shown instead of a price for products that cannot be bought.
pub const PRICELESS_LABEL: &str = "Бесценно";

/// Currency word appended to every rendered amount.
pub const CURRENCY_LABEL: &str = "синапсов";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole shop units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a basket total may dip below zero if a caller removes
///   an item it never added; the type does not hide that
/// - **Single field tuple struct**: serializes as a bare JSON number, which is
///   exactly the API wire format (`"price": 750`)
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Basket.total ──► Order.total ──► POST /order
///       │                 │
///       └──► Card label   └──► Basket view / Success view
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use larek_core::money::Money;
    ///
    /// let price = Money::from_units(1450);
    /// assert_eq!(price.units(), 1450);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Renders an optional price the way product cards show it.
    ///
    /// ## Example
    /// ```rust
    /// use larek_core::money::Money;
    ///
    /// assert_eq!(Money::label(Some(Money::from_units(750))), "750 синапсов");
    /// assert_eq!(Money::label(None), "Бесценно");
    /// ```
    pub fn label(price: Option<Money>) -> String {
        match price {
            Some(price) => price.to_string(),
            None => PRICELESS_LABEL.to_string(),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

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
    fn test_display() {
        assert_eq!(Money::from_units(750).to_string(), "750 синапсов");
        assert_eq!(Money::zero().to_string(), "0 синапсов");
    }

    #[test]
    fn test_label_for_missing_price() {
        assert_eq!(Money::label(None), PRICELESS_LABEL);
        assert_eq!(Money::label(Some(Money::from_units(1))), "1 синапсов");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);

        let mut total = Money::zero();
        total += a;
        total -= a;
        assert!(total.is_zero());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 600);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_units(750)).unwrap();
        assert_eq!(json, "750");

        let parsed: Money = serde_json::from_str("1450").unwrap();
        assert_eq!(parsed, Money::from_units(1450));
    }
}
