//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The storefront prices everything in whole currency units (₹500,      │
//! │  ₹150). There is no minor unit, so an integer is exact:                │
//! │                                                                         │
//! │    Laptop 500 × 2 + Headphones 100 × 1 = 1100                           │
//! │                                                                         │
//! │  Floats appear in exactly one place: the progress percentage, which    │
//! │  is display-only and never fed back into cart math.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use giftcart_core::money::Money;
//!
//! let price = Money::from_units(500);
//! let line_total = price * 2;
//! assert_eq!(line_total.units(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: `threshold - subtotal` may go negative before clamping
/// - **Newtype**: serializes as a bare number for the renderer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use giftcart_core::money::Money;
    ///
    /// let price = Money::from_units(150);
    /// assert_eq!(price.units(), 150);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
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

    /// Multiplies a unit price by a line quantity.
    ///
    /// Saturates instead of overflowing.
    #[inline]
    pub const fn times(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as i64))
    }

    /// Subtraction clamped at zero.
    ///
    /// ## Example
    /// ```rust
    /// use giftcart_core::money::Money;
    ///
    /// let threshold = Money::from_units(1000);
    /// assert_eq!(threshold.saturating_sub(Money::from_units(900)).units(), 100);
    /// assert_eq!(threshold.saturating_sub(Money::from_units(1200)).units(), 0);
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Expresses `self` as a percentage of `whole`, capped at 100.
    ///
    /// A non-positive `whole` means the target is already met, so the
    /// result is 100. Negative amounts floor at 0.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.0 <= 0 {
            return 100.0;
        }
        let pct = self.0 as f64 * 100.0 / whole.0 as f64;
        pct.clamp(0.0, 100.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain number, no currency symbol.
///
/// ## Note
/// Currency presentation belongs to the renderer; see
/// `DisplaySettings::format_amount` in giftcart-session.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.times(qty)
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
// Unit Tests
// =============================================================================
