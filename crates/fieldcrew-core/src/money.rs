//! # Money Module
//!
//! Provides the `Money` type for estimate amounts.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  Multipliers (tier, risk, safety, markup) are applied as f64.           │
//! │  Every amount that leaves a pricing stage is rounded to a whole         │
//! │  currency unit and stored here as an integer:                           │
//! │                                                                         │
//! │    labor ──round──► Money                                               │
//! │    materials × 1.18 ──round──► Money                                    │
//! │    combined × tier × risk × safety ──round──► Money                     │
//! │                                                                         │
//! │  Sums of Money (subtotal, adjusted total) never touch floats again.     │
//! │  Amounts outside the i64 range are reported, never saturated.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldcrew_core::money::Money;
//!
//! let labor = Money::from_units(175);
//! let materials = Money::try_from_rounded(85.0 * 1.18).unwrap(); // 100.3 → 100
//! assert_eq!((labor + materials).units(), 275);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units (dollars).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as the minimum-job adjustment are
///   computed with plain subtraction
/// - **Transparent serde**: serializes as a bare JSON integer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use fieldcrew_core::money::Money;
    ///
    /// let price = Money::from_units(165);
    /// assert_eq!(price.units(), 165);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds a computed amount to the nearest whole unit.
    ///
    /// Halves round away from zero, so for the non-negative amounts the
    /// pricing engine produces `0.5` always rounds up. Returns `None` when
    /// the rounded amount is not finite or does not fit in an `i64`.
    ///
    /// ```rust
    /// use fieldcrew_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_rounded(311.575).map(|m| m.units()), Some(312));
    /// assert_eq!(Money::try_from_rounded(247.5).map(|m| m.units()), Some(248));
    /// assert_eq!(Money::try_from_rounded(168.2505).map(|m| m.units()), Some(168));
    /// assert_eq!(Money::try_from_rounded(1e19), None);
    /// ```
    #[inline]
    pub fn try_from_rounded(amount: f64) -> Option<Self> {
        let rounded = amount.round();
        // i64::MAX as f64 is 2^63, one past the largest i64
        if rounded.is_finite() && rounded.abs() < i64::MAX as f64 {
            Some(Money(rounded as i64))
        } else {
            None
        }
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns the amount as `f64` for multiplier arithmetic.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Addition that reports overflow instead of wrapping.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display (`$312`, `-$5`). Locale formatting belongs to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, self.0.unsigned_abs())
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

/// Multiplication by a whole quantity.
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
