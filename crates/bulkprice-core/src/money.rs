//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Bulk pricing stacks two discounts (sale, then tier) and then          │
//! │  multiplies by quantity. Rounding after each step drifts:              │
//! │    999.99 × 85% = 849.9915 → 849.99 → ×30 = 25499.70                   │
//! │    999.99 × 85% = 849.9915 → ×30 = 25499.745 → 25499.75                │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals, Round Once                               │
//! │    Every intermediate value keeps full precision                       │
//! │    Rounding to 2 places happens only when a value is displayed         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bulkprice_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//!
//! let line = price.checked_multiply_quantity(3).unwrap(); // 32.97
//! let total = line + Money::from_cents(500);              // 37.97
//! assert_eq!(total, Money::from_cents(3797));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Decimal places kept when a monetary value is shown to a buyer.
pub const DISPLAY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal, not f64**: exact base-10 arithmetic
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **No currency**: the storefront trades in one currency and formatting
///   is the frontend's job
/// - **Serialized as a string**: `"900.00"` survives JSON without float loss
/// - **Checked scaling**: multiplication returns `None` past the 96-bit
///   `Decimal` range instead of panicking
///
/// ## Where Money is Used
/// ```text
/// Product.base_price ──┬──► effective price ──► tier discount ──► unit price
///                      │                                              │
/// Product.sale_price ──┘                                              ▼
///                                                       unit price × quantity
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bulkprice_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_SCALE))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the underlying decimal at full precision.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `percent`% of this amount, without rounding.
    ///
    /// `None` if the intermediate product leaves the `Decimal` range.
    ///
    /// ## Example
    /// ```rust
    /// use bulkprice_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_major(800);
    /// assert_eq!(price.checked_percent(Decimal::from(10)), Some(Money::from_major(80)));
    /// ```
    pub fn checked_percent(&self, percent: Decimal) -> Option<Money> {
        self.0
            .checked_mul(percent)?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Money)
    }

    /// Multiplies money by a quantity. `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Rounds to [`DISPLAY_SCALE`] places, half away from zero.
    ///
    /// Only call this on values that are about to be shown. Feeding a
    /// rounded value back into further arithmetic reintroduces the drift
    /// this type exists to prevent.
    ///
    /// ## Example
    /// ```rust
    /// use bulkprice_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let exact = Money::new(Decimal::new(8499915, 4)); // 849.9915
    /// assert_eq!(exact.round_for_display(), Money::from_cents(84999));
    /// ```
    pub fn round_for_display(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to two places, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_for_display().0;
        rounded.rescale(DISPLAY_SCALE);
        write!(f, "{}", rounded)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

// =============================================================================
// Unit Tests
// =============================================================================
