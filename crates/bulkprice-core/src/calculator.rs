//! # Price Calculator
//!
//! The single authoritative source of a bulk-priced line.
//!
//! ## Sale Then Bulk, Never Sale Plus Bulk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base 1000, sale 800, tier 10+ = 10% off, qty 25                        │
//! │                                                                         │
//! │  1. effective price   = 800          (sale is below base)              │
//! │  2. resolved tier     = 10+                                            │
//! │  3. tier discount     = 800 × 10%  = 80 per unit                       │
//! │  4. unit price        = 800 − 80   = 720                               │
//! │  5. total             = 720 × 25   = 18000                             │
//! │     bulk discount     = 80 × 25    = 2000                              │
//! │     savings vs base   = (1000 − 720) / 1000 = 28%                      │
//! │                                                                         │
//! │  Additive stacking (10% + 20% = 30% off 1000 = 700) would over-discount │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic stays at full precision. Round with
//! [`PricingResult::rounded`] when showing the result.

use rust_decimal::Decimal;
use tracing::warn;

use crate::advisor::next_tier;
use crate::error::{CoreResult, PricingAnomaly, PricingError};
use crate::money::Money;
use crate::resolver::resolve_tier;
use crate::types::{BulkTier, PricingResult, Product, Quote};

/// Prices `quantity` units of a product.
///
/// ## Errors
/// - [`PricingError::InvalidQuantity`] when `quantity < 1`
/// - [`PricingError::InvalidPrice`] when `base_price <= 0`
/// - [`PricingError::Overflow`] when a line total or percentage discount
///   does not fit in a `Decimal`
///
/// A `sale_price` that is not positive or not below `base_price` is
/// ignored, matching [`Product::effective_price`].
///
/// ## Example
/// ```rust
/// use bulkprice_core::calculator::compute_price;
/// use bulkprice_core::{BulkTier, Money};
/// use rust_decimal::Decimal;
///
/// let tiers = vec![
///     BulkTier::percentage(10, Decimal::from(10)),
///     BulkTier::percentage(50, Decimal::from(20)),
/// ];
///
/// let result = compute_price(Money::from_major(1000), None, &tiers, 25).unwrap();
/// assert_eq!(result.unit_price, Money::from_major(900));
/// assert_eq!(result.total_price, Money::from_major(22500));
/// ```
pub fn compute_price(
    base_price: Money,
    sale_price: Option<Money>,
    tiers: &[BulkTier],
    quantity: i64,
) -> CoreResult<PricingResult> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity { quantity });
    }
    if !base_price.is_positive() {
        return Err(PricingError::InvalidPrice { price: base_price });
    }

    let product = Product {
        base_price,
        sale_price,
    };
    let effective_price = product.effective_price();
    let overflow = || PricingError::Overflow {
        price: effective_price,
        quantity,
    };

    let Some(tier) = resolve_tier(tiers, quantity) else {
        return Ok(PricingResult {
            effective_price,
            unit_price: effective_price,
            total_price: effective_price
                .checked_multiply_quantity(quantity)
                .ok_or_else(overflow)?,
            applied_tier: None,
            discount_amount: Money::zero(),
            savings_percentage: Decimal::ZERO,
            anomaly: None,
        });
    };

    let tier_discount = tier.discount_on(effective_price).ok_or_else(overflow)?;
    let (unit_discount, anomaly) = if tier_discount > effective_price {
        warn!(
            min_quantity = tier.min_quantity,
            effective_price = %effective_price,
            discount = %tier_discount,
            "Bulk discount exceeds effective price, clamping unit price to zero"
        );
        let anomaly = PricingAnomaly::ClampedToZero {
            min_quantity: tier.min_quantity,
            effective_price,
            discount: tier_discount,
        };
        (effective_price, Some(anomaly))
    } else {
        (tier_discount, None)
    };

    let unit_price = effective_price - unit_discount;

    Ok(PricingResult {
        effective_price,
        unit_price,
        total_price: unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?,
        applied_tier: Some(tier.clone()),
        discount_amount: unit_discount
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?,
        savings_percentage: savings_percentage(base_price, unit_price).ok_or_else(overflow)?,
        anomaly,
    })
}

/// Total savings of `unit_price` against the undiscounted `base_price`, in percent.
fn savings_percentage(base_price: Money, unit_price: Money) -> Option<Decimal> {
    (base_price - unit_price)
        .amount()
        .checked_div(base_price.amount())?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Prices a product and looks up the next tier in one call.
///
/// This is what a product page calls on every quantity change.
pub fn quote(product: &Product, tiers: &[BulkTier], quantity: i64) -> CoreResult<Quote> {
    let pricing = compute_price(product.base_price, product.sale_price, tiers, quantity)?;
    Ok(Quote {
        quantity,
        pricing,
        next_tier: next_tier(tiers, quantity),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
