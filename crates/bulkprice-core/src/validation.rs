//! # Validation Module
//!
//! Tier set and product validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Seller dashboard (frontend)                                  │
//! │  └── validate_tiers() before submit, all problems shown at once        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Authoring endpoint (server)                                  │
//! │  └── validate_tiers() again before the write is committed              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Read path                                                    │
//! │  └── TierSet::new() revalidates fetched tiers before pricing           │
//! │                                                                         │
//! │  Defense in depth: the same rules run at every layer                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collect, Don't Short-Circuit
//! Every validator walks the whole input and returns every violation.
//! A seller fixing a five-row tier table should see all five problems,
//! not one per submit.
//!
//! ## Usage
//! ```rust
//! use bulkprice_core::validation::validate_tiers;
//! use bulkprice_core::{BulkPricingMode, BulkTier, Money};
//! use rust_decimal::Decimal;
//!
//! let tiers = vec![
//!     BulkTier::percentage(10, Decimal::from(10)),
//!     BulkTier::percentage(10, Decimal::from(120)),
//! ];
//!
//! let errors = validate_tiers(&tiers, Money::from_major(1000), BulkPricingMode::Enabled)
//!     .unwrap_err();
//! assert_eq!(errors.len(), 2); // duplicate threshold AND percentage >= 100
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::{BulkPricingMode, BulkTier, DiscountType, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Smallest quantity a tier may start at. A "tier" at 1 is just a price cut.
pub const MIN_TIER_QUANTITY: i64 = 2;

/// Percentage discounts must stay strictly below this.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Tier Set Validation
// =============================================================================

/// Validates a candidate tier set against a price.
///
/// ## Rules
/// - In [`BulkPricingMode::Enabled`] the set must not be empty
/// - `min_quantity` values must be unique, i.e. strictly increasing once
///   sorted (input order is irrelevant)
/// - Each tier: `min_quantity >= 2`, `discount_value > 0`
/// - Percentage tiers: `discount_value < 100`
/// - Fixed tiers: `discount_value < price`
///
/// `price` is what fixed discounts are checked against. Authoring and
/// read paths pass the product's effective price, which is never above
/// the base price, so a set accepted here can never clamp.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Seller Dashboard: Save Bulk Tiers                                      │
/// │                                                                         │
/// │  Seller edits tier table                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_tiers(tiers, price, Enabled) ← THIS FUNCTION                 │
/// │       │                                                                 │
/// │       ├── Err(batch) → every offending row highlighted                 │
/// │       │                                                                 │
/// │       └── Ok → submit to the product API                               │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_tiers(
    tiers: &[BulkTier],
    price: Money,
    mode: BulkPricingMode,
) -> ValidationResult<()> {
    let mut errors = Vec::new();

    let price_is_valid = price.is_positive();
    if !price_is_valid {
        errors.push(ValidationError::NonPositivePrice {
            field: "base price".to_string(),
            value: price,
        });
    }

    if tiers.is_empty() && mode.is_enabled() {
        errors.push(ValidationError::EmptyTierSet);
    }

    errors.extend(threshold_violations(tiers));

    for (position, tier) in tiers.iter().enumerate() {
        errors.extend(tier_violations(position, tier, price_is_valid.then_some(price)));
    }

    ValidationErrors::into_result(errors)
}

/// Checks that thresholds strictly increase once sorted.
///
/// Sorting first means pre-sorted input is never assumed. With integer
/// thresholds the only way an adjacent sorted pair fails to increase is a
/// repeat, so each repeated value is reported once with its count.
fn threshold_violations(tiers: &[BulkTier]) -> Vec<ValidationError> {
    let mut thresholds: Vec<i64> = tiers.iter().map(|tier| tier.min_quantity).collect();
    thresholds.sort_unstable();

    let mut violations = Vec::new();
    let mut start = 0;
    while start < thresholds.len() {
        let value = thresholds[start];
        let run = thresholds[start..]
            .iter()
            .take_while(|&&next| next <= value)
            .count();
        if run > 1 {
            violations.push(ValidationError::DuplicateMinQuantity {
                min_quantity: value,
                count: run,
            });
        }
        start += run;
    }
    violations
}

/// Checks a single tier's own fields.
///
/// `price` is `None` when the price itself is invalid; the fixed-discount
/// bound is skipped rather than reported against a meaningless price.
fn tier_violations(position: usize, tier: &BulkTier, price: Option<Money>) -> Vec<ValidationError> {
    let mut violations = Vec::new();

    if tier.min_quantity < MIN_TIER_QUANTITY {
        violations.push(ValidationError::MinQuantityTooLow {
            position,
            min_quantity: tier.min_quantity,
        });
    }

    let value = tier.discount_value;
    if value <= Decimal::ZERO {
        violations.push(ValidationError::NonPositiveDiscount { position, value });
        return violations;
    }

    match (tier.discount_type, price) {
        (DiscountType::Percentage, _) if value >= MAX_PERCENTAGE => {
            violations.push(ValidationError::PercentageTooHigh { position, value });
        }
        (DiscountType::Fixed, Some(price)) if Money::new(value) >= price => {
            violations.push(ValidationError::FixedDiscountTooHigh {
                position,
                value,
                price,
            });
        }
        _ => {}
    }

    violations
}

// =============================================================================
// Product Validation
// =============================================================================

/// Validates the pricing fields of a product.
///
/// ## Rules
/// - `base_price > 0`
/// - `sale_price`, when present, is `> 0` and `< base_price`
///
/// The calculator tolerates an out-of-range sale price by ignoring it;
/// this validator is for the authoring side, where the seller should be
/// told instead.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if !product.base_price.is_positive() {
        errors.push(ValidationError::NonPositivePrice {
            field: "base price".to_string(),
            value: product.base_price,
        });
    }

    if let Some(sale_price) = product.sale_price {
        if !sale_price.is_positive() {
            errors.push(ValidationError::NonPositivePrice {
                field: "sale price".to_string(),
                value: sale_price,
            });
        } else if sale_price >= product.base_price && product.base_price.is_positive() {
            errors.push(ValidationError::SalePriceNotBelowBase {
                sale_price,
                base_price: product.base_price,
            });
        }
    }

    ValidationErrors::into_result(errors)
}

// =============================================================================
// Unit Tests
// =============================================================================
