//! # Error Types
//!
//! Domain-specific error types for bulkprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bulkprice-core errors (this file)                                     │
//! │  ├── ValidationError   - One broken tier/product invariant             │
//! │  ├── ValidationErrors  - The complete batch returned to authoring UIs  │
//! │  ├── PricingError      - Out-of-domain input to the calculator         │
//! │  └── PricingAnomaly    - Internal guard, logged, never shown to buyers │
//! │                                                                         │
//! │  bulkprice-service errors (separate crate)                             │
//! │  └── ServiceError      - Config, fetch and persistence failures        │
//! │                                                                         │
//! │  Flow: ValidationErrors → PricingError → ServiceError → storefront     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (min quantity, value, position)
//! 3. Errors are enum variants, never String
//! 4. Validation never stops at the first problem

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// A single broken invariant in a tier set or product.
///
/// Every message is written for a seller correcting their tier table.
/// `position` is the zero-based index of the tier in the submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Bulk pricing is enabled but no tiers were supplied.
    #[error("at least one tier is required when bulk pricing is enabled")]
    EmptyTierSet,

    /// Two or more tiers share a minimum quantity.
    #[error("minimum quantity {min_quantity} is used by {count} tiers")]
    DuplicateMinQuantity { min_quantity: i64, count: usize },

    /// A tier starts below two units.
    #[error("tier {position}: minimum quantity must be at least 2, got {min_quantity}")]
    MinQuantityTooLow { position: usize, min_quantity: i64 },

    /// A tier discount is zero or negative.
    #[error("tier {position}: discount must be greater than 0, got {value}")]
    NonPositiveDiscount { position: usize, value: Decimal },

    /// A percentage discount of 100 or more.
    #[error("tier {position}: percentage discount must be below 100, got {value}")]
    PercentageTooHigh { position: usize, value: Decimal },

    /// A fixed discount that would wipe out the price.
    #[error("tier {position}: fixed discount {value} must be below the price {price}")]
    FixedDiscountTooHigh {
        position: usize,
        value: Decimal,
        price: Money,
    },

    /// A price that must be positive is not.
    #[error("{field} must be greater than 0, got {value}")]
    NonPositivePrice { field: String, value: Money },

    /// Sale price is not below the list price.
    #[error("sale price {sale_price} must be below the base price {base_price}")]
    SalePriceNotBelowBase { sale_price: Money, base_price: Money },

    /// Discount type outside `percentage` / `fixed`.
    #[error("tier {position}: unknown discount type '{value}', expected percentage or fixed")]
    UnknownDiscountType { position: usize, value: String },

    /// A wire number that cannot be represented exactly (NaN, infinity, overflow).
    #[error("{field} is not a valid number")]
    InvalidNumber { field: String },

    /// Input could not be parsed at all.
    #[error("malformed input: {reason}")]
    Malformed { reason: String },
}

// =============================================================================
// Validation Errors (batch)
// =============================================================================

/// Every violation found in one validation pass.
///
/// Never empty: validators return `Ok(())` instead of an empty batch.
///
/// ## User Workflow
/// ```text
/// Seller submits tiers
///      │
///      ▼
/// validate_tiers(...)
///      │
///      ▼
/// ValidationErrors [
///   "minimum quantity 10 is used by 2 tiers",
///   "tier 2: percentage discount must be below 100, got 120",
/// ]
///      │
///      ▼
/// UI highlights both rows at once
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Returns `Ok(())` for an empty list, otherwise the batch as an error.
    pub fn into_result(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a batch returned by a validator.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Human-readable message for each violation, in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    /// Callers must not pass an empty list; use [`ValidationErrors::into_result`]
    /// when the list may be empty.
    fn from(errors: Vec<ValidationError>) -> Self {
        ValidationErrors(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Caller supplied input outside the calculator's domain.
///
/// All variants are recoverable: the caller re-prompts for a valid
/// quantity or fixes the product or tier record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Quantity below one unit.
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Base price is zero or negative.
    #[error("base price must be greater than 0, got {price}")]
    InvalidPrice { price: Money },

    /// Tier set rejected when it was built or revalidated.
    #[error("invalid tier set: {0}")]
    Validation(#[from] ValidationErrors),

    /// Price times quantity (or a percentage of the price) does not fit
    /// in a `Decimal`.
    #[error("price {price} for quantity {quantity} is outside the representable range")]
    Overflow { price: Money, quantity: i64 },
}

// =============================================================================
// Pricing Anomaly
// =============================================================================

/// Internal guard raised while pricing. Never surfaced to buyers.
///
/// Seeing one means a tier set reached the calculator without passing
/// validation against the price it is being applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingAnomaly {
    /// A fixed discount exceeded the effective price; unit price was clamped to zero.
    ClampedToZero {
        min_quantity: i64,
        effective_price: Money,
        discount: Money,
    },
}

impl fmt::Display for PricingAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingAnomaly::ClampedToZero {
                min_quantity,
                effective_price,
                discount,
            } => write!(
                f,
                "tier {}+ discount {} exceeds effective price {}; unit price clamped to 0",
                min_quantity, discount, effective_price
            ),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type CoreResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::DuplicateMinQuantity {
            min_quantity: 10,
            count: 2,
        };
        assert_eq!(err.to_string(), "minimum quantity 10 is used by 2 tiers");

        let err = ValidationError::PercentageTooHigh {
            position: 1,
            value: dec!(120),
        };
        assert_eq!(
            err.to_string(),
            "tier 1: percentage discount must be below 100, got 120"
        );
    }

    #[test]
    fn test_batch_display_joins_all_messages() {
        let errors = ValidationErrors::into_result(vec![
            ValidationError::EmptyTierSet,
            ValidationError::MinQuantityTooLow {
                position: 0,
                min_quantity: 1,
            },
        ])
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "at least one tier is required when bulk pricing is enabled; \
             tier 0: minimum quantity must be at least 2, got 1"
        );
    }

    #[test]
    fn test_empty_batch_is_ok() {
        assert!(ValidationErrors::into_result(Vec::new()).is_ok());
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let errors: ValidationErrors = ValidationError::EmptyTierSet.into();
        let err: PricingError = errors.into();
        assert!(matches!(err, PricingError::Validation(_)));
    }

    #[test]
    fn test_pricing_error_messages() {
        let err = PricingError::InvalidQuantity { quantity: 0 };
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");

        let err = PricingError::InvalidPrice {
            price: Money::from_cents(-100),
        };
        assert_eq!(err.to_string(), "base price must be greater than 0, got -1.00");
    }

    #[test]
    fn test_validation_error_serializes_with_kind_tag() {
        let json = serde_json::to_value(ValidationError::EmptyTierSet).unwrap();
        assert_eq!(json["kind"], "empty_tier_set");
    }
}
