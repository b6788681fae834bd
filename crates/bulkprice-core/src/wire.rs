//! # Wire Shapes
//!
//! Tier and product records exactly as the storefront API delivers them.
//!
//! ```json
//! { "minQuantity": 10, "discountType": "percentage", "discountValue": 15 }
//! { "price": 1000, "salePrice": 800 }
//! ```
//!
//! Numbers arrive as JSON floats. Converting into domain types turns them
//! into exact decimals once, here, and reports anything unrepresentable
//! alongside the other problems in the same batch.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::{BulkTier, DiscountType, Product};
use crate::validation::ValidationResult;

/// A tier as sent by the seller dashboard or returned by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInput {
    pub min_quantity: i64,
    pub discount_type: String,
    pub discount_value: f64,
}

/// A product's price fields as returned by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

fn decimal_from_wire(value: f64, field: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_f64(value).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.to_string(),
    })
}

fn parse_discount_type(position: usize, raw: &str) -> Result<DiscountType, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "percentage" | "percent" => Ok(DiscountType::Percentage),
        "fixed" => Ok(DiscountType::Fixed),
        _ => Err(ValidationError::UnknownDiscountType {
            position,
            value: raw.to_string(),
        }),
    }
}

impl TierInput {
    /// Converts one tier, collecting both field errors if both are bad.
    pub fn to_tier(&self, position: usize) -> Result<BulkTier, Vec<ValidationError>> {
        let discount_type = parse_discount_type(position, &self.discount_type);
        let discount_value = decimal_from_wire(
            self.discount_value,
            &format!("tier {position} discount value"),
        );

        match (discount_type, discount_value) {
            (Ok(discount_type), Ok(discount_value)) => Ok(BulkTier {
                min_quantity: self.min_quantity,
                discount_type,
                discount_value,
            }),
            (discount_type, discount_value) => Err(discount_type
                .err()
                .into_iter()
                .chain(discount_value.err())
                .collect()),
        }
    }
}

/// Converts a whole tier list, reporting every bad record at once.
///
/// This only checks that the records are representable. Business rules
/// still go through [`crate::validation::validate_tiers`].
pub fn convert_tiers(inputs: &[TierInput]) -> ValidationResult<Vec<BulkTier>> {
    let mut tiers = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();

    for (position, input) in inputs.iter().enumerate() {
        match input.to_tier(position) {
            Ok(tier) => tiers.push(tier),
            Err(mut problems) => errors.append(&mut problems),
        }
    }

    ValidationErrors::into_result(errors).map(|()| tiers)
}

/// Parses a JSON array of tier records.
///
/// ## Example
/// ```rust
/// use bulkprice_core::wire::parse_tiers_json;
///
/// let tiers = parse_tiers_json(
///     r#"[{ "minQuantity": 10, "discountType": "percentage", "discountValue": 15 }]"#,
/// )
/// .unwrap();
/// assert_eq!(tiers[0].min_quantity, 10);
/// ```
pub fn parse_tiers_json(json: &str) -> ValidationResult<Vec<BulkTier>> {
    let inputs: Vec<TierInput> = serde_json::from_str(json).map_err(|e| {
        ValidationErrors::from(ValidationError::Malformed {
            reason: e.to_string(),
        })
    })?;
    convert_tiers(&inputs)
}

impl TryFrom<&ProductInput> for Product {
    type Error = ValidationErrors;

    fn try_from(input: &ProductInput) -> Result<Self, Self::Error> {
        let base = decimal_from_wire(input.price, "price");
        let sale = input
            .sale_price
            .map(|sale| decimal_from_wire(sale, "sale price"))
            .transpose();

        match (base, sale) {
            (Ok(base), Ok(sale)) => Ok(Product {
                base_price: Money::new(base),
                sale_price: sale.map(Money::new),
            }),
            (base, sale) => Err(base
                .err()
                .into_iter()
                .chain(sale.err())
                .collect::<Vec<_>>()
                .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_storefront_shape() {
        let tiers = parse_tiers_json(
            r#"[
                { "minQuantity": 10, "discountType": "percentage", "discountValue": 10 },
                { "minQuantity": 50, "discountType": "fixed", "discountValue": 12.5 }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            tiers,
            vec![
                BulkTier::percentage(10, dec!(10)),
                BulkTier::fixed(50, Money::new(dec!(12.5))),
            ]
        );
    }

    #[test]
    fn test_collects_every_bad_record() {
        let inputs = vec![
            TierInput {
                min_quantity: 10,
                discount_type: "bogo".to_string(),
                discount_value: f64::NAN,
            },
            TierInput {
                min_quantity: 20,
                discount_type: "fixed".to_string(),
                discount_value: f64::INFINITY,
            },
        ];

        let errors = convert_tiers(&inputs).unwrap_err().into_inner();
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors[0],
            ValidationError::UnknownDiscountType { position: 0, .. }
        ));
        assert!(matches!(errors[1], ValidationError::InvalidNumber { .. }));
        assert!(matches!(errors[2], ValidationError::InvalidNumber { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_tiers_json("{ not json").unwrap_err();
        assert!(matches!(
            err.into_inner()[0],
            ValidationError::Malformed { .. }
        ));
    }

    #[test]
    fn test_product_conversion() {
        let input: ProductInput = serde_json::from_str(r#"{ "price": 1000, "salePrice": 800 }"#).unwrap();
        let product = Product::try_from(&input).unwrap();
        assert_eq!(product.base_price, Money::from_major(1000));
        assert_eq!(product.sale_price, Some(Money::from_major(800)));

        let input: ProductInput = serde_json::from_str(r#"{ "price": 15 }"#).unwrap();
        assert_eq!(Product::try_from(&input).unwrap().sale_price, None);
    }

    #[test]
    fn test_product_conversion_reports_both_fields() {
        let input = ProductInput {
            price: f64::NAN,
            sale_price: Some(f64::NEG_INFINITY),
        };
        assert_eq!(Product::try_from(&input).unwrap_err().len(), 2);
    }
}
