//! End-to-end pricing scenarios, driven through the public API the way a
//! storefront would: wire JSON in, validated tier set, quote out.

use bulkprice_core::wire::{parse_tiers_json, ProductInput};
use bulkprice_core::{
    compute_price, next_tier, quote, resolve_tier, validate_tiers, BulkPricingMode, BulkTier,
    Money, Product, TierSet, ValidationError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const STANDARD_TIERS: &str = r#"[
    { "minQuantity": 50, "discountType": "percentage", "discountValue": 20 },
    { "minQuantity": 10, "discountType": "percentage", "discountValue": 10 }
]"#;

fn list_price() -> Money {
    Money::from_major(1000)
}

fn standard_set() -> TierSet {
    let tiers = parse_tiers_json(STANDARD_TIERS).unwrap();
    TierSet::new(tiers, list_price(), BulkPricingMode::Enabled).unwrap()
}

#[test]
fn scenario_a_list_price_with_tier() {
    let set = standard_set();
    let result = compute_price(list_price(), None, set.as_slice(), 25).unwrap();

    assert_eq!(result.applied_tier.unwrap().min_quantity, 10);
    assert_eq!(result.unit_price, Money::from_major(900));
    assert_eq!(result.total_price, Money::from_major(22500));
}

#[test]
fn scenario_b_sale_price_then_tier() {
    let input: ProductInput = serde_json::from_str(r#"{ "price": 1000, "salePrice": 800 }"#).unwrap();
    let product = Product::try_from(&input).unwrap();
    let set = standard_set();

    let quote = quote(&product, set.as_slice(), 25).unwrap();
    assert_eq!(quote.pricing.unit_price, Money::from_major(720));
    assert_eq!(quote.pricing.savings_percentage, dec!(28));

    let shown = quote.pricing.rounded();
    assert_eq!(shown.unit_price.to_string(), "720.00");
    assert_eq!(shown.total_price.to_string(), "18000.00");
    assert_eq!(shown.savings_percentage, dec!(28.00));
}

#[test]
fn scenario_c_below_lowest_tier() {
    let set = standard_set();

    let plain = compute_price(list_price(), None, set.as_slice(), 5).unwrap();
    assert!(plain.applied_tier.is_none());
    assert_eq!(plain.unit_price, list_price());

    let on_sale = compute_price(list_price(), Some(Money::from_major(800)), set.as_slice(), 5).unwrap();
    assert!(on_sale.applied_tier.is_none());
    assert_eq!(on_sale.unit_price, Money::from_major(800));
}

#[test]
fn scenario_d_next_tier_one_unit_away() {
    let set = standard_set();
    let next = set.next_tier(49).unwrap();

    assert_eq!(next.tier.min_quantity, 50);
    assert_eq!(next.units_needed, 1);
    assert_eq!(next_tier(set.as_slice(), 49), Some(next));
}

#[test]
fn scenario_e_duplicate_thresholds_rejected() {
    let tiers = parse_tiers_json(
        r#"[
            { "minQuantity": 10, "discountType": "percentage", "discountValue": 10 },
            { "minQuantity": 10, "discountType": "fixed", "discountValue": 50 }
        ]"#,
    )
    .unwrap();

    let errors = validate_tiers(&tiers, list_price(), BulkPricingMode::Enabled).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::DuplicateMinQuantity { min_quantity: 10, .. })));
}

#[test]
fn validator_reports_independent_violations_together() {
    let tiers = vec![
        BulkTier::percentage(10, dec!(10)),
        BulkTier::percentage(10, dec!(150)),
    ];
    let errors = validate_tiers(&tiers, list_price(), BulkPricingMode::Enabled).unwrap_err();

    let messages = errors.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().any(|m| m.contains("minimum quantity 10")));
    assert!(messages.iter().any(|m| m.contains("below 100")));
}

#[test]
fn disabled_bulk_pricing_behaves_as_no_tier() {
    let set = TierSet::new(Vec::new(), list_price(), BulkPricingMode::Disabled).unwrap();
    let result = compute_price(list_price(), None, set.as_slice(), 500).unwrap();

    assert!(result.applied_tier.is_none());
    assert_eq!(result.total_price, Money::from_major(500_000));
    assert!(set.next_tier(1).is_none());
}

#[test]
fn resolver_and_price_are_monotonic_across_boundaries() {
    let set = standard_set();
    let sale = Some(Money::from_major(800));

    let mut last_threshold = None;
    let mut last_unit = None;
    for quantity in 1..=120 {
        let threshold = resolve_tier(set.as_slice(), quantity).map(|t| t.min_quantity);
        assert!(threshold >= last_threshold);
        last_threshold = threshold;

        let unit = compute_price(list_price(), sale, set.as_slice(), quantity)
            .unwrap()
            .unit_price;
        assert!(unit >= Money::zero());
        assert!(unit <= list_price());
        if let Some(last) = last_unit {
            assert!(unit <= last);
        }
        last_unit = Some(unit);
    }
}

#[test]
fn quote_serializes_for_the_frontend() {
    let product = Product::new(list_price());
    let set = standard_set();
    let quote = quote(&product, set.as_slice(), 10).unwrap();

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["pricing"]["appliedTier"]["minQuantity"], 10);
    assert_eq!(json["nextTier"]["unitsNeeded"], 40);
    assert!(json["pricing"].get("anomaly").is_none());
    assert_eq!(
        json["pricing"]["savingsPercentage"]
            .as_str()
            .map(|s| s.parse::<Decimal>().unwrap()),
        Some(dec!(10))
    );
}
