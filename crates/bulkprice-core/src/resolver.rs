//! # Tier Resolver
//!
//! Picks the one tier that applies to a quantity.
//!
//! ```text
//! tiers:     10+ (10%)        50+ (20%)
//!            │                │
//! qty  1 ────┼────────────────┼──────────► none
//! qty 25 ────●────────────────┼──────────► 10+
//! qty 50 ─────────────────────●──────────► 50+
//! qty 99 ─────────────────────●──────────► 50+
//! ```
//!
//! The answer is the qualifying tier with the largest threshold. Input
//! order does not matter; callers never need to pre-sort.

use crate::types::BulkTier;

/// Returns the tier with the largest `min_quantity` that is `<= quantity`.
///
/// `None` when the set is empty or `quantity` is below every threshold.
///
/// ## Example
/// ```rust
/// use bulkprice_core::resolver::resolve_tier;
/// use bulkprice_core::BulkTier;
/// use rust_decimal::Decimal;
///
/// let tiers = vec![
///     BulkTier::percentage(50, Decimal::from(20)),
///     BulkTier::percentage(10, Decimal::from(10)),
/// ];
///
/// assert_eq!(resolve_tier(&tiers, 25).map(|t| t.min_quantity), Some(10));
/// assert_eq!(resolve_tier(&tiers, 50).map(|t| t.min_quantity), Some(50));
/// assert!(resolve_tier(&tiers, 9).is_none());
/// ```
pub fn resolve_tier(tiers: &[BulkTier], quantity: i64) -> Option<&BulkTier> {
    tiers
        .iter()
        .filter(|tier| tier.min_quantity <= quantity)
        .max_by_key(|tier| tier.min_quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tiers() -> Vec<BulkTier> {
        vec![
            BulkTier::percentage(10, dec!(10)),
            BulkTier::percentage(50, dec!(20)),
            BulkTier::percentage(100, dec!(30)),
        ]
    }

    fn resolved_min(tiers: &[BulkTier], quantity: i64) -> Option<i64> {
        resolve_tier(tiers, quantity).map(|tier| tier.min_quantity)
    }

    #[test]
    fn test_boundaries() {
        let tiers = tiers();
        assert_eq!(resolved_min(&tiers, 9), None);
        assert_eq!(resolved_min(&tiers, 10), Some(10));
        assert_eq!(resolved_min(&tiers, 49), Some(10));
        assert_eq!(resolved_min(&tiers, 50), Some(50));
        assert_eq!(resolved_min(&tiers, 100), Some(100));
        assert_eq!(resolved_min(&tiers, 10_000), Some(100));
    }

    #[test]
    fn test_empty_set_resolves_nothing() {
        assert_eq!(resolved_min(&[], 1_000), None);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let ascending = tiers();
        let mut descending = tiers();
        descending.reverse();
        let shuffled = vec![ascending[1].clone(), ascending[2].clone(), ascending[0].clone()];

        for quantity in 0..150 {
            let expected = resolved_min(&ascending, quantity);
            assert_eq!(resolved_min(&descending, quantity), expected);
            assert_eq!(resolved_min(&shuffled, quantity), expected);
        }
    }

    #[test]
    fn test_resolved_threshold_is_monotonic() {
        let tiers = tiers();
        let mut previous = None;
        for quantity in 1..200 {
            let current = resolved_min(&tiers, quantity);
            assert!(current >= previous, "quantity {quantity} went backwards");
            previous = current;
        }
    }
}
