//! # Next Tier Advisor
//!
//! Powers the "add 3 more to save 20%" nudge on product pages.
//!
//! Purely advisory. The price a buyer pays always comes from
//! [`crate::calculator::compute_price`], never from a suggestion.

use crate::types::{BulkTier, NextTierSuggestion};

/// Returns the lowest tier not yet reached and how many units are missing.
///
/// `None` when the set is empty or `quantity` already meets every threshold.
///
/// ## Example
/// ```rust
/// use bulkprice_core::advisor::next_tier;
/// use bulkprice_core::BulkTier;
/// use rust_decimal::Decimal;
///
/// let tiers = vec![
///     BulkTier::percentage(10, Decimal::from(10)),
///     BulkTier::percentage(50, Decimal::from(20)),
/// ];
///
/// let next = next_tier(&tiers, 49).unwrap();
/// assert_eq!(next.tier.min_quantity, 50);
/// assert_eq!(next.units_needed, 1);
///
/// assert!(next_tier(&tiers, 50).is_none());
/// ```
pub fn next_tier(tiers: &[BulkTier], quantity: i64) -> Option<NextTierSuggestion> {
    let mut ascending: Vec<&BulkTier> = tiers.iter().collect();
    ascending.sort_by_key(|tier| tier.min_quantity);

    ascending
        .into_iter()
        .find(|tier| tier.min_quantity > quantity)
        .map(|tier| NextTierSuggestion {
            tier: tier.clone(),
            units_needed: tier.min_quantity - quantity,
        })
}
