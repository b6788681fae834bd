//! # Domain Types
//!
//! Core domain types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    BulkTier     │   │    TierSet      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  base_price     │   │  min_quantity   │   │  validated      │       │
//! │  │  sale_price?    │   │  discount_type  │   │  sorted asc     │       │
//! │  └─────────────────┘   │  discount_value │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │  PricingResult  │   │ NextTierSuggestion  │   │     Quote       │   │
//! │  │  (exact)        │   │  tier               │   │  pricing        │   │
//! │  │  PriceBreakdown │   │  units_needed       │   │  next_tier?     │   │
//! │  │  (rounded)      │   └─────────────────────┘   └─────────────────┘   │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inputs are read-only to the engine and outputs are recomputed on every
//! call; nothing here is cached or mutated in place.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingAnomaly, ValidationErrors};
use crate::money::{Money, DISPLAY_SCALE};

// =============================================================================
// Discount Type
// =============================================================================

/// How a tier's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percent off the effective price, in `(0, 100)`.
    Percentage,
    /// Amount off each unit, below the effective price.
    Fixed,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

// =============================================================================
// Bulk Tier
// =============================================================================

/// A quantity threshold paired with a discount rule.
///
/// Buying `min_quantity` units or more unlocks the discount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BulkTier {
    pub min_quantity: i64,
    pub discount_type: DiscountType,
    #[ts(as = "String")]
    pub discount_value: Decimal,
}

impl BulkTier {
    /// A percent-off tier.
    pub fn percentage(min_quantity: i64, percent: Decimal) -> Self {
        BulkTier {
            min_quantity,
            discount_type: DiscountType::Percentage,
            discount_value: percent,
        }
    }

    /// An amount-off-per-unit tier.
    pub fn fixed(min_quantity: i64, amount: Money) -> Self {
        BulkTier {
            min_quantity,
            discount_type: DiscountType::Fixed,
            discount_value: amount.amount(),
        }
    }

    /// Per-unit discount this tier grants on `effective_price`, unclamped.
    ///
    /// `None` when a percentage of a huge price leaves the `Decimal` range.
    pub fn discount_on(&self, effective_price: Money) -> Option<Money> {
        match self.discount_type {
            DiscountType::Percentage => effective_price.checked_percent(self.discount_value),
            DiscountType::Fixed => Some(Money::new(self.discount_value)),
        }
    }
}

// =============================================================================
// Bulk Pricing Mode
// =============================================================================

/// Whether the seller has switched bulk pricing on for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BulkPricingMode {
    /// Tiers must be present.
    #[default]
    Enabled,
    /// An empty tier list is fine; pricing behaves as "no tier applies".
    Disabled,
}

impl BulkPricingMode {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            BulkPricingMode::Enabled
        } else {
            BulkPricingMode::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, BulkPricingMode::Enabled)
    }
}

// =============================================================================
// Tier Set
// =============================================================================

/// A tier list that passed validation, sorted ascending by `min_quantity`.
///
/// The only way to build one is [`TierSet::new`] (or [`TierSet::empty`]),
/// so holding a `TierSet` means the invariants hold for the price it was
/// validated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierSet {
    tiers: Vec<BulkTier>,
}

impl TierSet {
    /// Validates `tiers` against `reference_price` and sorts them.
    ///
    /// `reference_price` is the price fixed discounts must stay below;
    /// pass the product's effective price to rule out clamping entirely.
    pub fn new(
        mut tiers: Vec<BulkTier>,
        reference_price: Money,
        mode: BulkPricingMode,
    ) -> Result<Self, ValidationErrors> {
        crate::validation::validate_tiers(&tiers, reference_price, mode)?;
        tiers.sort_by_key(|tier| tier.min_quantity);
        Ok(TierSet { tiers })
    }

    /// No tiers: every quantity prices at the effective price.
    pub fn empty() -> Self {
        TierSet::default()
    }

    pub fn as_slice(&self) -> &[BulkTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// See [`crate::resolver::resolve_tier`].
    pub fn resolve(&self, quantity: i64) -> Option<&BulkTier> {
        crate::resolver::resolve_tier(&self.tiers, quantity)
    }

    /// See [`crate::advisor::next_tier`].
    pub fn next_tier(&self, quantity: i64) -> Option<NextTierSuggestion> {
        crate::advisor::next_tier(&self.tiers, quantity)
    }

    pub fn into_inner(self) -> Vec<BulkTier> {
        self.tiers
    }
}

impl AsRef<[BulkTier]> for TierSet {
    fn as_ref(&self) -> &[BulkTier] {
        &self.tiers
    }
}

// =============================================================================
// Product
// =============================================================================

/// The pricing-relevant slice of a storefront product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// List price.
    pub base_price: Money,

    /// Promotional price; only honored while it is below `base_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sale_price: Option<Money>,
}

impl Product {
    pub fn new(base_price: Money) -> Self {
        Product {
            base_price,
            sale_price: None,
        }
    }

    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// The sale price, if it is positive and below the list price.
    pub fn active_sale_price(&self) -> Option<Money> {
        self.sale_price
            .filter(|sale| sale.is_positive() && *sale < self.base_price)
    }

    /// The price bulk discounts are computed against.
    ///
    /// ## Example
    /// ```rust
    /// use bulkprice_core::{Money, Product};
    ///
    /// let product = Product::new(Money::from_major(1000))
    ///     .with_sale_price(Money::from_major(800));
    /// assert_eq!(product.effective_price(), Money::from_major(800));
    ///
    /// // A "sale" above list price is ignored
    /// let product = Product::new(Money::from_major(1000))
    ///     .with_sale_price(Money::from_major(1200));
    /// assert_eq!(product.effective_price(), Money::from_major(1000));
    /// ```
    pub fn effective_price(&self) -> Money {
        self.active_sale_price().unwrap_or(self.base_price)
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Exact output of the price calculator.
///
/// Values are at full precision. Call [`PricingResult::rounded`] for the
/// figures shown to a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Price bulk discounts were applied on top of.
    pub effective_price: Money,
    pub unit_price: Money,
    pub total_price: Money,
    pub applied_tier: Option<BulkTier>,
    /// Bulk discount across the whole quantity (sale savings not included).
    pub discount_amount: Money,
    /// Sale + bulk savings relative to the base price, in percent.
    #[ts(as = "String")]
    pub savings_percentage: Decimal,
    #[serde(skip)]
    #[ts(skip)]
    pub anomaly: Option<PricingAnomaly>,
}

impl PricingResult {
    /// Rounds every figure to two places for display.
    pub fn rounded(&self) -> PriceBreakdown {
        PriceBreakdown {
            effective_price: self.effective_price.round_for_display(),
            unit_price: self.unit_price.round_for_display(),
            total_price: self.total_price.round_for_display(),
            applied_tier: self.applied_tier.clone(),
            discount_amount: self.discount_amount.round_for_display(),
            savings_percentage: self
                .savings_percentage
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// True when a tier discount was applied.
    pub fn has_bulk_discount(&self) -> bool {
        self.applied_tier.is_some()
    }
}

/// Display-ready copy of a [`PricingResult`], rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub effective_price: Money,
    pub unit_price: Money,
    pub total_price: Money,
    pub applied_tier: Option<BulkTier>,
    pub discount_amount: Money,
    #[ts(as = "String")]
    pub savings_percentage: Decimal,
}

// =============================================================================
// Next Tier Suggestion
// =============================================================================

/// "Add `units_needed` more to unlock `tier`."
///
/// Advisory only; never consulted for the actual price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NextTierSuggestion {
    pub tier: BulkTier,
    pub units_needed: i64,
}

// =============================================================================
// Quote
// =============================================================================

/// Everything a product page renders for one quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quantity: i64,
    pub pricing: PricingResult,
    pub next_tier: Option<NextTierSuggestion>,
}

// =============================================================================
// Unit Tests
// =============================================================================
