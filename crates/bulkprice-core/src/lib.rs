//! # bulkprice-core: Quantity-Tiered Pricing Engine
//!
//! This crate is the **heart** of storefront bulk pricing. It contains the
//! tier rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌────────────────────────────┐      ┌───────────────────────────────┐ │
//! │  │  Seller dashboard          │      │  Product page / cart          │ │
//! │  │  edits tier table          │      │  changes quantity             │ │
//! │  └─────────────┬──────────────┘      └───────────────┬───────────────┘ │
//! │                │                                     │                  │
//! │  ┌─────────────▼─────────────────────────────────────▼───────────────┐ │
//! │  │               bulkprice-service (fetch, cache, config)            │ │
//! │  └─────────────┬─────────────────────────────────────┬───────────────┘ │
//! │                │                                     │                  │
//! │  ┌─────────────▼─────────────────────────────────────▼───────────────┐ │
//! │  │               ★ bulkprice-core (THIS CRATE) ★                     │ │
//! │  │                                                                   │ │
//! │  │  ┌────────────┐ ┌────────────┐ ┌─────────────┐ ┌──────────────┐  │ │
//! │  │  │ validation │ │  resolver  │ │ calculator  │ │   advisor    │  │ │
//! │  │  │ tiers ok?  │ │ which tier │ │ unit/total  │ │ next tier?   │  │ │
//! │  │  └────────────┘ └─────┬──────┘ └──────▲──────┘ └──────────────┘  │ │
//! │  │                       └───────────────┘                           │ │
//! │  │                                                                   │ │
//! │  │   NO I/O • NO STATE • PURE FUNCTIONS                              │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BulkTier, TierSet, Product, PricingResult)
//! - [`money`] - Exact decimal money, rounded only for display
//! - [`validation`] - Tier and product rules, violations collected in one batch
//! - [`resolver`] - Picks the applicable tier for a quantity
//! - [`calculator`] - Sale-then-bulk price computation
//! - [`advisor`] - Next unlockable tier
//! - [`wire`] - Storefront API record shapes
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe from any thread
//! 2. **No I/O**: fetching and persisting tiers happen in the service layer
//! 3. **Exact Money**: full precision throughout, 2 places only at display
//! 4. **Explicit Errors**: typed errors, never panics on a buyer-facing path
//!
//! ## Example Usage
//!
//! ```rust
//! use bulkprice_core::{quote, BulkTier, Money, Product};
//! use rust_decimal::Decimal;
//!
//! let product = Product::new(Money::from_major(1000)).with_sale_price(Money::from_major(800));
//! let tiers = vec![
//!     BulkTier::percentage(10, Decimal::from(10)),
//!     BulkTier::percentage(50, Decimal::from(20)),
//! ];
//!
//! let quote = quote(&product, &tiers, 25).unwrap();
//!
//! // 10% off the 800 sale price, not off the 1000 list price
//! assert_eq!(quote.pricing.unit_price, Money::from_major(720));
//! assert_eq!(quote.pricing.savings_percentage, Decimal::from(28));
//! assert_eq!(quote.next_tier.unwrap().units_needed, 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod advisor;
pub mod calculator;
pub mod error;
pub mod money;
pub mod resolver;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use advisor::next_tier;
pub use calculator::{compute_price, quote};
pub use error::{CoreResult, PricingAnomaly, PricingError, ValidationError, ValidationErrors};
pub use money::Money;
pub use resolver::resolve_tier;
pub use types::*;
pub use validation::{validate_product, validate_tiers};
