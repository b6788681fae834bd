//! # Pricing Service
//!
//! Ties the store seams, the tier cache and the pure engine together.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          quote(product, qty)                            │
//! │                                                                         │
//! │  1. Reject qty < 1 before any I/O                                      │
//! │  2. Fetch product price fields (failure = error to caller)             │
//! │  3. Tier record: cache hit, or fetch and cache on success              │
//! │  4. Revalidate against the product's effective price                   │
//! │       ├─ ok ──────────────► TierLookup::Tiers                          │
//! │       ├─ disabled/empty ──► TierLookup::NoTiers                        │
//! │       ├─ invalid ─────────► TierLookup::Rejected   (warn!)             │
//! │       └─ fetch failed ────► TierLookup::Unavailable (warn!)            │
//! │  5. Price through bulkprice-core; only Tiers grants a bulk discount    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bulkprice_core::wire::{convert_tiers, TierInput};
use bulkprice_core::{
    BulkPricingMode, BulkTier, PricingError, Product, Quote, TierSet, ValidationErrors,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::config::ServiceConfig;
use crate::error::{ServiceResult, SourceError};
use crate::source::{TierRecord, TierSink, TierSource};

// =============================================================================
// Tier Lookup
// =============================================================================

/// What the service found when it went looking for a product's tiers.
///
/// Every state except `Tiers` prices without a bulk discount, but callers
/// can still tell "seller set no tiers" apart from "store was down".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierLookup {
    /// Valid tiers, ready to price with.
    Tiers(TierSet),

    /// Bulk pricing disabled or no tiers configured.
    NoTiers,

    /// Stored tiers broke the rules when revalidated.
    Rejected(ValidationErrors),

    /// The tier store could not be read.
    Unavailable(SourceError),
}

impl TierLookup {
    /// Tiers to price with; empty for every state but `Tiers`.
    pub fn tiers(&self) -> &[BulkTier] {
        match self {
            TierLookup::Tiers(set) => set.as_slice(),
            _ => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, TierLookup::Rejected(_) | TierLookup::Unavailable(_))
    }

    /// Short name for logs and metrics labels.
    pub fn label(&self) -> &'static str {
        match self {
            TierLookup::Tiers(_) => "tiers",
            TierLookup::NoTiers => "no_tiers",
            TierLookup::Rejected(_) => "rejected",
            TierLookup::Unavailable(_) => "unavailable",
        }
    }
}

/// A quote plus how its tiers were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub quote: Quote,
    pub lookup: TierLookup,
}

// =============================================================================
// Pricing Service
// =============================================================================

/// Prices products from a store, caching tier tables between quotes.
pub struct PricingService<S> {
    store: Arc<S>,
    cache: Option<TtlCache<String, TierRecord>>,
}

impl<S> PricingService<S> {
    /// Creates a service. A disabled cache means every quote reads the store.
    pub fn new(store: Arc<S>, config: &ServiceConfig) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| TtlCache::new(config.cache.ttl(), config.cache.max_entries));

        PricingService { store, cache }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Drops a product's cached tiers so the next quote refetches them.
    pub async fn invalidate(&self, product_id: &str) {
        if let Some(cache) = &self.cache {
            if cache.invalidate(&product_id.to_string()).await {
                debug!(product_id, "Tier cache entry invalidated");
            }
        }
    }

    /// Drops expired cache entries. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.purge_expired().await,
            None => 0,
        }
    }
}

impl<S: TierSource> PricingService<S> {
    /// Prices `quantity` units of a product.
    pub async fn quote(&self, product_id: &str, quantity: i64) -> ServiceResult<QuoteOutcome> {
        if quantity < 1 {
            return Err(PricingError::InvalidQuantity { quantity }.into());
        }

        let product = self.load_product(product_id).await?;
        let lookup = self.lookup_tiers(product_id, &product).await;
        let quote = bulkprice_core::quote(&product, lookup.tiers(), quantity)?;

        debug!(
            product_id,
            quantity,
            lookup = lookup.label(),
            applied_tier = ?quote.pricing.applied_tier.as_ref().map(|t| t.min_quantity),
            unit_price = %quote.pricing.unit_price,
            "Quote computed"
        );

        Ok(QuoteOutcome { quote, lookup })
    }

    /// Resolves a product's tiers into one of the [`TierLookup`] states.
    pub async fn lookup_tiers(&self, product_id: &str, product: &Product) -> TierLookup {
        let record = match self.tier_record(product_id).await {
            Ok(record) => record,
            Err(error) => {
                warn!(product_id, %error, "Tier fetch failed, pricing without bulk discount");
                return TierLookup::Unavailable(error);
            }
        };

        if record.is_inactive() {
            debug!(product_id, "No active tiers");
            return TierLookup::NoTiers;
        }

        let mode = record.mode();
        match TierSet::new(record.tiers, product.effective_price(), mode) {
            Ok(set) => TierLookup::Tiers(set),
            Err(errors) => {
                warn!(
                    product_id,
                    violations = errors.len(),
                    %errors,
                    "Stored tiers failed revalidation, pricing without bulk discount"
                );
                TierLookup::Rejected(errors)
            }
        }
    }

    async fn load_product(&self, product_id: &str) -> ServiceResult<Product> {
        let input = self.store.fetch_product(product_id).await?;
        let product = Product::try_from(&input).map_err(|errors| SourceError::Malformed {
            product_id: product_id.to_string(),
            errors,
        })?;
        Ok(product)
    }

    async fn tier_record(&self, product_id: &str) -> Result<TierRecord, SourceError> {
        let Some(cache) = &self.cache else {
            return self.store.fetch_tiers(product_id).await;
        };

        let key = product_id.to_string();
        if let Some(record) = cache.get(&key).await {
            debug!(product_id, "Tier cache hit");
            return Ok(record);
        }

        let record = self.store.fetch_tiers(product_id).await?;
        cache.insert(key, record.clone()).await;
        Ok(record)
    }
}

impl<S: TierSource + TierSink> PricingService<S> {
    /// Validates and stores a seller's tier table.
    ///
    /// Fixed discounts are checked against the product's effective price,
    /// so an active sale tightens the bound. Nothing is written unless the
    /// whole table passes.
    pub async fn submit_tiers(
        &self,
        product_id: &str,
        tiers: Vec<BulkTier>,
        mode: BulkPricingMode,
    ) -> ServiceResult<TierSet> {
        let product = self.load_product(product_id).await?;

        let set = TierSet::new(tiers, product.effective_price(), mode).map_err(|errors| {
            info!(product_id, violations = errors.len(), "Tier submission rejected");
            errors
        })?;

        self.store
            .store_tiers(product_id, TierRecord::from_tier_set(&set, mode))
            .await?;
        self.invalidate(product_id).await;

        info!(product_id, tiers = set.len(), ?mode, "Tier table saved");
        Ok(set)
    }

    /// Same as [`Self::submit_tiers`] for tiers in their wire shape.
    pub async fn submit_tier_inputs(
        &self,
        product_id: &str,
        inputs: &[TierInput],
        mode: BulkPricingMode,
    ) -> ServiceResult<TierSet> {
        let tiers = convert_tiers(inputs)?;
        self.submit_tiers(product_id, tiers, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::source::MemoryCatalog;
    use bulkprice_core::wire::ProductInput;
    use bulkprice_core::Money;
    use rust_decimal_macros::dec;

    async fn catalog_with(record: TierRecord) -> Arc<MemoryCatalog> {
        let catalog = Arc::new(MemoryCatalog::new());
        catalog
            .put_product(
                "sku-1",
                ProductInput {
                    price: 1000.0,
                    sale_price: None,
                },
            )
            .await;
        catalog.put_tiers("sku-1", record).await;
        catalog
    }

    fn enabled(tiers: Vec<BulkTier>) -> TierRecord {
        TierRecord {
            bulk_pricing_enabled: true,
            tiers,
        }
    }

    #[tokio::test]
    async fn test_quote_with_tiers() {
        let catalog = catalog_with(enabled(vec![BulkTier::percentage(10, dec!(10))])).await;
        let service = PricingService::new(catalog, &ServiceConfig::default());

        let outcome = service.quote("sku-1", 25).await.unwrap();
        assert_eq!(outcome.lookup.label(), "tiers");
        assert_eq!(outcome.quote.pricing.unit_price, Money::from_major(900));
    }

    #[tokio::test]
    async fn test_disabled_record_is_no_tiers() {
        let record = TierRecord {
            bulk_pricing_enabled: false,
            tiers: vec![BulkTier::percentage(10, dec!(10))],
        };
        let service = PricingService::new(catalog_with(record).await, &ServiceConfig::default());

        let outcome = service.quote("sku-1", 25).await.unwrap();
        assert_eq!(outcome.lookup, TierLookup::NoTiers);
        assert_eq!(outcome.quote.pricing.unit_price, Money::from_major(1000));
    }

    #[tokio::test]
    async fn test_invalid_stored_tiers_are_rejected_not_applied() {
        let record = enabled(vec![
            BulkTier::percentage(1, dec!(10)),
            BulkTier::fixed(20, Money::from_major(5000)),
        ]);
        let service = PricingService::new(catalog_with(record).await, &ServiceConfig::default());

        let outcome = service.quote("sku-1", 25).await.unwrap();
        match &outcome.lookup {
            TierLookup::Rejected(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(outcome.lookup.is_degraded());
        assert!(outcome.quote.pricing.applied_tier.is_none());
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected_before_fetch() {
        let catalog = catalog_with(TierRecord::default()).await;
        let service = PricingService::new(catalog.clone(), &ServiceConfig::default());

        let err = service.quote("sku-1", 0).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Pricing(PricingError::InvalidQuantity { quantity: 0 })
        ));
        assert_eq!(catalog.tier_fetches(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let service = PricingService::new(Arc::new(MemoryCatalog::new()), &ServiceConfig::default());
        let err = service.quote("nope", 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Source(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_quotes() {
        let catalog = catalog_with(enabled(vec![BulkTier::percentage(10, dec!(10))])).await;
        let service = PricingService::new(catalog.clone(), &ServiceConfig::default());

        service.quote("sku-1", 10).await.unwrap();
        service.quote("sku-1", 20).await.unwrap();
        assert_eq!(catalog.tier_fetches(), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let catalog = catalog_with(TierRecord::default()).await;
        let mut config = ServiceConfig::default();
        config.cache.enabled = false;
        let service = PricingService::new(catalog.clone(), &config);

        service.quote("sku-1", 1).await.unwrap();
        service.quote("sku-1", 1).await.unwrap();
        assert_eq!(catalog.tier_fetches(), 2);
        assert_eq!(service.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_submit_validates_and_invalidates_cache() {
        let catalog = catalog_with(TierRecord::default()).await;
        let service = PricingService::new(catalog.clone(), &ServiceConfig::default());

        // Prime the cache with the empty table
        assert_eq!(service.quote("sku-1", 25).await.unwrap().lookup, TierLookup::NoTiers);

        let set = service
            .submit_tiers(
                "sku-1",
                vec![BulkTier::percentage(50, dec!(20)), BulkTier::percentage(10, dec!(10))],
                BulkPricingMode::Enabled,
            )
            .await
            .unwrap();
        assert_eq!(set.as_slice()[0].min_quantity, 10);

        let outcome = service.quote("sku-1", 25).await.unwrap();
        assert_eq!(outcome.lookup.label(), "tiers");
        assert_eq!(outcome.quote.pricing.unit_price, Money::from_major(900));
    }

    #[tokio::test]
    async fn test_submitted_fixed_tier_reads_back_exactly() {
        let catalog = catalog_with(TierRecord::default()).await;
        let service = PricingService::new(catalog.clone(), &ServiceConfig::default());

        let discount = Money::new(dec!(999.99999999999999999));
        service
            .submit_tiers("sku-1", vec![BulkTier::fixed(2, discount)], BulkPricingMode::Enabled)
            .await
            .unwrap();

        let stored = catalog.tiers_for("sku-1").await.unwrap();
        assert_eq!(stored.tiers[0].discount_value, discount.amount());

        let outcome = service.quote("sku-1", 2).await.unwrap();
        assert_eq!(outcome.lookup.label(), "tiers");
        assert_eq!(outcome.quote.pricing.unit_price, Money::new(dec!(0.00000000000000001)));
    }

    #[tokio::test]
    async fn test_overflowing_quantity_is_a_pricing_error() {
        let catalog = Arc::new(MemoryCatalog::new());
        catalog
            .put_product(
                "sku-big",
                ProductInput {
                    price: 1e20,
                    sale_price: None,
                },
            )
            .await;
        let service = PricingService::new(catalog, &ServiceConfig::default());

        let err = service.quote("sku-big", i64::MAX).await.unwrap_err();
        assert!(matches!(err, ServiceError::Pricing(PricingError::Overflow { .. })));
    }

    #[tokio::test]
    async fn test_submit_rejects_without_writing() {
        let catalog = catalog_with(TierRecord::default()).await;
        let service = PricingService::new(catalog.clone(), &ServiceConfig::default());

        let err = service
            .submit_tiers("sku-1", Vec::new(), BulkPricingMode::Enabled)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(catalog.tiers_for("sku-1").await, Some(TierRecord::default()));
    }
}
