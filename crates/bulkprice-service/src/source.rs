//! # Product and Tier Store Seams
//!
//! The service never talks to a database or HTTP API directly. Adapters
//! implement [`TierSource`] for reads and [`TierSink`] for seller writes.
//! Products cross as their wire shape; tier tables cross as exact
//! [`BulkTier`]s so a stored table reads back exactly as it was validated.
//!
//! ```text
//! ┌────────────────┐  ProductInput   ┌──────────────────┐
//! │  Product API   │ ──────────────► │                  │
//! │  / database    │  TierRecord     │  PricingService  │
//! │                │ ◄─────────────► │                  │
//! └────────────────┘                 └──────────────────┘
//! ```

use async_trait::async_trait;
use bulkprice_core::wire::ProductInput;
use bulkprice_core::{BulkPricingMode, BulkTier, TierSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::error::SourceError;

// =============================================================================
// Tier Record
// =============================================================================

/// A product's tier table as stored, before any validation.
///
/// Discount values serialize as decimal strings, never floats:
/// ```json
/// {
///   "bulkPricingEnabled": true,
///   "tiers": [{ "minQuantity": 10, "discountType": "percentage", "discountValue": "10" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRecord {
    #[serde(default)]
    pub bulk_pricing_enabled: bool,

    #[serde(default)]
    pub tiers: Vec<BulkTier>,
}

impl TierRecord {
    pub fn mode(&self) -> BulkPricingMode {
        BulkPricingMode::from_enabled(self.bulk_pricing_enabled)
    }

    /// True when there is nothing to price with.
    pub fn is_inactive(&self) -> bool {
        !self.bulk_pricing_enabled || self.tiers.is_empty()
    }

    /// Builds the stored form of an already validated set.
    pub fn from_tier_set(set: &TierSet, mode: BulkPricingMode) -> Self {
        TierRecord {
            bulk_pricing_enabled: mode.is_enabled(),
            tiers: set.as_slice().to_vec(),
        }
    }
}

// =============================================================================
// Store Traits
// =============================================================================

/// Read side of the product store.
#[async_trait]
pub trait TierSource: Send + Sync {
    /// Fetches a product's price fields.
    async fn fetch_product(&self, product_id: &str) -> Result<ProductInput, SourceError>;

    /// Fetches a product's tier table.
    ///
    /// A product with no table is `Ok(TierRecord::default())`, not an error.
    async fn fetch_tiers(&self, product_id: &str) -> Result<TierRecord, SourceError>;
}

/// Write side of the product store.
#[async_trait]
pub trait TierSink: Send + Sync {
    /// Replaces a product's tier table.
    async fn store_tiers(&self, product_id: &str, record: TierRecord) -> Result<(), SourceError>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Process-local store, for development and tests.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<String, ProductInput>>,
    tiers: RwLock<HashMap<String, TierRecord>>,
    tier_fetches: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_product(&self, product_id: impl Into<String>, product: ProductInput) {
        self.products.write().await.insert(product_id.into(), product);
    }

    pub async fn put_tiers(&self, product_id: impl Into<String>, record: TierRecord) {
        self.tiers.write().await.insert(product_id.into(), record);
    }

    pub async fn tiers_for(&self, product_id: &str) -> Option<TierRecord> {
        self.tiers.read().await.get(product_id).cloned()
    }

    /// How many times tiers were read from this store.
    pub fn tier_fetches(&self) -> usize {
        self.tier_fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TierSource for MemoryCatalog {
    async fn fetch_product(&self, product_id: &str) -> Result<ProductInput, SourceError> {
        self.products
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(product_id.to_string()))
    }

    async fn fetch_tiers(&self, product_id: &str) -> Result<TierRecord, SourceError> {
        self.tier_fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.tiers_for(product_id).await.unwrap_or_default())
    }
}

#[async_trait]
impl TierSink for MemoryCatalog {
    async fn store_tiers(&self, product_id: &str, record: TierRecord) -> Result<(), SourceError> {
        if !self.products.read().await.contains_key(product_id) {
            return Err(SourceError::NotFound(product_id.to_string()));
        }
        self.put_tiers(product_id, record).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulkprice_core::{BulkTier, Money};
    use rust_decimal_macros::dec;

    fn product(price: f64) -> ProductInput {
        ProductInput {
            price,
            sale_price: None,
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let record: TierRecord = serde_json::from_str(
            r#"{
                "bulkPricingEnabled": true,
                "tiers": [{ "minQuantity": 10, "discountType": "percentage", "discountValue": 10 }]
            }"#,
        )
        .unwrap();

        assert_eq!(record.mode(), BulkPricingMode::Enabled);
        assert_eq!(record.tiers.len(), 1);
        assert!(!record.is_inactive());

        let empty: TierRecord = serde_json::from_str("{}").unwrap();
        assert!(empty.is_inactive());
    }

    #[test]
    fn test_record_from_tier_set() {
        let set = TierSet::new(
            vec![BulkTier::percentage(10, dec!(10))],
            Money::from_major(100),
            BulkPricingMode::Enabled,
        )
        .unwrap();

        let record = TierRecord::from_tier_set(&set, BulkPricingMode::Enabled);
        assert!(record.bulk_pricing_enabled);
        assert_eq!(record.tiers, set.as_slice());
    }

    #[test]
    fn test_record_keeps_exact_discounts_through_json() {
        let record = TierRecord {
            bulk_pricing_enabled: true,
            tiers: vec![BulkTier::fixed(2, Money::new(dec!(999.99999999999999999)))],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tiers"][0]["discountValue"], "999.99999999999999999");

        let back: TierRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[tokio::test]
    async fn test_memory_catalog_reads() {
        let catalog = MemoryCatalog::new();
        catalog.put_product("sku-1", product(1000.0)).await;

        assert_eq!(catalog.fetch_product("sku-1").await.unwrap().price, 1000.0);
        assert_eq!(
            catalog.fetch_product("sku-2").await,
            Err(SourceError::NotFound("sku-2".to_string()))
        );

        assert_eq!(catalog.fetch_tiers("sku-1").await.unwrap(), TierRecord::default());
        assert_eq!(catalog.tier_fetches(), 1);
    }

    #[tokio::test]
    async fn test_memory_catalog_rejects_unknown_product_write() {
        let catalog = MemoryCatalog::new();
        let result = catalog.store_tiers("ghost", TierRecord::default()).await;
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }
}
