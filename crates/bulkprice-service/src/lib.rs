//! # bulkprice-service: Boundary Layer
//!
//! Fetching, caching and persisting tier tables around the pure
//! `bulkprice-core` engine, plus the process-level config and logging
//! setup a storefront backend needs.
//!
//! ## Modules
//!
//! - [`source`] - `TierSource` / `TierSink` store seams, in-memory catalog
//! - [`cache`] - Bounded TTL cache for tier records
//! - [`service`] - `PricingService`: quote and tier submission
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Service error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bulkprice_core::wire::ProductInput;
//! use bulkprice_core::{BulkPricingMode, BulkTier, Money};
//! use bulkprice_service::{MemoryCatalog, PricingService, ServiceConfig};
//! use rust_decimal::Decimal;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let catalog = Arc::new(MemoryCatalog::new());
//! catalog
//!     .put_product("sku-1", ProductInput { price: 1000.0, sale_price: None })
//!     .await;
//!
//! let service = PricingService::new(catalog, &ServiceConfig::default());
//! service
//!     .submit_tiers(
//!         "sku-1",
//!         vec![BulkTier::percentage(10, Decimal::from(10))],
//!         BulkPricingMode::Enabled,
//!     )
//!     .await
//!     .unwrap();
//!
//! let outcome = service.quote("sku-1", 12).await.unwrap();
//! assert_eq!(outcome.quote.pricing.unit_price, Money::from_major(900));
//! # });
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod source;

pub use cache::TtlCache;
pub use config::{CacheSettings, LoggingConfig, ServiceConfig};
pub use error::{ServiceError, ServiceResult, SourceError};
pub use logging::init_tracing;
pub use service::{PricingService, QuoteOutcome, TierLookup};
pub use source::{MemoryCatalog, TierRecord, TierSink, TierSource};
