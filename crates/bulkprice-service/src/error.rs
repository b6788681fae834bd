//! # Service Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Service Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Source        │  │     Engine              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  NotFound       │  │  Validation (batch)     │ │
//! │  │  Io / Toml*     │  │  Unavailable    │  │  Pricing                │ │
//! │  │                 │  │  Rejected       │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bulkprice_core::{PricingError, ValidationErrors};
use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure talking to the product/tier store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// No product with this id.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Store could not be reached or timed out.
    #[error("tier store unavailable: {0}")]
    Unavailable(String),

    /// Store answered with records that do not convert.
    #[error("malformed record for {product_id}: {errors}")]
    Malformed {
        product_id: String,
        errors: ValidationErrors,
    },

    /// Store refused the write.
    #[error("write rejected for {product_id}: {reason}")]
    Rejected { product_id: String, reason: String },
}

/// Service error type covering all possible service failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid service configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::ServiceConfig`].
    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    // =========================================================================
    // Source Errors
    // =========================================================================
    #[error(transparent)]
    Source(#[from] SourceError),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// Submitted tiers broke one or more rules.
    #[error("Tier validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Quantity or price outside the calculator's domain.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl ServiceError {
    /// True when the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_)
                | ServiceError::Pricing(_)
                | ServiceError::Source(SourceError::NotFound(_))
        )
    }
}
