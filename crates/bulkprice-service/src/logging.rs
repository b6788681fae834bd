//! Tracing subscriber setup for processes embedding the service.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{ServiceError, ServiceResult};

/// Parses the configured directive string.
pub fn configured_filter(config: &LoggingConfig) -> ServiceResult<EnvFilter> {
    EnvFilter::try_new(&config.filter).map_err(|e| {
        ServiceError::InvalidConfig(format!(
            "invalid logging filter '{}': {}",
            config.filter, e
        ))
    })
}

/// Builds the event filter. `RUST_LOG` wins over the configured directive.
pub fn build_filter(config: &LoggingConfig) -> ServiceResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => configured_filter(config),
    }
}

/// Initializes the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, so
/// calling this more than once is harmless.
pub fn init_tracing(config: &LoggingConfig) -> ServiceResult<bool> {
    let filter = build_filter(config)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    Ok(installed)
}
