//! # Service Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BULKPRICE_CACHE_TTL_SECS=60                                        │
//! │     BULKPRICE_LOG=bulkprice_service=debug                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bulkprice/bulkprice.toml (Linux)                         │
//! │     ~/Library/Application Support/com.bulkprice.bulkprice/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 minute cache, 1024 entries, info logging                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bulkprice.toml
//! [cache]
//! enabled = true
//! ttl_secs = 300
//! max_entries = 1024
//!
//! [logging]
//! filter = "info,bulkprice_service=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "bulkprice.toml";

// =============================================================================
// Cache Settings
// =============================================================================

/// How long tier records stay cached, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Turn the tier cache off entirely; every quote then hits the store.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds before a cached tier record is refetched.
    /// Default: 300
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Upper bound on cached products. The oldest entry is evicted first.
    /// Default: 1024
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_true() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> usize {
    1024
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string. `RUST_LOG` wins when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Main Service Configuration
// =============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (bulkprice.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading service config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load service config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ServiceResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ServiceError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Service config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(ServiceError::InvalidConfig(
                "cache.ttl_secs must be greater than 0 (set cache.enabled = false instead)".into(),
            ));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ServiceError::InvalidConfig(
                "cache.max_entries must be greater than 0".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(enabled) = lookup("BULKPRICE_CACHE_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cache.enabled = true,
                "0" | "false" | "no" | "off" => self.cache.enabled = false,
                _ => warn!(value = %enabled, "Unknown BULKPRICE_CACHE_ENABLED value"),
            }
        }

        if let Some(ttl) = lookup("BULKPRICE_CACHE_TTL_SECS") {
            match ttl.parse::<u64>() {
                Ok(secs) => {
                    debug!(ttl_secs = secs, "Overriding cache TTL from environment");
                    self.cache.ttl_secs = secs;
                }
                Err(_) => warn!(value = %ttl, "Ignoring non-numeric BULKPRICE_CACHE_TTL_SECS"),
            }
        }

        if let Some(max) = lookup("BULKPRICE_CACHE_MAX_ENTRIES") {
            match max.parse::<usize>() {
                Ok(n) => self.cache.max_entries = n,
                Err(_) => warn!(value = %max, "Ignoring non-numeric BULKPRICE_CACHE_MAX_ENTRIES"),
            }
        }

        if let Some(filter) = lookup("BULKPRICE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bulkprice", "bulkprice")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
