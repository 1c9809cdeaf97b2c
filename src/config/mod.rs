//! Configuration management for the tianxing sensors
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default provider host
pub const DEFAULT_BASE_URL: &str = "https://apis.tianapi.com";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider (Tian API) configuration
    pub provider: ProviderConfig,

    /// Shared content cache configuration
    pub cache: CacheConfig,

    /// Sensor polling configuration
    pub poll: PollConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Provider-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key issued by the provider
    pub api_key: String,

    /// Base URL of the provider host
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window for cache entries in seconds
    pub ttl_secs: u64,
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Interval between sensor update cycles in hours
    pub interval_hours: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TIANXING_API_KEY")
            .or_else(|_| std::env::var("TIANAPI_KEY"))
            .unwrap_or_default();

        let base_url =
            std::env::var("TIANXING_BASE_URL").unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));

        let request_timeout_secs = std::env::var("TIANXING_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15);

        let ttl_secs = std::env::var("TIANXING_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        let interval_hours = std::env::var("TIANXING_POLL_INTERVAL_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(24);

        let level = std::env::var("TIANXING_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format = std::env::var("TIANXING_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            provider: ProviderConfig {
                api_key,
                base_url,
                request_timeout_secs,
            },
            cache: CacheConfig { ttl_secs },
            poll: PollConfig { interval_hours },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            anyhow::bail!("api_key must be set (TIANXING_API_KEY)");
        }

        if self.provider.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.cache.ttl_secs == 0 {
            anyhow::bail!("ttl_secs must be greater than 0");
        }

        if self.poll.interval_hours == 0 {
            anyhow::bail!("interval_hours must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.request_timeout_secs)
    }

    /// Get cache TTL as Duration
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_hours * 3600)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                api_key: String::new(),
                base_url: String::from(DEFAULT_BASE_URL),
                request_timeout_secs: 15,
            },
            cache: CacheConfig { ttl_secs: 3600 },
            poll: PollConfig { interval_hours: 24 },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
