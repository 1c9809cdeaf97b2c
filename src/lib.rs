//! tianxing - Tian API daily content sensors
//!
//! A polling bridge for the Tian content API: fetches several independent
//! Chinese-text content categories (greetings, maxims, classic poetry,
//! jokes, riddles, ...), caches them with a shared TTL, and exposes polled
//! sensor values, including a time-slot "scrolling display" that maps the
//! minute-of-day onto a fixed partition of the clock.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Categories, wire shapes and payload normalization
//! - [`fetcher`] - HTTP fetching with provider status classification
//! - [`cache`] - Process-wide TTL content cache
//! - [`format`] - Line-break formatting and greeting normalization
//! - [`scheduler`] - Minute-of-day slot partition and bundle rendering
//! - [`readiness`] - Readiness gate for cache-only consumers
//! - [`sensor`] - Polled sensor entities (composition layer)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tianxing::cache::ContentCache;
//! use tianxing::config::Config;
//! use tianxing::fetcher::TianFetcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     let fetcher = Arc::new(TianFetcher::new(&config.provider)?);
//!     let cache = Arc::new(ContentCache::new());
//!     // build sensors and poll...
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod readiness;
pub mod scheduler;
pub mod sensor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheSnapshot, ContentCache};
    pub use crate::config::Config;
    pub use crate::error::{ErrorCategory, FetchError};
    pub use crate::fetcher::TianFetcher;
    pub use crate::models::{Category, CategoryPayload, Record};
    pub use crate::readiness::{is_ready, GateState, RetryGate};
    pub use crate::scheduler::{resolve, DisplaySchedule, RenderingBundle};
    pub use crate::sensor::{Sensor, SensorContext};
}

// Direct re-exports for convenience
pub use models::{Category, CategoryPayload, Record};
