//! Polled sensor entities
//!
//! Thin composition layer over the cache, fetcher and scheduler: each sensor
//! exposes one category group (or the scheduler's composite) as a polled
//! value with a scalar state, an attribute map and an availability flag. The
//! host platform drives `update()` on its own schedule (24 h by default);
//! within a cycle the shared cache keeps sibling sensors from re-fetching
//! each other's categories.

pub mod daily_words;
pub mod morning_evening;
pub mod poetry;
pub mod riddle_joke;
pub mod scrolling;

pub use daily_words::DailyWordsSensor;
pub use morning_evening::MorningEveningSensor;
pub use poetry::PoetrySensor;
pub use riddle_joke::RiddleJokeSensor;
pub use scrolling::ScrollingSensor;

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::ContentCache;
use crate::fetcher::TianFetcher;
use crate::models::{Category, CategoryPayload};

/// State shown before the first update completes
pub const STATE_PENDING: &str = "等待更新";

/// State shown when a required fetch failed
pub const STATE_FETCH_FAILED: &str = "API请求失败";

/// Common contract for all polled sensors
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Entity name
    fn name(&self) -> &'static str;

    /// Scalar state value (update timestamp, slot title or degraded text)
    fn state(&self) -> &str;

    /// Structured attribute map
    fn attributes(&self) -> Value;

    /// False when the most recent update failed to obtain valid data
    fn available(&self) -> bool;

    /// Run one update cycle; failures are absorbed into state/availability
    async fn update(&mut self);
}

/// Shared handles each sensor holds
#[derive(Clone)]
pub struct SensorContext {
    /// Provider fetcher
    pub fetcher: Arc<TianFetcher>,

    /// Process-wide content cache
    pub cache: Arc<ContentCache>,

    /// Cache freshness window
    pub ttl: Duration,
}

impl SensorContext {
    /// Fetch one category through the shared cache
    pub async fn cached_fetch(&self, category: Category) -> Option<CategoryPayload> {
        self.cache
            .get_or_fetch(category, self.ttl, || self.fetcher.fetch(category))
            .await
    }
}

/// Current local time as the sensor state string
pub fn update_time_text() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
