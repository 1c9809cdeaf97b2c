//! Shared content cache with TTL freshness
//!
//! All sensors in one process share one [`ContentCache`]: several sensors
//! read the same categories, and the cache is what keeps a poll cycle from
//! re-fetching a category a sibling sensor already fetched within the
//! freshness window. The cache is constructed once at startup and handed to
//! every consumer by `Arc`; its scope is the running process and it is lost
//! on restart.
//!
//! Entries are only ever created or overwritten by successful fetches. A
//! failed fetch returns `None` and leaves any existing (stale) entry in
//! place for readers that tolerate staleness.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::{Category, CategoryPayload, Record};

/// One cached fetch result with its fetch timestamp
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last successfully fetched payload
    pub payload: CategoryPayload,

    /// When the payload was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry fetched now
    pub fn new(payload: CategoryPayload) -> Self {
        Self {
            payload,
            fetched_at: Utc::now(),
        }
    }

    /// Check freshness against a TTL at a given instant
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now - self.fetched_at;
        age < chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero())
    }
}

/// Immutable view of the cache taken at one instant
///
/// Consumers that must not trigger fetches (the scrolling display) resolve
/// against a snapshot, which makes their logic a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    entries: HashMap<Category, CacheEntry>,
}

impl CacheSnapshot {
    /// Get the cached record for a category, if any
    pub fn record(&self, category: Category) -> Option<&Record> {
        self.entries.get(&category).map(|e| &e.payload.record)
    }

    /// Check that a category is present with a non-empty record
    pub fn has_usable(&self, category: Category) -> bool {
        self.record(category).is_some_and(|r| !r.is_empty())
    }

    /// Number of cached categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a snapshot directly from records (test and demo convenience)
    pub fn from_records(records: Vec<(Category, Record)>) -> Self {
        let entries = records
            .into_iter()
            .map(|(category, record)| {
                (
                    category,
                    CacheEntry::new(CategoryPayload {
                        code: crate::models::CODE_SUCCESS,
                        record,
                    }),
                )
            })
            .collect();
        Self { entries }
    }
}

/// Process-wide TTL cache keyed by content category
pub struct ContentCache {
    entries: RwLock<HashMap<Category, CacheEntry>>,
}

impl ContentCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached payload if fresh, otherwise invoke `fetch_fn`
    ///
    /// A fetched payload is stored (overwriting in place) only when it is
    /// cache-eligible: success code and non-empty record. Ineligible or
    /// failed fetches return `None` without disturbing the existing entry.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        category: Category,
        ttl: Duration,
        fetch_fn: F,
    ) -> Option<CategoryPayload>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<CategoryPayload>>,
    {
        let now = Utc::now();
        if let Some(entry) = self.entries.read().await.get(&category) {
            if entry.is_fresh(now, ttl) {
                tracing::debug!(category = %category, "使用缓存数据");
                return Some(entry.payload.clone());
            }
        }

        let payload = fetch_fn().await?;
        if !payload.is_cache_eligible() {
            return None;
        }

        self.entries
            .write()
            .await
            .insert(category, CacheEntry::new(payload.clone()));
        tracing::info!(category = %category, "已更新缓存数据");

        Some(payload)
    }

    /// Get the cached payload regardless of freshness
    pub async fn get(&self, category: Category) -> Option<CategoryPayload> {
        self.entries
            .read()
            .await
            .get(&category)
            .map(|e| e.payload.clone())
    }

    /// Insert an entry with an explicit fetch timestamp
    ///
    /// Freshness is relative to `fetched_at`, so tests can backdate entries
    /// to exercise TTL expiry deterministically.
    pub async fn insert_at(
        &self,
        category: Category,
        payload: CategoryPayload,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries
            .write()
            .await
            .insert(category, CacheEntry { payload, fetched_at });
    }

    /// Clone the current contents into an immutable snapshot
    pub async fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            entries: self.entries.read().await.clone(),
        }
    }

    /// Number of cached categories
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}
