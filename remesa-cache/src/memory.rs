use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use remesa_core::{CacheConfig, CacheKey, QuoteCache, QuoteResult, RemesaError};

#[derive(Clone)]
struct Entry {
    value: QuoteResult,
    ttl: Duration,
}

// Each entry carries its own lifetime; overwrites restart the clock.
struct PerEntryTtl;

impl Expiry<CacheKey, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory quote cache with per-entry TTL.
///
/// Capacity is enforced by approximate LFU eviction. Entries past their TTL
/// are never returned, even before the background sweep removes them.
#[derive(Clone)]
pub struct MemoryQuoteCache {
    inner: Cache<CacheKey, Entry>,
}

impl MemoryQuoteCache {
    /// Create a cache holding at most `max_entries` outcomes.
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries.max(1))
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }

    /// Create a cache sized from `cfg.max_entries`.
    #[must_use]
    pub fn from_config(cfg: &CacheConfig) -> Self {
        Self::new(cfg.max_entries)
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    /// Approximate number of live entries after pending maintenance runs.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for MemoryQuoteCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl std::fmt::Debug for MemoryQuoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryQuoteCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[async_trait]
impl QuoteCache for MemoryQuoteCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<QuoteResult>, RemesaError> {
        Ok(self.inner.get(key).await.map(|e| e.value))
    }

    async fn set(&self, key: CacheKey, value: QuoteResult, ttl: Duration) -> Result<(), RemesaError> {
        if ttl.is_zero() {
            #[cfg(feature = "tracing")]
            tracing::debug!(provider = key.provider(), "zero ttl; not caching outcome");
            return Ok(());
        }
        self.inner.insert(key, Entry { value, ttl }).await;
        Ok(())
    }
}
