use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use remesa_core::{CacheKey, QuoteCache, QuoteResult, RemesaError};

/// Cache whose backend is permanently down. Every call fails with
/// `CacheUnavailable` and is counted.
#[derive(Debug, Clone, Default)]
pub struct UnavailableCache {
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
}

impl UnavailableCache {
    /// New cache with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempted reads.
    #[must_use]
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of attempted writes.
    #[must_use]
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteCache for UnavailableCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<QuoteResult>, RemesaError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(RemesaError::cache_unavailable("connection refused"))
    }

    async fn set(
        &self,
        _key: CacheKey,
        _value: QuoteResult,
        _ttl: Duration,
    ) -> Result<(), RemesaError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(RemesaError::cache_unavailable("connection refused"))
    }
}
