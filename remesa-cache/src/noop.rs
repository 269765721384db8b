use std::time::Duration;

use async_trait::async_trait;
use remesa_core::{CacheKey, QuoteCache, QuoteResult, RemesaError};

/// Cache that stores nothing. Reads always miss and writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopQuoteCache;

#[async_trait]
impl QuoteCache for NoopQuoteCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<QuoteResult>, RemesaError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: CacheKey,
        _value: QuoteResult,
        _ttl: Duration,
    ) -> Result<(), RemesaError> {
        Ok(())
    }
}
