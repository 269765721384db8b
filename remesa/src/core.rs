use std::sync::Arc;
use std::time::Duration;

use remesa_cache::{MemoryQuoteCache, TtlPolicy};
use remesa_core::{CacheConfig, QuoteCache, QuoteProvider, RemesaConfig, RemesaError};

use crate::registry::ProviderRegistry;

/// Orchestrator that fans quote requests out across registered providers.
pub struct Remesa {
    pub(crate) registry: Arc<ProviderRegistry>,
    pub(crate) cache: Arc<dyn QuoteCache>,
    pub(crate) ttl: TtlPolicy,
    pub(crate) cfg: RemesaConfig,
}

/// Builder for constructing a `Remesa` orchestrator with custom configuration.
pub struct RemesaBuilder {
    providers: Vec<Arc<dyn QuoteProvider>>,
    cache: Option<Arc<dyn QuoteCache>>,
    cfg: RemesaConfig,
}

impl Default for RemesaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RemesaBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no providers; register at least one via [`with_provider`](Self::with_provider).
    /// - Defaults: 20s request deadline, no per-provider timeout, 24h success
    ///   TTL with ±60s jitter, 5 min failure TTL, in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cache: None,
            cfg: RemesaConfig::default(),
        }
    }

    /// Register a provider.
    ///
    /// Registration order is the order `list_active` reports providers in and
    /// therefore the final tie-break when ranked quotes compare equal.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn QuoteProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Use a custom cache backend instead of the default in-memory store.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn QuoteCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RemesaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the global fan-out deadline.
    ///
    /// Behavior and trade-offs:
    /// - Bounds the caller's wait regardless of provider count.
    /// - Providers still running at the deadline are abandoned, not cancelled;
    ///   their outcome never reaches the caller but may still be cached.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = timeout;
        self
    }

    /// Bound each provider call individually.
    ///
    /// A call exceeding this limit becomes a failed outcome
    /// (`"Exception: provider timed out after <ms>ms"`) and is cached with the
    /// failure TTL, instead of silently missing from the response.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = Some(timeout);
        self
    }

    /// Set the cache TTL policy and in-memory capacity.
    #[must_use]
    pub fn cache_config(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = cfg;
        self
    }

    /// Build the `Remesa` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if no providers were registered, two providers
    /// share a name, or a timeout is zero.
    pub fn build(self) -> Result<Remesa, RemesaError> {
        if self.cfg.request_timeout.is_zero() {
            return Err(RemesaError::invalid_config("request_timeout must be non-zero"));
        }
        if self.cfg.provider_timeout.is_some_and(|t| t.is_zero()) {
            return Err(RemesaError::invalid_config("provider_timeout must be non-zero"));
        }
        let registry = ProviderRegistry::new(self.providers)?;
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryQuoteCache::from_config(&self.cfg.cache)));

        Ok(Remesa {
            registry: Arc::new(registry),
            cache,
            ttl: TtlPolicy::from(&self.cfg.cache),
            cfg: self.cfg,
        })
    }
}

impl Remesa {
    /// Start building a new `Remesa` instance.
    #[must_use]
    pub fn builder() -> RemesaBuilder {
        RemesaBuilder::new()
    }

    /// The provider registry this orchestrator dispatches to.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RemesaConfig {
        &self.cfg
    }

    /// Wrap a provider future with the optional per-provider timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "remesa::core::provider_call_with_timeout",
            skip(fut),
            fields(
                provider = provider_name,
                timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider_name: &'static str,
        timeout: Option<Duration>,
        fut: Fut,
    ) -> Result<T, RemesaError>
    where
        Fut: std::future::Future<Output = Result<T, RemesaError>>,
    {
        let Some(timeout) = timeout else {
            return fut.await;
        };
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(RemesaError::provider_timeout(
                provider_name,
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ))
        })
    }
}

impl std::fmt::Debug for Remesa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remesa")
            .field("registry", &self.registry)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
