//! Configuration types shared across the orchestrator and cache backends.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Freshness policy for cached provider outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a successful quote. Zero disables caching of successes.
    pub success_ttl: Duration,
    /// Lifetime of a failed outcome. Zero disables caching of failures.
    pub failure_ttl: Duration,
    /// Bound of the uniform offset `[-jitter, +jitter]` added to `success_ttl`.
    pub jitter: Duration,
    /// Capacity of the in-memory backend.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            success_ttl: Duration::from_secs(24 * 60 * 60),
            failure_ttl: Duration::from_secs(5 * 60),
            jitter: Duration::from_secs(60),
            max_entries: 10_000,
        }
    }
}

/// Global configuration for the `Remesa` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemesaConfig {
    /// Deadline for the whole fan-out. Providers still running when it
    /// elapses are abandoned and left out of the response.
    pub request_timeout: Duration,
    /// Optional bound on each provider call, independent of the deadline.
    pub provider_timeout: Option<Duration>,
    /// Cache TTL policy.
    pub cache: CacheConfig,
}

impl Default for RemesaConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(20),
            provider_timeout: None,
            cache: CacheConfig::default(),
        }
    }
}
