use std::time::Duration;

use rand::Rng;
use remesa_core::{CacheConfig, QuoteResult};

/// Chooses how long an outcome stays cached.
///
/// Successes live for `success_ttl` shifted by a uniform offset in
/// `[-jitter, +jitter]` so entries written together do not expire together.
/// Failures live for `failure_ttl` without jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    success_ttl: Duration,
    failure_ttl: Duration,
    jitter: Duration,
}

impl TtlPolicy {
    /// Build a policy from explicit durations.
    #[must_use]
    pub const fn new(success_ttl: Duration, failure_ttl: Duration, jitter: Duration) -> Self {
        Self {
            success_ttl,
            failure_ttl,
            jitter,
        }
    }

    /// Base lifetime of successful quotes.
    #[must_use]
    pub const fn success_ttl(&self) -> Duration {
        self.success_ttl
    }

    /// Lifetime of failed outcomes.
    #[must_use]
    pub const fn failure_ttl(&self) -> Duration {
        self.failure_ttl
    }

    /// Jitter bound applied to successes.
    #[must_use]
    pub const fn jitter(&self) -> Duration {
        self.jitter
    }

    /// TTL for `outcome`. A zero result means "do not cache".
    #[must_use]
    pub fn ttl_for(&self, outcome: &QuoteResult) -> Duration {
        if outcome.success {
            jittered(self.success_ttl, self.jitter)
        } else {
            self.failure_ttl
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for TtlPolicy {
    fn from(cfg: &CacheConfig) -> Self {
        Self::new(cfg.success_ttl, cfg.failure_ttl, cfg.jitter)
    }
}

fn jittered(base: Duration, jitter: Duration) -> Duration {
    if base.is_zero() || jitter.is_zero() {
        return base;
    }
    let base_ms = i64::try_from(base.as_millis()).unwrap_or(i64::MAX);
    let bound = i64::try_from(jitter.as_millis()).unwrap_or(i64::MAX / 2);
    let mut rng = rand::rng();
    let offset = rng.random_range(-bound..=bound);
    let ms = base_ms.saturating_add(offset).max(0);
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
