use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{Corridor, QuoteRequest, QuoteResult, RemesaError};

/// Identity of a cached outcome: one provider, one corridor, one amount and
/// the optional payment and delivery methods the provider was asked for.
///
/// Amounts are normalized so `1000` and `1000.00` share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    provider: String,
    corridor: Corridor,
    amount: Decimal,
    payment_method: Option<String>,
    delivery_method: Option<String>,
}

impl CacheKey {
    /// Build a key from its parts.
    pub fn new(provider: impl Into<String>, corridor: Corridor, amount: Decimal) -> Self {
        Self {
            provider: provider.into(),
            corridor,
            amount: amount.normalize(),
            payment_method: None,
            delivery_method: None,
        }
    }

    /// Narrow the key to specific payment and delivery methods.
    #[must_use]
    pub fn with_methods(
        mut self,
        payment_method: Option<&str>,
        delivery_method: Option<&str>,
    ) -> Self {
        self.payment_method = payment_method.map(str::to_string);
        self.delivery_method = delivery_method.map(str::to_string);
        self
    }

    /// Key for `provider` answering `req`.
    #[must_use]
    pub fn for_request(provider: &str, req: &QuoteRequest) -> Self {
        Self::new(provider, req.corridor().clone(), req.amount())
            .with_methods(req.payment_method(), req.delivery_method())
    }

    /// Provider half of the key.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Corridor half of the key.
    #[must_use]
    pub const fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    /// Normalized amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Payment method the outcome was quoted for, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Delivery method the outcome was quoted for, if any.
    #[must_use]
    pub fn delivery_method(&self) -> Option<&str> {
        self.delivery_method.as_deref()
    }
}

/// Key/value store for provider outcomes with per-entry TTL.
///
/// Consistency is best-effort: concurrent writers to one key race and the
/// last write wins. Errors mean the backend is unavailable; callers treat
/// them as a miss and never fail the request on them.
#[async_trait]
pub trait QuoteCache: Send + Sync {
    /// Look up a live entry.
    async fn get(&self, key: &CacheKey) -> Result<Option<QuoteResult>, RemesaError>;

    /// Insert or overwrite an entry that expires after `ttl`.
    async fn set(&self, key: CacheKey, value: QuoteResult, ttl: Duration)
    -> Result<(), RemesaError>;
}
