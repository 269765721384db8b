//! Comparison requests and their builder.

use core::fmt;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::corridor::Corridor;
use crate::error::RemesaError;
use crate::quote::QuoteResult;

/// Default number of concurrent provider calls per request.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Ordering applied to successful quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Highest exchange rate first.
    #[default]
    BestRate,
    /// Cheapest fee first.
    LowestFee,
    /// Shortest delivery time first.
    FastestTime,
    /// Highest composite rate/fee/time score first.
    BestValue,
    /// Keep dispatcher completion order.
    #[serde(rename = "none")]
    Unsorted,
}

impl SortBy {
    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestRate => "best_rate",
            Self::LowestFee => "lowest_fee",
            Self::FastestTime => "fastest_time",
            Self::BestValue => "best_value",
            Self::Unsorted => "none",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = RemesaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_rate" => Ok(Self::BestRate),
            "lowest_fee" => Ok(Self::LowestFee),
            "fastest_time" => Ok(Self::FastestTime),
            "best_value" => Ok(Self::BestValue),
            "" | "none" => Ok(Self::Unsorted),
            other => Err(RemesaError::invalid_request(format!(
                "unknown sort_by {other:?}"
            ))),
        }
    }
}

/// Caller-supplied predicate applied before the built-in fee/time filters.
#[derive(Clone)]
pub struct QuoteFilter(Arc<dyn Fn(&QuoteResult) -> bool + Send + Sync>);

impl QuoteFilter {
    /// Wrap a predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&QuoteResult) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluate the predicate.
    #[must_use]
    pub fn matches(&self, quote: &QuoteResult) -> bool {
        (self.0)(quote)
    }
}

impl fmt::Debug for QuoteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QuoteFilter(..)")
    }
}

/// A single comparison request. Immutable once built.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    corridor: Corridor,
    amount: Decimal,
    sort_by: SortBy,
    exclude_providers: BTreeSet<String>,
    max_workers: usize,
    max_fee: Option<Decimal>,
    max_delivery_time_minutes: Option<u32>,
    filter: Option<QuoteFilter>,
    use_cache: bool,
    payment_method: Option<String>,
    delivery_method: Option<String>,
}

impl QuoteRequest {
    /// Start building a request for `amount` along `corridor`.
    #[must_use]
    pub fn builder(corridor: Corridor, amount: Decimal) -> QuoteRequestBuilder {
        QuoteRequestBuilder::new(corridor, amount)
    }

    /// Route to quote.
    #[must_use]
    pub const fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    /// Amount to send, in the corridor's source currency.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Requested ordering.
    #[must_use]
    pub const fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Providers that must not be called.
    #[must_use]
    pub const fn exclude_providers(&self) -> &BTreeSet<String> {
        &self.exclude_providers
    }

    /// Upper bound on concurrent provider calls.
    #[must_use]
    pub const fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Fee cap; quotes above it (or without a fee) are dropped.
    #[must_use]
    pub const fn max_fee(&self) -> Option<Decimal> {
        self.max_fee
    }

    /// Delivery-time cap in minutes; quotes above it (or without one) are dropped.
    #[must_use]
    pub const fn max_delivery_time_minutes(&self) -> Option<u32> {
        self.max_delivery_time_minutes
    }

    /// Custom predicate, if any.
    #[must_use]
    pub const fn filter(&self) -> Option<&QuoteFilter> {
        self.filter.as_ref()
    }

    /// Whether the quote cache is consulted and populated.
    #[must_use]
    pub const fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// Preferred payment method forwarded to providers.
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Preferred delivery method forwarded to providers.
    #[must_use]
    pub fn delivery_method(&self) -> Option<&str> {
        self.delivery_method.as_deref()
    }

    /// Re-check the request invariants.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the amount is not positive, `max_workers` is
    /// zero, or `max_fee` is negative.
    pub fn validate(&self) -> Result<(), RemesaError> {
        if self.amount <= Decimal::ZERO {
            return Err(RemesaError::invalid_request(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.max_workers == 0 {
            return Err(RemesaError::invalid_request("max_workers must be at least 1"));
        }
        if let Some(fee) = self.max_fee
            && fee < Decimal::ZERO
        {
            return Err(RemesaError::invalid_request(format!(
                "max_fee must not be negative, got {fee}"
            )));
        }
        Ok(())
    }
}

/// Builder for [`QuoteRequest`]; defaults to `best_rate`, 10 workers, cache on.
#[derive(Debug, Clone)]
pub struct QuoteRequestBuilder {
    inner: QuoteRequest,
}

impl QuoteRequestBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new(corridor: Corridor, amount: Decimal) -> Self {
        Self {
            inner: QuoteRequest {
                corridor,
                amount,
                sort_by: SortBy::default(),
                exclude_providers: BTreeSet::new(),
                max_workers: DEFAULT_MAX_WORKERS,
                max_fee: None,
                max_delivery_time_minutes: None,
                filter: None,
                use_cache: true,
                payment_method: None,
                delivery_method: None,
            },
        }
    }

    /// Select the ordering.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.inner.sort_by = sort_by;
        self
    }

    /// Exclude a provider by name. May be called repeatedly.
    #[must_use]
    pub fn exclude(mut self, provider: impl Into<String>) -> Self {
        self.inner.exclude_providers.insert(provider.into());
        self
    }

    /// Exclude several providers by name.
    #[must_use]
    pub fn exclude_all<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .exclude_providers
            .extend(providers.into_iter().map(Into::into));
        self
    }

    /// Bound concurrent provider calls.
    #[must_use]
    pub const fn max_workers(mut self, n: usize) -> Self {
        self.inner.max_workers = n;
        self
    }

    /// Drop quotes whose fee exceeds `fee` or is unknown.
    #[must_use]
    pub const fn max_fee(mut self, fee: Decimal) -> Self {
        self.inner.max_fee = Some(fee);
        self
    }

    /// Drop quotes whose delivery time exceeds `minutes` or is unknown.
    #[must_use]
    pub const fn max_delivery_time_minutes(mut self, minutes: u32) -> Self {
        self.inner.max_delivery_time_minutes = Some(minutes);
        self
    }

    /// Install a custom predicate.
    #[must_use]
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&QuoteResult) -> bool + Send + Sync + 'static,
    {
        self.inner.filter = Some(QuoteFilter::new(f));
        self
    }

    /// Toggle the quote cache for this request.
    #[must_use]
    pub const fn use_cache(mut self, yes: bool) -> Self {
        self.inner.use_cache = yes;
        self
    }

    /// Forward a payment method preference to providers.
    #[must_use]
    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.inner.payment_method = Some(method.into());
        self
    }

    /// Forward a delivery method preference to providers.
    #[must_use]
    pub fn delivery_method(mut self, method: impl Into<String>) -> Self {
        self.inner.delivery_method = Some(method.into());
        self
    }

    /// Finish the request.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the request violates [`QuoteRequest::validate`].
    pub fn build(self) -> Result<QuoteRequest, RemesaError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
