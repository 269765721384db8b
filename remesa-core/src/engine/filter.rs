//! Ordered predicate chain over successful quotes.

use rust_decimal::Decimal;

use crate::{QuoteFilter, QuoteRequest, QuoteResult};

/// One predicate in the chain.
#[derive(Debug, Clone)]
pub enum FilterStage {
    /// Caller-supplied predicate.
    Custom(QuoteFilter),
    /// Delivery time must be known and at most this many minutes.
    MaxDeliveryTime(u32),
    /// Fee must be known and at most this amount.
    MaxFee(Decimal),
}

impl FilterStage {
    /// Evaluate this stage. Missing delivery time or fee counts as infinite.
    #[must_use]
    pub fn matches(&self, q: &QuoteResult) -> bool {
        match self {
            Self::Custom(f) => f.matches(q),
            Self::MaxDeliveryTime(max) => q.delivery_time_minutes.is_some_and(|t| t <= *max),
            Self::MaxFee(max) => q.fee.is_some_and(|f| f <= *max),
        }
    }
}

/// Logical AND of [`FilterStage`]s, evaluated custom → delivery time → fee.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Chain with no stages; every quote passes.
    #[must_use]
    pub const fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Build the chain implied by a request's filter options.
    #[must_use]
    pub fn from_request(req: &QuoteRequest) -> Self {
        let mut stages = Vec::with_capacity(3);
        if let Some(f) = req.filter() {
            stages.push(FilterStage::Custom(f.clone()));
        }
        if let Some(max) = req.max_delivery_time_minutes() {
            stages.push(FilterStage::MaxDeliveryTime(max));
        }
        if let Some(max) = req.max_fee() {
            stages.push(FilterStage::MaxFee(max));
        }
        Self { stages }
    }

    /// Stages in evaluation order.
    #[must_use]
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// True when every stage accepts the quote. Stops at the first rejection.
    #[must_use]
    pub fn matches(&self, q: &QuoteResult) -> bool {
        self.stages.iter().all(|s| s.matches(q))
    }

    /// Keep the quotes accepted by the chain, preserving order.
    #[must_use]
    pub fn apply(&self, quotes: Vec<QuoteResult>) -> Vec<QuoteResult> {
        if self.stages.is_empty() {
            return quotes;
        }
        quotes.into_iter().filter(|q| self.matches(q)).collect()
    }
}
