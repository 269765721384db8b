//! Final response envelope for a comparison.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quote::QuoteResult;

/// Outcome of a single aggregation call.
///
/// Counts are post-filter: `successful_providers == results.len()` and
/// `success == !results.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// True when at least one quote survived filtering.
    pub success: bool,
    /// Successful quotes after filtering and ranking.
    pub results: Vec<QuoteResult>,
    /// Every outcome produced before the deadline, in completion order.
    pub all_results: Vec<QuoteResult>,
    /// Providers attempted after exclusions.
    pub providers_called: usize,
    /// Number of ranked quotes (`results.len()`).
    pub successful_providers: usize,
    /// Wall-clock time from dispatch start to ranking completion.
    pub execution_time: Duration,
    /// When the envelope was assembled.
    pub timestamp: DateTime<Utc>,
}

impl AggregationResult {
    /// Assemble the envelope from ranked quotes and raw outcomes.
    #[must_use]
    pub fn build(
        results: Vec<QuoteResult>,
        all_results: Vec<QuoteResult>,
        providers_called: usize,
        execution_time: Duration,
    ) -> Self {
        Self {
            success: !results.is_empty(),
            successful_providers: results.len(),
            results,
            all_results,
            providers_called,
            execution_time,
            timestamp: Utc::now(),
        }
    }

    /// Top-ranked quote, if any.
    #[must_use]
    pub fn best(&self) -> Option<&QuoteResult> {
        self.results.first()
    }

    /// Failed outcomes among `all_results`.
    pub fn failures(&self) -> impl Iterator<Item = &QuoteResult> {
        self.all_results.iter().filter(|q| !q.success)
    }
}
