use std::sync::Arc;
use std::time::Instant;

use remesa_core::{AggregationResult, FilterChain, QuoteRequest, RemesaError, ranked};

use crate::Remesa;

impl Remesa {
    /// Compare quotes from every active provider for one request.
    ///
    /// Behavior and trade-offs:
    /// - Providers named in `exclude_providers` are never called.
    /// - Every other provider contributes exactly one outcome to `all_results`
    ///   if it finishes before `request_timeout`; stragglers are left out.
    /// - Errors, panics and per-provider timeouts become failed outcomes
    ///   (`"Exception: ..."`) and never fail the call.
    /// - Only successful quotes pass through the filter chain
    ///   (custom predicate, then delivery time, then fee) and are ranked by
    ///   `sort_by`. Ties keep completion order.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the request fails validation. No provider
    /// is contacted in that case.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "remesa::router::get_all_quotes",
            skip(self, req),
            fields(
                corridor = %req.corridor(),
                amount = %req.amount(),
                sort_by = %req.sort_by(),
            ),
        )
    )]
    pub async fn get_all_quotes(&self, req: &QuoteRequest) -> Result<AggregationResult, RemesaError> {
        req.validate()?;

        let started = Instant::now();
        let active = self.registry.list_active(req.exclude_providers());
        let providers_called = active.len();

        let all_results = self.dispatch(active, Arc::new(req.clone())).await;

        let usable: Vec<_> = all_results.iter().filter(|q| q.is_usable()).cloned().collect();
        let filtered = FilterChain::from_request(req).apply(usable);
        let results = ranked(filtered, req.sort_by());

        let out = AggregationResult::build(results, all_results, providers_called, started.elapsed());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            providers_called = out.providers_called,
            completed = out.all_results.len(),
            successful = out.successful_providers,
            elapsed_ms = u64::try_from(out.execution_time.as_millis()).unwrap_or(u64::MAX),
            "aggregation complete"
        );

        Ok(out)
    }
}
