//! Remesa compares money-transfer quotes across many independent providers.
//!
//! Overview
//! - Fans one comparison request out to every registered provider concurrently,
//!   bounded by the request's worker budget and a single global deadline.
//! - Consults and populates a per-(provider, corridor, amount) quote cache.
//! - Isolates provider failures: errors, panics and per-provider timeouts
//!   become failed outcomes in `all_results` instead of failing the call.
//! - Filters successful quotes (custom predicate, delivery time, fee) and
//!   ranks them by rate, fee, speed or a composite value score.
//!
//! Key behaviors and trade-offs
//! - Deadline: once `request_timeout` elapses the dispatcher stops waiting and
//!   returns what has completed. Abandoned calls keep running in the
//!   background and still write their outcome to the cache.
//! - Cache: successes live for a long TTL with random jitter, failures for a
//!   short TTL. A cache backend outage degrades to a miss and is logged.
//! - Counts in `AggregationResult` are post-filter.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use remesa::{Corridor, QuoteRequest, Remesa, SortBy};
//!
//! let remesa = Remesa::builder()
//!     .with_provider(Arc::new(WiseProvider::new()))
//!     .with_provider(Arc::new(RemitlyProvider::new()))
//!     .request_timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! let corridor = Corridor::new("US", "IN", "USD", "INR")?;
//! let req = QuoteRequest::builder(corridor, "1000".parse()?)
//!     .sort_by(SortBy::BestValue)
//!     .max_fee("10".parse()?)
//!     .build()?;
//! let report = remesa.get_all_quotes(&req).await?;
//! if let Some(best) = report.best() {
//!     println!("{} offers {:?}", best.provider_id, best.exchange_rate);
//! }
//! ```
//!
//! See `remesa/examples/` for a runnable demonstration using mock providers.
#![warn(missing_docs)]

pub(crate) mod core;
mod registry;
mod router;

pub use crate::core::{Remesa, RemesaBuilder};
pub use crate::registry::ProviderRegistry;

pub use remesa_cache::{MemoryQuoteCache, NoopQuoteCache, TtlPolicy};
pub use remesa_core::{
    CacheKey, CallParam, FilterChain, FilterStage, ProviderCallArgs, QuoteCache, QuoteProvider,
    best_value_score, rank_quotes, ranked,
};
pub use remesa_types::{
    AggregationResult, CacheConfig, Corridor, DEFAULT_MAX_WORKERS, Decimal, QuoteFilter,
    QuoteRequest, QuoteRequestBuilder, QuoteResult, RemesaConfig, RemesaError, SortBy,
};
