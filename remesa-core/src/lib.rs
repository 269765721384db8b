//! remesa-core
//!
//! Contracts and pure engines shared across the remesa workspace.
//!
//! - `provider`: the `QuoteProvider` trait and canonical call arguments.
//! - `cache`: the `QuoteCache` trait and its key.
//! - `engine`: the filter chain and ranking strategies applied to
//!   successful quotes after fan-out.
//!
//! Nothing in this crate performs I/O or spawns tasks; the orchestrator in
//! the `remesa` crate owns the runtime.
#![warn(missing_docs)]

/// Cache contract used by the dispatcher.
pub mod cache;
/// Post-dispatch filtering and ranking.
pub mod engine;
/// Provider capability trait and parameter adaptation.
pub mod provider;

pub use cache::{CacheKey, QuoteCache};
pub use engine::{FilterChain, FilterStage, best_value_score, rank_quotes, ranked};
pub use provider::{CallParam, ProviderCallArgs, QuoteProvider};
pub use remesa_types::*;
