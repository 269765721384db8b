//! remesa-mock
//!
//! Deterministic collaborators for exercising the remesa orchestrator without
//! a network: scriptable providers, a concurrency gauge, an always-failing
//! cache and fixture quotes for the USD→INR corridor.

mod cache;
mod gauge;
mod provider;

/// Static fixture corridors and quotes.
pub mod fixtures;

pub use crate::cache::UnavailableCache;
pub use crate::gauge::{InFlightGauge, InFlightGuard};
pub use crate::provider::{MockBehavior, MockProvider, MockProviderBuilder};
