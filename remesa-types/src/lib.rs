//! Remesa-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod aggregation;
mod config;
mod corridor;
mod error;
mod quote;
mod request;

pub use aggregation::AggregationResult;
pub use config::{CacheConfig, RemesaConfig};
pub use corridor::Corridor;
pub use error::RemesaError;
pub use quote::QuoteResult;
pub use request::{DEFAULT_MAX_WORKERS, QuoteFilter, QuoteRequest, QuoteRequestBuilder, SortBy};

pub use rust_decimal::Decimal;
