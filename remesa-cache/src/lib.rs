//! remesa-cache
//!
//! Backends for the `QuoteCache` contract and the TTL policy the dispatcher
//! applies when writing outcomes back.
//!
//! - `MemoryQuoteCache`: bounded in-process store with per-entry expiry.
//! - `NoopQuoteCache`: never stores anything; every read is a miss.
//! - `TtlPolicy`: long jittered TTL for successes, short TTL for failures.
#![warn(missing_docs)]

mod memory;
mod noop;
mod policy;

pub use crate::memory::MemoryQuoteCache;
pub use crate::noop::NoopQuoteCache;
pub use crate::policy::TtlPolicy;
