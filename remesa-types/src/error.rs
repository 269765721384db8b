use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the remesa workspace.
///
/// Covers request validation, orchestrator configuration, provider-tagged
/// failures and cache backend outages. Per-provider failures never escape an
/// aggregation call; they are folded into the outcome set instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemesaError {
    /// The comparison request is malformed (negative amount, zero workers, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The orchestrator was assembled with an unusable configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A provider requires a call parameter the request cannot supply.
    #[error("missing parameter: {param} required by {provider}")]
    MissingParameter {
        /// Provider name that declared the requirement.
        provider: String,
        /// Canonical name of the missing parameter.
        param: String,
    },

    /// An individual provider call failed abnormally.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the per-provider timeout.
    #[error("provider timed out after {timeout_ms}ms")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The cache backend could not serve a read or write.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Issues with returned data (missing or nonsensical fields).
    #[error("data issue: {0}")]
    Data(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl RemesaError {
    /// Helper: build an `InvalidRequest` error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Helper: build an `InvalidConfig` error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MissingParameter` error.
    pub fn missing_parameter(provider: impl Into<String>, param: impl Into<String>) -> Self {
        Self::MissingParameter {
            provider: provider.into(),
            param: param.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, timeout_ms: u64) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            timeout_ms,
        }
    }

    /// Helper: build a `CacheUnavailable` error.
    pub fn cache_unavailable(msg: impl Into<String>) -> Self {
        Self::CacheUnavailable(msg.into())
    }

    /// Returns true for errors raised before any provider is contacted.
    ///
    /// These are the only errors an aggregation call surfaces to its caller.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::InvalidConfig(_))
    }
}
