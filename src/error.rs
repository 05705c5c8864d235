//! Error types for session-data resolution.
//!
//! All errors implement the `std::error::Error` trait and include structured
//! context for debugging and degradation decisions.
//!
//! ## Error Categories
//!
//! - **Transport Errors**: Network-level failures reaching a provider
//! - **Status Errors**: Non-2xx responses surfaced to the caller unchanged
//! - **Retry Exhaustion**: Rate-limit retries used up without a usable response
//! - **Decode Errors**: Provider payloads that do not match the expected shape
//!
//! ## Retry Classification
//!
//! The rate gate retries only errors classified as retryable:
//!
//! ```rust
//! use gridwire::ResolveError;
//!
//! let error = ResolveError::status("https://example.test/laps", 429);
//! assert!(error.is_retryable());
//!
//! let error = ResolveError::status("https://example.test/laps", 404);
//! assert!(!error.is_retryable());
//! ```
//!
//! Everything else is either an expected absence (`Ok(None)` at the component
//! boundary, never an error) or a terminal failure the orchestrator degrades
//! to `None` per session.

use thiserror::Error;

/// Result type alias for resolution operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

/// Main error type for session-data resolution.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("Transport failure for {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Provider returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Retries exhausted after {attempts} attempts for {url}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Decode error in {context}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResolveError {
    /// Returns whether the rate gate may retry the failed request.
    ///
    /// Only transient conditions qualify: HTTP 429 and transport-level
    /// failures. Any other status is returned to the caller as-is so it can
    /// distinguish "temporarily unavailable" from "genuinely absent".
    pub fn is_retryable(&self) -> bool {
        match self {
            ResolveError::Transport { .. } => true,
            ResolveError::Status { status, .. } => *status == 429,
            ResolveError::RetriesExhausted { .. } => false,
            ResolveError::Decode { .. } => false,
        }
    }

    /// Helper constructor for transport failures.
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ResolveError::Transport { url: url.into(), source: Box::new(source) }
    }

    /// Helper constructor for non-2xx status errors.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        ResolveError::Status { url: url.into(), status }
    }

    /// Helper constructor for retry exhaustion, carrying the last failure.
    pub fn retries_exhausted(url: impl Into<String>, attempts: u32, last: Option<Self>) -> Self {
        ResolveError::RetriesExhausted {
            url: url.into(),
            attempts,
            source: last.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Helper constructor for payload decode errors.
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        ResolveError::Decode { context: context.into(), source }
    }
}
