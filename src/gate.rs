//! Rate-limited fetch gate for the lap-telemetry provider.
//!
//! The gate guarantees a minimum spacing between request starts and retries
//! transient failures with exponential backoff. It is an explicit instance
//! rather than process-wide state: tests run isolated gates in parallel and a
//! server deployment can scope one gate per tenant.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::transport::{HttpResponse, Transport};
use crate::{ResolveError, Result};

/// Tuning for the rate gate.
#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    /// Minimum spacing between request starts
    pub min_interval: Duration,

    /// Backoff delay before the first retry; doubles each further attempt
    pub base_delay: Duration,

    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(600),
            base_delay: Duration::from_millis(2000),
            max_retries: 4,
        }
    }
}

/// Serializes and retries calls to a rate-limited provider.
///
/// Spacing is measured start-to-start: no two requests begin less than
/// `min_interval` apart, regardless of caller concurrency. The gate does not
/// coalesce duplicate in-flight requests.
pub struct RateGate {
    transport: Arc<dyn Transport>,
    config: GateConfig,

    /// Start time of the most recent request. Sole synchronization point for
    /// all callers of the gated provider.
    last_request: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate over the given transport.
    pub fn new(transport: Arc<dyn Transport>, config: GateConfig) -> Self {
        Self { transport, config, last_request: Mutex::new(None) }
    }

    /// Fetch a URL through the gate.
    ///
    /// Retries on HTTP 429 and transport-level failures with delays of
    /// `base_delay * 2^(attempt-1)`, up to `max_retries` retries. Any other
    /// non-2xx response is returned as-is, not retried, so the caller can
    /// distinguish "temporarily unavailable" from "genuinely absent". After
    /// exhausting retries the last failure is surfaced.
    pub async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        let mut last_failure: Option<ResolveError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt);
                debug!(url, attempt, ?delay, "backing off before retry");
                sleep(delay).await;
            }

            self.pace().await;

            match self.transport.get(url).await {
                Ok(response) if response.status == 429 => {
                    warn!(url, attempt, "provider rate limit hit");
                    last_failure = Some(ResolveError::status(url, 429));
                }
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() => {
                    warn!(url, attempt, error = %err, "transport failure");
                    last_failure = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(ResolveError::retries_exhausted(url, self.config.max_retries + 1, last_failure))
    }

    /// Backoff delay before retry `attempt` (1-based). Saturates instead of
    /// overflowing for pathological retry counts or base delays.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.config.base_delay.saturating_mul(2u32.saturating_pow(attempt - 1))
    }

    /// Hold the caller until `min_interval` has passed since the previous
    /// request start, then claim the new start slot.
    ///
    /// The lock is held across the wait on purpose: concurrent callers queue
    /// here and each spaces itself from the start the previous caller claimed.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_interval {
                sleep(self.config.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
