//! Global spacing rate limiter for the quote provider.
//!
//! Every outbound quote call, for any material and any request, passes through
//! one limiter. A call may start only once `min_interval` has elapsed since the
//! previous call started.

use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum spacing between consecutive provider calls.
///
/// The async mutex is held across the wait, so concurrent callers queue up and
/// each one observes the spacing relative to its predecessor.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum inter-call delay.
    ///
    /// A zero delay disables waiting but still records call times.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next call is allowed, then record it as started.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                debug!(
                    "Rate limiter: waiting {:?} before next provider call",
                    ready_at - Instant::now()
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    /// Alpha Vantage free tier allows 5 calls per minute.
    fn default() -> Self {
        Self::new(Duration::from_secs(12))
    }
}
