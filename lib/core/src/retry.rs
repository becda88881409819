//! Bounded retry with exponential backoff.
//!
//! Retry is modeled as a reusable higher-order operation so that every
//! external backend call shares the same attempt budget and backoff
//! curve, independent of which backend is being called.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Attempt budget and backoff curve for retried operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Must be at
    /// least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each attempt after
    /// that.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and base delay.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// The delay inserted after the given failed attempt (1-based).
    #[must_use]
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

/// Runs `operation` until it succeeds or the attempt budget is spent,
/// sleeping between attempts per the policy's backoff curve.
///
/// Retry is blind: any failure counts against the budget regardless of
/// its kind. The final attempt's error is returned when all attempts
/// fail. `label` identifies the operation in log output.
///
/// # Errors
///
/// Returns the last attempt's error once `policy.max_attempts` attempts
/// have failed.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_secs = delay.as_secs(),
                    error = %error,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
