//! Opt-in retry helper with linear backoff.
//!
//! Nothing in the SDK retries on its own; wrap any operation in [`retry`]
//! when that is what the caller wants. Attempts run strictly one after
//! another, and the caller is suspended between them.

use std::future::Future;
use std::time::Duration;

/// Retry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one. `0` behaves as `1`.
    pub max_attempts: u32,
    /// Delay unit; the wait after attempt `n` (1-based) is `base_delay * n`.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Number of attempts actually made; never less than one.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay after the given 1-based attempt.
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Run `operation` up to `max_attempts` times, sleeping `base_delay * n` after
/// the n-th failure. Returns the first success or the last error.
pub async fn retry<T, E, F, Fut>(operation: F, max_attempts: u32, base_delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with(
        RetryConfig {
            max_attempts,
            base_delay,
        },
        operation,
    )
    .await
}

/// [`retry`] driven by a [`RetryConfig`].
pub async fn retry_with<T, E, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = config.effective_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(e) => {
                let delay = config.delay_after_attempt(attempt);
                tracing::debug!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
