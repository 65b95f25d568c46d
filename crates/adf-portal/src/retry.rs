//! Bounded retry for the pipeline's outbound calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy for transient failures.
///
/// `max_attempts` counts every call, including the first.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryPolicy {
    /// Single attempt, fail immediately on error.
    None,
    /// Exponential backoff between attempts.
    Exponential {
        /// Maximum number of calls, including the first one.
        max_attempts: usize,
        /// Delay before the first retry.
        initial_interval: Duration,
        /// Maximum interval cap (won't exceed this).
        max_interval: Duration,
        /// Multiplier applied per retry (2.0 doubles each time).
        multiplier: f64,
    },
}

impl RetryPolicy {
    /// Creates a new exponential backoff retry policy.
    pub fn exponential(
        max_attempts: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    ) -> Self {
        RetryPolicy::Exponential {
            max_attempts,
            initial_interval,
            max_interval,
            multiplier,
        }
    }

    /// Total number of calls this policy allows.
    pub fn max_attempts(&self) -> usize {
        match self {
            RetryPolicy::None => 1,
            RetryPolicy::Exponential { max_attempts, .. } => (*max_attempts).max(1),
        }
    }

    /// Whether another call is allowed after `attempts_made` calls.
    pub fn should_retry(&self, attempts_made: usize) -> bool {
        attempts_made < self.max_attempts()
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay(&self, retry: usize) -> Duration {
        match self {
            RetryPolicy::None => Duration::ZERO,
            RetryPolicy::Exponential {
                initial_interval,
                max_interval,
                multiplier,
                ..
            } => {
                let exponent = retry.min(i32::MAX as usize) as i32;
                let delay_secs = initial_interval.as_secs_f64() * multiplier.powi(exponent);
                // overflow, infinity and NaN all land on the cap
                Duration::try_from_secs_f64(delay_secs)
                    .map(|delay| delay.min(*max_interval))
                    .unwrap_or(*max_interval)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::exponential(3, Duration::from_millis(500), Duration::from_secs(5), 2.0)
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts. The last error is returned.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    is_retryable: impl Fn(&E) -> bool,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempts_made = 0;
    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        attempts_made += 1;

        if !is_retryable(&err) || !policy.should_retry(attempts_made) {
            return Err(err);
        }

        let delay = policy.delay(attempts_made - 1);
        warn!(
            operation,
            attempt = attempts_made,
            max_attempts = policy.max_attempts(),
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Transient failure, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
