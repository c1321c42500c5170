//! Indexer read retry with exponential backoff.
//!
//! Reads are a single attempt unless the caller opts in: the default
//! [`RetryPolicy`] has zero retries. When enabled:
//! - Retry only network-kind failures (not decode or request errors)
//! - Backoff: base × 2^n, capped at `max_delay`

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// How many times, and how patiently, to retry a failed read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// Single attempt
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// `max_retries` extra attempts with 1s, 2s, 4s... backoff capped at 30s.
    pub const fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Retry an async operation according to `policy`.
///
/// # Arguments
///
/// * `policy` - Retry budget and backoff
/// * `operation` - The async operation to retry (e.g. a proposals fetch)
/// * `is_retryable` - Function to determine if error is transient and retryable
///
/// # Returns
///
/// Result of the operation, or the last error after all retries exhausted.
///
/// # Example
///
/// ```no_run
/// use daoboard::api::ApiError;
/// use daoboard::retry::{retry_with_backoff, RetryPolicy};
///
/// async fn load() -> Result<(), ApiError> {
///     retry_with_backoff(
///         RetryPolicy::with_retries(2),
///         || async { /* indexer call */ Ok(()) },
///         ApiError::is_network,
///     )
///     .await
/// }
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: RetryPolicy,
    mut operation: F,
    is_retryable: fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                if !is_retryable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }

                let backoff = policy.backoff(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "request failed, retrying"
                );

                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
