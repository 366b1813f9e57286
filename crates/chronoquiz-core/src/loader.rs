//! Event pool loading with bounded retries.
//!
//! Transient source failures are retried with exponential backoff; permanent
//! ones (bad configuration, malformed payload) fail on the first attempt.

use std::time::Duration;

use crate::error::QuizError;
use crate::parser::ParsedPool;
use crate::traits::EventSource;

/// How often and how patiently to retry a fetch.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after every failure.
    pub initial_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Default::default()
        }
    }
}

/// Fetch the event pool from `source`, retrying transient failures.
///
/// Returns `DataFetchFailure` once attempts are exhausted (or on a permanent
/// error) and `InsufficientData` when the source answers with no events.
pub async fn load_pool(
    source: &dyn EventSource,
    policy: &RetryPolicy,
) -> Result<ParsedPool, QuizError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 0;

    loop {
        attempt += 1;
        match source.fetch().await {
            Ok(parsed) => {
                tracing::info!(
                    "loaded {} events from {} (attempt {attempt})",
                    parsed.pool.len(),
                    source.name()
                );
                if parsed.pool.is_empty() {
                    return Err(QuizError::InsufficientData);
                }
                return Ok(parsed);
            }
            Err(e) => {
                tracing::warn!(
                    "attempt {attempt}/{max_attempts} to load events from {} failed: {e}",
                    source.name()
                );
                if e.is_permanent() || attempt >= max_attempts {
                    return Err(QuizError::DataFetchFailure {
                        attempts: attempt,
                        source: e,
                    });
                }
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(policy.max_delay);
            }
        }
    }
}
