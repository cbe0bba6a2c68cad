//! Bounded retry for the model capability clients.
//!
//! Transport-level failures (connection reset, timeout) are retried with
//! exponential backoff. Application-level failures — a non-success status, a
//! body that does not parse, a count mismatch — are propagated immediately,
//! since retrying would return the same answer.

use std::future::Future;
use std::time::Duration;

use crate::error::EnrichError;

fn is_retriable(err: &EnrichError) -> bool {
    matches!(err, EnrichError::Http(_))
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// Sleeps `backoff_base_secs * 2^attempt` seconds between attempts, up to
/// `max_retries` retries after the initial try. The last error is returned
/// once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, EnrichError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EnrichError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_secs,
                    error = %err,
                    "transient model call failure — retrying after backoff"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
