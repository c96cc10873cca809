//! Retry mechanism with fixed backoff
//!
//! Every remote operation (connect, list, download, upload) goes through
//! [`retry_with_backoff`], so they share one attempt/backoff/exhaustion shape.

use crate::config::RetryConfig;
use crate::error::{Error, Result};

/// Retry a fallible async operation with a fixed pause between attempts
///
/// Returns the first success. When an error is not retryable, or the
/// last attempt fails, that error is returned and earlier ones are dropped.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation` - Async closure that returns `Result<T>`
/// * `is_retryable` - Closure that determines if an error should trigger retry
///
/// # Example
/// ```ignore
/// let keys = retry_with_backoff(
///     &config,
///     || async move { store.list_objects(bucket, prefix).await },
///     is_retryable_error,
/// ).await?;
/// ```
pub async fn retry_with_backoff<T, F, Fut, R>(
    config: &RetryConfig,
    mut operation: F,
    is_retryable: R,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
    R: Fn(&Error) -> bool,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt >= config.max_attempts || !is_retryable(&e) {
                    return Err(e);
                }

                let backoff = config.backoff();
                tracing::debug!(
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    backoff_ms = backoff.as_millis(),
                    error = %e,
                    "Retrying after failed attempt"
                );

                tokio::time::sleep(backoff).await;
            }
        }
    }
}

/// Check if an error is worth retrying
///
/// Anything the remote side or the transport produced is treated as
/// transient. Path and configuration problems fail the same way every time.
pub fn is_retryable_error(error: &Error) -> bool {
    match error {
        Error::InvalidPath(_) | Error::Config(_) => false,
        // Already the outcome of an exhausted retry loop
        Error::Connection { .. }
        | Error::List { .. }
        | Error::Download { .. }
        | Error::Upload { .. } => false,
        Error::Network(_) | Error::ContentLengthMismatch { .. } | Error::Io(_) => true,
    }
}

/// Retry configuration builder for easy customization
#[derive(Debug, Clone)]
pub struct RetryBuilder {
    max_attempts: u32,
    backoff_ms: u64,
}

impl RetryBuilder {
    pub fn new() -> Self {
        let defaults = RetryConfig::default();
        Self {
            max_attempts: defaults.max_attempts,
            backoff_ms: defaults.backoff_ms,
        }
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn backoff_ms(mut self, ms: u64) -> Self {
        self.backoff_ms = ms;
        self
    }

    pub fn build(self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            backoff_ms: self.backoff_ms,
        }
    }
}

impl Default for RetryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_is_retryable_error() {
        assert!(is_retryable_error(&Error::Network(
            "connection timeout".to_string()
        )));
        assert!(is_retryable_error(&Error::ContentLengthMismatch {
            expected: 10,
            received: 4,
        }));

        assert!(!is_retryable_error(&Error::InvalidPath(
            "missing bucket".to_string()
        )));
        assert!(!is_retryable_error(&Error::Config(
            "bad endpoint".to_string()
        )));
    }

    #[test]
    fn test_retry_builder() {
        let config = RetryBuilder::new().max_attempts(5).backoff_ms(200).build();

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff_ms, 200);
    }

    #[test]
    fn test_retry_builder_defaults() {
        assert_eq!(RetryBuilder::default().build(), RetryConfig::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_first_attempt() {
        let config = RetryConfig::default();
        let mut calls = 0;
        let start = Instant::now();

        let result = retry_with_backoff(
            &config,
            || {
                calls += 1;
                async { Ok::<_, Error>(42) }
            },
            is_retryable_error,
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed().as_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_after_failures() {
        for failures in 0..3u32 {
            let config = RetryConfig::default();
            let call_count = Arc::new(AtomicU32::new(0));
            let start = Instant::now();

            let result = retry_with_backoff(
                &config,
                || {
                    let cc = call_count.clone();
                    async move {
                        let count = cc.fetch_add(1, Ordering::SeqCst);
                        if count < failures {
                            Err(Error::Network("timeout".to_string()))
                        } else {
                            Ok(count)
                        }
                    }
                },
                is_retryable_error,
            )
            .await;

            assert_eq!(result.unwrap(), failures);
            assert_eq!(call_count.load(Ordering::SeqCst), failures + 1);
            assert_eq!(start.elapsed().as_secs(), u64::from(failures));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhausted_returns_last_error() {
        let config = RetryConfig::default();
        let mut calls = 0;
        let start = Instant::now();

        let result: Result<()> = retry_with_backoff(
            &config,
            || {
                calls += 1;
                let msg = format!("failure {calls}");
                async move { Err(Error::Network(msg)) }
            },
            is_retryable_error,
        )
        .await;

        match result {
            Err(Error::Network(msg)) => assert_eq!(msg, "failure 3"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(calls, 3);
        assert_eq!(start.elapsed().as_secs(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_non_retryable() {
        let config = RetryConfig::default();
        let mut calls = 0;

        let result: Result<()> = retry_with_backoff(
            &config,
            || {
                calls += 1;
                async { Err(Error::InvalidPath("missing bucket".to_string())) }
            },
            is_retryable_error,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_single_attempt() {
        let config = RetryBuilder::new().max_attempts(1).build();
        let mut calls = 0;

        let result: Result<()> = retry_with_backoff(
            &config,
            || {
                calls += 1;
                async { Err(Error::Network("down".to_string())) }
            },
            |_| true,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
