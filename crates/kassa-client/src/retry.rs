//! # Retry Policy
//!
//! Exponential backoff for transient transport failures. The delay before
//! retry `n` (1-based) is `base_delay * 2^n`, capped at `max_delay`, so the
//! default policy waits 2s, 4s, 8s, 16s and 32s. A server-supplied wait
//! (`retry_after`) replaces the computed delay, within the same cap.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff settings, fixed per connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (default: 5)
    pub max_retries: u32,
    /// Base of the exponential delay (default: 1s)
    pub base_delay: Duration,
    /// Upper bound for a single delay (default: 60s)
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
        }
    }
}

/// Why an outcome should be retried, with an optional server-suggested wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryHint {
    pub reason: String,
    pub after: Option<Duration>,
}

impl RetryHint {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            after: None,
        }
    }

    /// Builder: wait this long instead of the backoff delay
    pub fn after(mut self, delay: Duration) -> Self {
        self.after = Some(delay);
        self
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Builder: set retry count
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builder: set base delay
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before the given retry (1-based)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `operation` until `should_retry` rejects its outcome or retries run out.
    ///
    /// The operation receives the zero-based attempt number. The last outcome
    /// is returned as is, whether it was retryable or not. A hint's `after`
    /// overrides the backoff delay, capped at `max_delay`.
    pub async fn run<F, Fut, T, P>(&self, mut operation: F, should_retry: P) -> T
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = T>,
        P: Fn(&T) -> Option<RetryHint>,
    {
        let mut attempt = 0;
        loop {
            let outcome = operation(attempt).await;

            let hint = match should_retry(&outcome) {
                Some(hint) if attempt < self.max_retries => hint,
                _ => return outcome,
            };

            attempt += 1;
            let delay = match hint.after {
                Some(after) => after.min(self.max_delay),
                None => self.delay_for_retry(attempt),
            };
            warn!(
                attempt,
                max_retries = self.max_retries,
                reason = %hint.reason,
                "Retry attempt"
            );
            debug!(delay_ms = delay.as_millis() as u64, "Sleeping before retry");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_retry(5), Duration::from_secs(32));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(6), Duration::from_secs(60));
        assert_eq!(policy.delay_for_retry(40), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let outcome: Result<u32, String> = policy
            .run(
                |attempt| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if attempt < 2 {
                            Err("503".to_string())
                        } else {
                            Ok(attempt)
                        }
                    }
                },
                |outcome| outcome.as_ref().err().map(RetryHint::new),
            )
            .await;

        assert_eq!(outcome, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default().with_max_retries(2);

        let outcome: Result<(), String> = policy
            .run(
                |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("connection reset".to_string()) }
                },
                |outcome| outcome.as_ref().err().map(RetryHint::new),
            )
            .await;

        assert!(outcome.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_overrides_backoff() {
        let policy = RetryPolicy::default().with_base_delay(Duration::from_secs(10));
        let started = tokio::time::Instant::now();

        let outcome: Result<u32, String> = policy
            .run(
                |attempt| async move {
                    if attempt == 0 {
                        Err("429".to_string())
                    } else {
                        Ok(attempt)
                    }
                },
                |outcome| {
                    outcome
                        .as_ref()
                        .err()
                        .map(|reason| RetryHint::new(reason).after(Duration::from_millis(250)))
                },
            )
            .await;

        assert_eq!(outcome, Ok(1));
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(250) && waited < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_is_capped() {
        let policy = RetryPolicy::default();
        let started = tokio::time::Instant::now();

        let _: Result<(), String> = policy
            .with_max_retries(1)
            .run(
                |_| async { Err("429".to_string()) },
                |outcome| {
                    outcome
                        .as_ref()
                        .err()
                        .map(|reason| RetryHint::new(reason).after(Duration::from_secs(3600)))
                },
            )
            .await;

        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(60) && waited < Duration::from_secs(61));
    }

    #[tokio::test]
    async fn test_no_retry_when_not_retryable() {
        let calls = AtomicU32::new(0);

        let outcome = RetryPolicy::default()
            .run(
                |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { 400u16 }
                },
                |_| None,
            )
            .await;

        assert_eq!(outcome, 400);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
