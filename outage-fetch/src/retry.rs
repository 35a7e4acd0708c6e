//! Retry policy for transient server errors.

use std::time::Duration;

/// Default number of retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default backoff unit.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(1500);

/// Linear backoff schedule for HTTP 500 responses.
///
/// Retry `n` (1-based) waits `(n - 1) * backoff_unit`, so the first retry
/// is immediate and the default schedule is 0, 1.5, 3, 4.5 and 6 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Step added to the delay on each retry.
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the default backoff unit.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }

    /// Sets the backoff unit.
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.backoff_unit * retry.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_retry(1), Duration::ZERO);
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(1500));
        assert_eq!(policy.delay_for_retry(3), Duration::from_secs(3));
        assert_eq!(policy.delay_for_retry(4), Duration::from_millis(4500));
        assert_eq!(policy.delay_for_retry(5), Duration::from_secs(6));
    }

    #[test]
    fn test_custom_unit() {
        let policy = RetryPolicy::new(3).with_backoff_unit(Duration::from_millis(2));
        assert_eq!(policy.delay_for_retry(3), Duration::from_millis(4));
        assert_eq!(policy.max_retries, 3);
    }
}
