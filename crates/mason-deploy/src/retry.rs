//! Retry policy for failed deployment attempts.

use std::time::Duration;

/// How many times to attempt a deployment and how long to wait between
/// attempts.
///
/// Backoff is exponential: the wait after attempt `n` is
/// `base_backoff * 2^(n - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Wait after the first failed attempt.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit attempt and backoff settings.
    #[must_use]
    pub const fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts,
            base_backoff,
        }
    }

    /// Wait time after the given 1-based attempt number fails.
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_backoff.saturating_mul(1_u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_after(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_saturates_on_large_attempt_numbers() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        let capped = policy.backoff_after(u32::MAX);

        assert!(capped >= policy.backoff_after(31));
    }

    #[test]
    fn test_default_allows_three_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts, 3);
    }
}
