//! Exponential-backoff retry policy for rate-limited fetches.

use std::time::Duration;

/// Backoff schedule: attempt `n` (0-based) waits `base * 2^n` before the
/// next try. No jitter, no circuit breaker; after `max_attempts` tries the
/// final error is propagated to the caller.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Returns the delay to sleep after a failed attempt (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_attempts_from_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(4), Duration::from_secs(16));
    }

    #[test]
    fn delay_scales_with_base() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
        };
        assert_eq!(policy.delay(2), Duration::from_millis(40));
    }
}
