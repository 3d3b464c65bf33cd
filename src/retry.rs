//! Retry policy for remote fetch attempts.
//!
//! The growth factor is an explicit, configurable parameter: the default is
//! exponential doubling, and a multiplier of `1.0` gives constant backoff.
//! Delays are capped so the worst-case latency of a cache miss stays bounded
//! by `max_attempts` times the capped schedule.

use std::time::Duration;

/// Default number of fetch attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Default growth factor applied per failed attempt.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Default cap on any single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Backoff schedule for the retrying fetch loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of fetch attempts (not retries-after-first).
    pub max_attempts: u32,

    /// Delay after the first failed attempt.
    pub base_delay: Duration,

    /// Factor the delay grows by after each failure. Values below `1.0` are
    /// treated as `1.0`: the schedule never shrinks between attempts.
    pub multiplier: f64,

    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default exponential growth and delay cap.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay, ..Self::default() }
    }

    /// Set the growth factor.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay to sleep after failed attempt `attempt` (0-indexed).
    ///
    /// Pure function of the policy, so schedules are testable without
    /// sleeping: `base_delay * multiplier^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.multiplier.max(1.0);
        let factor = multiplier.powi(attempt.min(i32::MAX as u32) as i32);
        // A large multiplier/attempt overflows to infinity; the cap absorbs it.
        let secs = (self.base_delay.as_secs_f64() * factor).min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.multiplier, 2.0);
        assert_eq!(policy.max_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_exponential_growth() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn test_multiplier_one_gives_constant_backoff() {
        let policy = RetryPolicy::new(5, Duration::from_millis(50)).with_multiplier(1.0);
        for attempt in 0..5 {
            assert_eq!(policy.delay_for_attempt(attempt), Duration::from_millis(50));
        }
    }

    #[test]
    fn test_delay_is_capped() {
        let policy =
            RetryPolicy::new(10, Duration::from_millis(100)).with_max_delay(Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(20), Duration::from_secs(1));
    }

    #[test]
    fn test_shrinking_multiplier_treated_as_constant() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100)).with_multiplier(0.5);
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(100));
    }

    #[test]
    fn test_huge_attempt_count_saturates_at_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(u32::MAX), policy.max_delay);
    }

    proptest! {
        #[test]
        fn prop_delays_never_shrink_and_respect_cap(
            attempt in 0u32..64,
            base_ms in 1u64..1_000,
            multiplier in 0.0f64..8.0,
        ) {
            let policy = RetryPolicy::new(3, Duration::from_millis(base_ms))
                .with_multiplier(multiplier)
                .with_max_delay(Duration::from_secs(60));

            let delay = policy.delay_for_attempt(attempt);
            let next = policy.delay_for_attempt(attempt + 1);

            prop_assert!(next >= delay);
            prop_assert!(delay <= policy.max_delay);
        }
    }
}
