use std::time::Duration;

/// Configures the retry sequence applied to every portal request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per logical call, including the first. Treated as 1
    /// when set to 0.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds (exponential strategy).
    pub base_delay_ms: u64,
    /// Multiplier applied per retry.
    pub backoff_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            backoff_multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Effective attempt count, never below one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay inserted before attempt `attempt` (0-based).
    ///
    /// Attempt 0 has no preceding delay; attempt i waits
    /// `base_delay_ms * multiplier^(i-1)`. The exponent is capped and the
    /// multiplication saturates, so large indices stay finite.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exp = (attempt - 1).min(16);
        let factor = u64::from(self.backoff_multiplier).saturating_pow(exp);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::RetryPolicy;
    use std::time::Duration;

    #[test]
    fn default_policy_matches_portal_settings() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 1_000);
        assert_eq!(policy.backoff_multiplier, 2);
    }

    #[test]
    fn delays_double_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(0), Duration::ZERO);
        assert_eq!(policy.delay_before(1), Duration::from_millis(1_000));
        assert_eq!(policy.delay_before(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_before(3), Duration::from_millis(4_000));
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn huge_attempt_index_does_not_overflow() {
        let policy = RetryPolicy {
            max_attempts: u32::MAX,
            base_delay_ms: u64::MAX,
            backoff_multiplier: u32::MAX,
        };
        // Saturates instead of panicking.
        let _ = policy.delay_before(u32::MAX);
    }
}
