//! Retry schedule for rate-limited (HTTP 429) responses.

use std::time::Duration;

/// Tunable parameters for 429 retries.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Delay after the n-th throttled attempt (index 0 after the first).
    /// The last entry repeats if there are more retries than entries.
    pub delays: Vec<Duration>,
    /// Total attempts per fetch, including the first one.
    pub max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            delays: [5, 10, 20, 40, 80].map(Duration::from_secs).to_vec(),
            max_attempts: 5,
        }
    }
}

impl BackoffPolicy {
    /// Delay to wait after throttled attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let idx = attempt.saturating_sub(1) as usize;
        self.delays
            .get(idx)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Whether another attempt is allowed after `attempt` attempts.
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence() {
        let policy = BackoffPolicy::default();
        let delays: Vec<u64> = (1..=5).map(|a| policy.delay_after(a).as_secs()).collect();
        assert_eq!(delays, [5u64, 10, 20, 40, 80]);
    }

    #[test]
    fn last_delay_repeats() {
        let policy = BackoffPolicy {
            delays: vec![Duration::from_secs(1), Duration::from_secs(3)],
            max_attempts: 10,
        };
        assert_eq!(policy.delay_after(7), Duration::from_secs(3));
    }

    #[test]
    fn empty_schedule_retries_immediately() {
        let policy = BackoffPolicy {
            delays: Vec::new(),
            max_attempts: 3,
        };
        assert_eq!(policy.delay_after(1), Duration::ZERO);
    }

    #[test]
    fn retry_budget_counts_total_attempts() {
        let policy = BackoffPolicy::default();
        assert!(policy.allows_retry(4));
        assert!(!policy.allows_retry(5));
    }
}
