//! Retry policies for HTTP requests.
//!
//! Mutating endpoints (order creation, confirmation, refunds) never retry:
//! a failed attempt is surfaced to the caller, who decides whether to resubmit.
//! Read endpoints retry transient transport failures with exponential backoff.

use std::time::Duration;

/// Retry policy for a single HTTP request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// No retries. The default, and the only policy used for mutations.
    #[default]
    None,
    /// Retry transport failures and 429/502/503/504 with backoff.
    /// Used for GET endpoints.
    Idempotent,
}

/// Exponential backoff schedule for idempotent retries.
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Retry attempts after the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling for any single delay.
    pub max_delay: Duration,
    /// Whether to spread delays with random jitter.
    pub jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Whether an HTTP status is worth retrying.
    pub fn retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Delay for a given attempt (0-indexed), doubling each time.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64 * 2f64.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * spread;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_none() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::None);
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 502, 503, 504] {
            assert!(Backoff::retryable_status(status));
        }
        for status in [400, 401, 403, 404, 500] {
            assert!(!Backoff::retryable_status(status));
        }
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let backoff = Backoff {
            jitter: false,
            ..Backoff::default()
        };
        assert_eq!(backoff.delay_for_attempt(0).as_millis(), 200);
        assert_eq!(backoff.delay_for_attempt(1).as_millis(), 400);
        assert_eq!(backoff.delay_for_attempt(2).as_millis(), 800);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let backoff = Backoff {
            max_retries: 8,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            jitter: false,
        };
        assert_eq!(backoff.delay_for_attempt(6).as_millis(), 3000);
    }
}
