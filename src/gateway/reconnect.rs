use std::time::Duration;

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Decides how long to wait before the next connection attempt.
pub trait ReconnectPolicy: Send {
    /// `failures` counts consecutive attempts that ended without the relay
    /// ever accepting a connection. `None` stops reconnecting.
    fn next_delay(&mut self, failures: u32) -> Option<Duration>;
}

/// Same delay every time, forever.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy for FixedDelay {
    fn next_delay(&mut self, _failures: u32) -> Option<Duration> {
        Some(self.0)
    }
}

/// Doubling delay, capped, optionally giving up after `max_attempts`.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    pub base: Duration,
    pub max: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            max: Duration::from_secs(30),
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy for ExponentialBackoff {
    fn next_delay(&mut self, failures: u32) -> Option<Duration> {
        if self.max_attempts.is_some_and(|max| failures >= max) {
            return None;
        }
        let factor = 1u32.checked_shl(failures).unwrap_or(u32::MAX);
        Some(self.base.saturating_mul(factor).min(self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_is_unbounded() {
        let mut policy = FixedDelay::default();
        for failures in [0, 1, 10, u32::MAX] {
            assert_eq!(policy.next_delay(failures), Some(Duration::from_secs(1)));
        }
    }

    #[test]
    fn test_exponential_backoff_doubles_and_caps() {
        let mut policy = ExponentialBackoff::default();
        assert_eq!(policy.next_delay(0), Some(Duration::from_secs(1)));
        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(4), Some(Duration::from_secs(16)));
        assert_eq!(policy.next_delay(5), Some(Duration::from_secs(30)));
        assert_eq!(policy.next_delay(40), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_exponential_backoff_gives_up() {
        let mut policy = ExponentialBackoff {
            max_attempts: Some(3),
            ..Default::default()
        };
        assert!(policy.next_delay(2).is_some());
        assert!(policy.next_delay(3).is_none());
    }
}
