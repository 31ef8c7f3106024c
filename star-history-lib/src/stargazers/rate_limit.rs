use super::client::RateLimit;
use chrono::{DateTime, Utc};
use core::time::Duration;

/// Default ceiling on a single wait for the quota to reset.
pub const DEFAULT_MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(3600);

/// Decides whether fetching must pause until the API quota is replenished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Pause when fewer than this many requests remain.
    pub min_remaining: u64,

    /// Never wait longer than this for a reset.
    pub max_wait: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            min_remaining: 1,
            max_wait: DEFAULT_MAX_RATE_LIMIT_WAIT,
        }
    }
}

impl RateLimitPolicy {
    /// How long to wait before the next request, given the current quota.
    ///
    /// Zero when enough quota remains or when the reset time has already passed.
    #[must_use]
    pub fn wait_duration(&self, rate: &RateLimit, now: DateTime<Utc>) -> Duration {
        if rate.remaining >= self.min_remaining {
            return Duration::ZERO;
        }

        let Some(reset_at) = rate.reset_at() else {
            return Duration::ZERO;
        };

        (reset_at - now).to_std().map_or(Duration::ZERO, |wait| wait.min(self.max_wait))
    }
}
