use std::time::Duration;

use crate::config::RetryConfig;

/// Why a page fetch failed, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    /// 429 or 503: the site wants fewer requests.
    Throttled,
    /// Connect, DNS or transfer failure.
    Connection,
    Http5xx(u16),
    /// 4xx and everything else; a retry would get the same answer.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Capped exponential backoff for page fetches.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per page, the first one included. Never zero.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Builds the policy from the `[retry]` config section.
    /// A base delay too large for a `Duration` (e.g. infinite)
    /// falls back to `max_delay`.
    pub fn from_config(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::try_from_secs_f64(cfg.base_delay_secs.max(0.0))
                .unwrap_or(max_delay),
            max_delay,
        }
    }

    /// Decides what to do after failed attempt number `attempt` (1-based).
    ///
    /// The delay is `base * 2^(attempt-1)`, capped at `max_delay`. Throttled
    /// responses start one doubling later so a busy site gets more room.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        let doublings = match kind {
            ErrorKind::Other => return RetryDecision::NoRetry,
            ErrorKind::Throttled => attempt,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http5xx(_) => attempt - 1,
        };
        let factor = 1u32 << doublings.min(10);
        RetryDecision::RetryAfter(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
