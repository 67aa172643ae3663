//! Exponential backoff for transport retries.

use std::time::Duration;

use crate::error::ClientError;
use crate::method::RestMethod;

/// Multiplier applied to the delay after each retry.
const RETRY_MULTIPLIER: f64 = 2.0;

/// Upper bound for a single retry delay.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Delay sequence for successive retries: initial, ×2, capped at 30 s.
#[derive(Debug, Clone)]
pub(crate) struct Backoff {
    next: Duration,
}

impl Backoff {
    pub(crate) fn new(initial: Duration) -> Self {
        Self {
            next: initial.min(MAX_RETRY_DELAY),
        }
    }

    pub(crate) fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = std::cmp::min(
            Duration::from_secs_f64(delay.as_secs_f64() * RETRY_MULTIPLIER),
            MAX_RETRY_DELAY,
        );
        delay
    }
}

/// Rate limiting is retried for every method; other transient failures
/// only for idempotent ones.
pub(crate) fn should_retry(error: &ClientError, method: RestMethod) -> bool {
    if !error.is_retryable() {
        return false;
    }
    error.status_code() == Some(429) || method.is_idempotent()
}
