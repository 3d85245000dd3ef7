use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::constants::{RETRY_DELAY, RETRY_MAX_ATTEMPTS};

/// Bounded fixed-delay poll of a condition that is expected to start
/// succeeding once the host finishes initializing (player object attached,
/// audio tracks loaded, badge element rendered).
///
/// Exhausting the attempts is not an error: the caller abandons the
/// dependent action and the tick carries on without it.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            delay: RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Poll `f` until it yields a value, up to the attempt ceiling.
    pub async fn run<T, F>(&self, operation_name: &str, mut f: F) -> Option<T>
    where
        F: FnMut() -> Option<T>,
    {
        for attempt in 1..=self.max_attempts.max(1) {
            if let Some(value) = f() {
                if attempt > 1 {
                    debug!("{}: ready after {} attempts", operation_name, attempt);
                }
                return Some(value);
            }
            if attempt < self.max_attempts {
                sleep(self.delay).await;
            }
        }
        warn!(
            "{}: still not ready after {} attempts, giving up",
            operation_name, self.max_attempts
        );
        None
    }
}
