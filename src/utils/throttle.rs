use std::time::{Duration, Instant};

/// Gate that opens at most once per fixed interval, regardless of how often
/// it is asked. The host fires time-update events many times per second; the
/// persistence path must not.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_pass: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None,
        }
    }

    /// Returns true when the interval has elapsed since the last passing
    /// call (or on the very first call), consuming the window.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last_pass {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_pass = Some(now);
                true
            }
        }
    }

    /// Reset so the next `ready()` passes immediately.
    pub fn reset(&mut self) {
        self.last_pass = None;
    }
}
