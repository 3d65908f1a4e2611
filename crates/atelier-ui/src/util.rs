#![forbid(unsafe_code)]

//! Tick-driven rate limiters for event handlers.
//!
//! [`Debouncer`] fires on the trailing edge once calls stop arriving;
//! [`Throttle`] passes the leading call and drops the rest of the window.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer: `poll` fires once `delay` has elapsed since
/// the last `trigger`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event, pushing the deadline out.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once per burst, after the delay lapses quietly.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Leading-edge throttle: the first call passes, the window swallows the
/// rest.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    open_at: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            open_at: None,
        }
    }

    /// Whether a call at `now` may proceed.
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.open_at {
            Some(open_at) if now < open_at => false,
            _ => {
                self.open_at = Some(now + self.interval);
                true
            }
        }
    }
}
