//! The delay-then-invoke primitive behind autosave coalescing.
//!
//! A [`Debouncer`] holds at most one pending deadline. Every [`trigger`]
//! supersedes the previous deadline, so a burst of edits collapses into a
//! single firing once input has been quiescent for the configured delay.
//!
//! The clock is passed in explicitly — the embedding shell drives
//! [`fire_if_due`] from its event loop, and tests drive it with synthetic
//! instants.
//!
//! [`trigger`]: Debouncer::trigger
//! [`fire_if_due`]: Debouncer::fire_if_due

use std::time::{Duration, Instant};

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

    /// Restart the delay, cancelling any not-yet-fired deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// One-shot: returns true exactly once per elapsed deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
