//! A cancelable repeating timer driven by the caller's clock.
//!
//! Nothing runs in the background: the event loop asks how long it may sleep
//! (`next_deadline`) and then polls the timer with the current instant.

use std::time::{Duration, Instant};

/// Repeating tick schedule that can be cancelled and restarted.
#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Timer {
    /// Creates a stopped timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the first tick one interval after `now`, replacing any
    /// pending schedule.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Drops the pending tick, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true if a tick is scheduled.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the next tick is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns how many ticks elapsed up to `now` and reschedules past them.
    ///
    /// A stopped timer never reports ticks.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }
        if self.interval.is_zero() {
            self.deadline = Some(now);
            return 1;
        }

        let overdue = now.duration_since(deadline);
        let ticks = 1 + (overdue.as_nanos() / self.interval.as_nanos()) as u32;
        self.deadline = Some(deadline + self.interval * ticks);
        ticks
    }
}
