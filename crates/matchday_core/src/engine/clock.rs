//! Suspension primitive used by the playback scheduler.

use std::time::Duration;

pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never blocks; accumulates the time that would have been slept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualClock {
    elapsed: Duration,
    sleeps: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }
}

impl Clock for VirtualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.sleeps += 1;
    }
}

/// Milliseconds to a `Duration`, treating negative and NaN as zero.
pub(crate) fn millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_micros((ms * 1000.0).round() as u64)
    } else {
        Duration::ZERO
    }
}
