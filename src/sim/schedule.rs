//! Pacing and clock for a sweep.
//!
//! The real scheduler blocks the thread between frames. The virtual one
//! only advances a counter, so tests run at full speed with stable timings.

use std::thread;
use std::time::{Duration, Instant};

pub trait Scheduler {
    /// Block (or pretend to) for `duration`.
    fn wait(&mut self, duration: Duration);

    /// Time since the last `restart`.
    fn elapsed(&self) -> Duration;

    /// Start measuring from now.
    fn restart(&mut self);
}

#[derive(Debug, Clone)]
pub struct RealTimeScheduler {
    started: Instant,
}

impl RealTimeScheduler {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Default for RealTimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RealTimeScheduler {
    fn wait(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn restart(&mut self) {
        self.started = Instant::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    now: Duration,
    waits: usize,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `wait` calls since creation.
    pub fn waits(&self) -> usize {
        self.waits
    }
}

impl Scheduler for VirtualScheduler {
    fn wait(&mut self, duration: Duration) {
        self.now += duration;
        self.waits += 1;
    }

    fn elapsed(&self) -> Duration {
        self.now
    }

    fn restart(&mut self) {
        self.now = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_scheduler_advances_without_sleeping() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.wait(Duration::from_millis(500));
        scheduler.wait(Duration::from_millis(500));
        assert_eq!(scheduler.elapsed(), Duration::from_secs(1));
        assert_eq!(scheduler.waits(), 2);

        scheduler.restart();
        assert_eq!(scheduler.elapsed(), Duration::ZERO);
        assert_eq!(scheduler.waits(), 2);
    }

    #[test]
    fn test_real_scheduler_measures_sleep() {
        let mut scheduler = RealTimeScheduler::new();
        scheduler.wait(Duration::from_millis(5));
        assert!(scheduler.elapsed() >= Duration::from_millis(5));
    }
}
