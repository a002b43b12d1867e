//! Velocity computation over a trailing window.
//!
//! Velocity is the total size of tasks completed within the trailing
//! window, used as a throughput estimate. The window length is
//! configuration (`.pacer.toml`), threaded in explicitly rather than read
//! from a global, and `now` is always an explicit parameter so results are
//! deterministic under test.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Default trailing window length in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 21;

#[derive(Debug, Clone, Copy)]
pub struct VelocityCalculator {
    window_days: u32,
}

impl VelocityCalculator {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Total size completed within the trailing window ending at `now`.
    /// An empty task sequence yields 0, not an error. Accumulates in `u64`
    /// so a run of maximum-size completions cannot overflow.
    pub fn completed_velocity(&self, tasks: &[Task], now: DateTime<Utc>) -> u64 {
        tasks
            .iter()
            .map(|task| u64::from(task.velocity_contribution(now, self.window_days)))
            .sum()
    }
}

impl Default for VelocityCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}
