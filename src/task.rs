//! Task entities for pacer.
//!
//! A task is one unit of backlog work: a title, an effort size in points,
//! and an optional completion timestamp. Completed tasks contribute to
//! velocity for as long as their completion falls inside the trailing
//! window (see `velocity`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier, independent of backlog position.
pub type TaskId = Uuid;

/// Sizes below this are coerced up at every entry point.
pub const MIN_TASK_SIZE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create an incomplete task. A size below `MIN_TASK_SIZE` is coerced
    /// to `MIN_TASK_SIZE` so the `size >= 1` invariant holds everywhere.
    pub fn new(title: impl Into<String>, size: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            size: size.max(MIN_TASK_SIZE),
            completed_at: None,
        }
    }

    /// Mark the task completed at the given time.
    ///
    /// Completion is sticky: a later call moves the timestamp, but nothing
    /// in this API returns a task to the incomplete state.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether this task's completion falls inside the trailing window of
    /// `window_days` ending at `now`.
    ///
    /// The boundary is exclusive on the old side: a task completed exactly
    /// `window_days` ago no longer counts. Ages are compared as durations
    /// rather than by shifting `now`, which would overflow the datetime
    /// range for very large windows.
    pub fn counts_toward_velocity(&self, now: DateTime<Utc>, window_days: u32) -> bool {
        match self.completed_at {
            Some(completed_at) => {
                now.signed_duration_since(completed_at) < Duration::days(i64::from(window_days))
            }
            None => false,
        }
    }

    /// Size if the task counts toward velocity, zero otherwise.
    pub fn velocity_contribution(&self, now: DateTime<Utc>, window_days: u32) -> u32 {
        if self.counts_toward_velocity(now, window_days) {
            self.size
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_incomplete() {
        let task = Task::new("write docs", 3);
        assert!(!task.is_complete());
        assert_eq!(task.size, 3);
        assert_eq!(task.velocity_contribution(Utc::now(), 21), 0);
    }

    #[test]
    fn size_is_coerced_to_minimum() {
        assert_eq!(Task::new("tiny", 0).size, 1);
    }

    #[test]
    fn completion_is_sticky() {
        let now = Utc::now();
        let mut task = Task::new("ship it", 2);
        task.mark_completed(now);
        assert!(task.is_complete());
        assert_eq!(task.completed_at, Some(now));
    }

    #[test]
    fn recent_completion_counts_toward_velocity() {
        let now = Utc::now();
        let mut task = Task::new("recent", 3);
        task.mark_completed(now - Duration::days(1));
        assert!(task.counts_toward_velocity(now, 21));
        assert_eq!(task.velocity_contribution(now, 21), 3);
    }

    #[test]
    fn old_completion_does_not_count() {
        let now = Utc::now();
        let mut task = Task::new("ancient", 2);
        task.mark_completed(now - Duration::days(180));
        assert!(!task.counts_toward_velocity(now, 21));
        assert_eq!(task.velocity_contribution(now, 21), 0);
    }

    #[test]
    fn enormous_window_does_not_overflow_date_arithmetic() {
        let now = Utc::now();
        let mut task = Task::new("recent", 2);
        task.mark_completed(now - Duration::days(1));
        assert!(task.counts_toward_velocity(now, 4_000_000_000));
        assert_eq!(task.velocity_contribution(now, u32::MAX), 2);
    }

    #[test]
    fn window_boundary_is_exclusive_on_the_old_side() {
        let now = Utc::now();
        let mut task = Task::new("boundary", 5);
        task.mark_completed(now - Duration::days(21));
        assert!(!task.counts_toward_velocity(now, 21));

        task.mark_completed(now - Duration::days(21) + Duration::seconds(1));
        assert!(task.counts_toward_velocity(now, 21));
    }
}
