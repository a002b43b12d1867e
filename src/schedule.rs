//! Schedule projection.
//!
//! Projects remaining work against recent throughput and compares the
//! result to the project's due date. Degenerate inputs never raise:
//! division by a zero rate produces the IEEE non-finite sentinels (NaN for
//! 0/0, +inf for work with no velocity) and the on-schedule verdict
//! interprets those explicitly. Callers probing `projected_days_remaining`
//! must check finiteness rather than assume a meaningful number.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::project::Project;
use crate::velocity::VelocityCalculator;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleProjector {
    velocity: VelocityCalculator,
}

/// Serializable snapshot of every derived metric, the surface consumed by
/// rendering and reporting collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub generated_at: DateTime<Utc>,
    pub window_days: u32,
    pub total_size: u64,
    pub remaining_size: u64,
    pub completed_velocity: u64,
    pub current_rate: f64,
    /// May be NaN or +inf; serialized as null in JSON output.
    pub projected_days_remaining: f64,
    pub done: bool,
    pub on_schedule: bool,
}

impl ScheduleProjector {
    pub fn new(velocity: VelocityCalculator) -> Self {
        Self { velocity }
    }

    pub fn window_days(&self) -> u32 {
        self.velocity.window_days()
    }

    /// Completed velocity spread over the window, in points per day.
    /// A real number, possibly 0.0, never undefined.
    pub fn current_rate(&self, project: &Project, now: DateTime<Utc>) -> f64 {
        self.velocity.completed_velocity(&project.tasks, now) as f64
            / f64::from(self.velocity.window_days())
    }

    /// Remaining work divided by the current daily rate.
    ///
    /// 0 remaining at rate 0 is NaN (explicitly not "zero days"); positive
    /// remaining at rate 0 is +inf (never finishing).
    pub fn projected_days_remaining(&self, project: &Project, now: DateTime<Utc>) -> f64 {
        project.remaining_size() as f64 / self.current_rate(project, now)
    }

    /// On-schedule verdict against the project due date.
    ///
    /// No due date means there is nothing to be late against, so the
    /// verdict is true regardless of the projection; that check takes
    /// priority over the non-finite check. With a due date present, a
    /// non-finite projection is never on schedule (unknown risk is risk).
    pub fn on_schedule(&self, project: &Project, now: DateTime<Utc>) -> bool {
        let Some(due_date) = project.due_date else {
            return true;
        };

        let days = self.projected_days_remaining(project, now);
        if !days.is_finite() {
            return false;
        }

        let seconds = (days * 86_400.0).round();
        if seconds >= i64::MAX as f64 {
            return false;
        }
        let Some(delta) = Duration::try_seconds(seconds as i64) else {
            return false;
        };
        match now.checked_add_signed(delta) {
            Some(projected) => projected.date_naive() <= due_date,
            None => false,
        }
    }

    /// Bundle every derived metric for the given moment.
    pub fn report(&self, project: &Project, now: DateTime<Utc>) -> ScheduleReport {
        ScheduleReport {
            generated_at: now,
            window_days: self.velocity.window_days(),
            total_size: project.total_size(),
            remaining_size: project.remaining_size(),
            completed_velocity: self.velocity.completed_velocity(&project.tasks, now),
            current_rate: self.current_rate(project, now),
            projected_days_remaining: self.projected_days_remaining(project, now),
            done: project.is_done(),
            on_schedule: self.on_schedule(project, now),
        }
    }
}
