//! Project aggregate: an ordered task backlog plus an optional due date.
//!
//! Task order is meaningful (priority) and, along with completion, is the
//! only mutable state. All derived metrics are recomputed from current
//! task state on every call; nothing is cached, so mutations are reflected
//! immediately. Every metric is well-defined on an empty backlog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            due_date,
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Sum of all task sizes, complete or not. Sizes are `u32` but the
    /// backlog is unbounded, so totals accumulate in `u64`.
    pub fn total_size(&self) -> u64 {
        self.tasks.iter().map(|task| u64::from(task.size)).sum()
    }

    pub fn incomplete_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.is_complete())
    }

    /// Sum of sizes of incomplete tasks.
    pub fn remaining_size(&self) -> u64 {
        self.incomplete_tasks().map(|task| u64::from(task.size)).sum()
    }

    /// Vacuously true for an empty backlog.
    pub fn is_done(&self) -> bool {
        self.incomplete_tasks().next().is_none()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Current backlog order as stable ids, for the reorder protocol.
    pub fn order(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id).collect()
    }

    /// Swap two tasks by position. Out-of-range indexes are ignored so a
    /// stale reorder request cannot panic the aggregate.
    pub fn swap(&mut self, first: usize, second: usize) {
        if first < self.tasks.len() && second < self.tasks.len() {
            self.tasks.swap(first, second);
        }
    }
}
