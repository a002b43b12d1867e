//! pacer task command implementations: completion and reordering.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::Project;
use crate::sequencer::{MoveDirection, MoveOutcome, RevertPolicy, TaskSequencer};
use crate::store::StoreMoveBackend;
use crate::task::TaskId;

use super::project::{open_store, parse_timestamp};

pub struct CompleteOptions {
    pub project: String,
    pub task_id: String,
    pub at: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MoveOptions {
    pub project: String,
    pub task_id: String,
    pub direction: String,
    pub keep_local_on_failure: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct CompleteOutput {
    project: String,
    task_id: TaskId,
    completed_at: chrono::DateTime<Utc>,
    remaining_size: u64,
    done: bool,
}

#[derive(serde::Serialize)]
struct MoveOutput {
    project: String,
    task_id: TaskId,
    direction: MoveDirection,
    outcome: MoveOutcome,
    order: Vec<TaskId>,
}

pub fn run_complete(options: CompleteOptions) -> Result<()> {
    let store = open_store(options.dir);
    let at = match options.at.as_deref() {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };

    let project = store.get(&options.project)?;
    let task_id = resolve_task_id(&project, &options.task_id)?;
    let updated = store.complete_task(&options.project, task_id, at)?;

    let output = CompleteOutput {
        project: updated.name.clone(),
        task_id,
        completed_at: at,
        remaining_size: updated.remaining_size(),
        done: updated.is_done(),
    };

    let mut human = HumanOutput::new(format!("Completed task {task_id}"));
    human.push_summary("remaining size", output.remaining_size.to_string());
    human.push_summary("done", output.done.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "complete",
        &output,
        Some(&human),
    )
}

pub async fn run_move(options: MoveOptions) -> Result<()> {
    let store = open_store(options.dir);
    let config = Config::load_from_dir(store.root());
    let direction: MoveDirection = options.direction.parse()?;

    let project = store.get(&options.project)?;
    let task_id = resolve_task_id(&project, &options.task_id)?;

    let policy = if options.keep_local_on_failure || config.moves.keep_local_on_failure {
        RevertPolicy::KeepLocal
    } else {
        RevertPolicy::RevertOnFailure
    };

    let backend = StoreMoveBackend::new(store.clone(), project.name.clone());
    let mut sequencer =
        TaskSequencer::new(project.order(), backend).with_policy(policy);
    let outcome = sequencer.move_task(task_id, direction).await?;

    let output = MoveOutput {
        project: project.name.clone(),
        task_id,
        direction,
        outcome,
        order: sequencer.order().to_vec(),
    };

    let mut human = HumanOutput::new(match outcome {
        MoveOutcome::NoOp => format!("Task {task_id} is already at the boundary; nothing to do"),
        MoveOutcome::Confirmed => {
            format!("Moved task {task_id} {}", direction.as_str())
        }
        MoveOutcome::RolledBack => {
            format!("Move of task {task_id} was rejected; local order rolled back")
        }
        MoveOutcome::FailureKeptLocal => {
            format!("Move of task {task_id} was rejected; optimistic order kept")
        }
    });
    for (index, id) in output.order.iter().enumerate() {
        let title = project
            .task(*id)
            .map(|task| task.title.as_str())
            .unwrap_or("?");
        human.push_detail(format!("{index}. {title} ({id})"));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "move",
        &output,
        Some(&human),
    )
}

/// Resolve a task id from a full UUID or an unambiguous prefix of one.
fn resolve_task_id(project: &Project, raw: &str) -> Result<TaskId> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<Uuid>() {
        return project
            .task(id)
            .map(|task| task.id)
            .ok_or_else(|| Error::TaskNotFound(trimmed.to_string()));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let mut matches = project
        .tasks
        .iter()
        .filter(|task| task.id.to_string().starts_with(&lowered));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (Some(_), Some(_)) => Err(Error::InvalidArgument(format!(
            "task id prefix {trimmed} is ambiguous"
        ))),
        (None, _) => Err(Error::TaskNotFound(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::task::Task;

    use super::*;

    #[test]
    fn resolves_full_and_prefix_ids() {
        let project =
            Project::new("p", None).with_tasks(vec![Task::new("a", 1), Task::new("b", 2)]);
        let full = project.tasks[0].id;

        assert_eq!(resolve_task_id(&project, &full.to_string()).unwrap(), full);

        let prefix = &full.to_string()[..8];
        // A UUID v4 prefix collision across two tasks is vanishingly
        // unlikely, so the prefix resolves to the first task.
        assert_eq!(resolve_task_id(&project, prefix).unwrap(), full);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let project = Project::new("p", None).with_tasks(vec![Task::new("a", 1)]);
        assert!(matches!(
            resolve_task_id(&project, "ffffffff"),
            Err(Error::TaskNotFound(_))
        ));
    }
}
