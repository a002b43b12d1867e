//! pacer project command implementations.

use std::io::Read;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::parser::parse_tasks;
use crate::project::Project;
use crate::schedule::{ScheduleProjector, ScheduleReport};
use crate::store::ProjectStore;
use crate::velocity::VelocityCalculator;

pub struct CreateOptions {
    pub name: String,
    pub due: Option<String>,
    pub tasks: Option<String>,
    pub stdin: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub name: String,
    pub due: Option<String>,
    pub clear_due: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub name: String,
    pub as_of: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct CreateOutput {
    name: String,
    due_date: Option<NaiveDate>,
    task_count: usize,
    total_size: u64,
}

#[derive(serde::Serialize)]
struct ListEntry {
    name: String,
    due_date: Option<NaiveDate>,
    task_count: usize,
    remaining_size: u64,
    done: bool,
}

#[derive(serde::Serialize)]
struct ListOutput {
    total: usize,
    projects: Vec<ListEntry>,
}

#[derive(serde::Serialize)]
struct EditOutput {
    name: String,
    due_date: Option<NaiveDate>,
}

#[derive(serde::Serialize)]
struct StatusOutput {
    project: Project,
    report: ScheduleReport,
}

pub fn run_create(options: CreateOptions) -> Result<()> {
    let store = open_store(options.dir);
    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;
    let text = task_text(options.tasks, options.stdin)?;
    let tasks = parse_tasks(&text);

    let project = Project::new(options.name, due_date).with_tasks(tasks);
    let output = CreateOutput {
        name: project.name.clone(),
        due_date: project.due_date,
        task_count: project.tasks.len(),
        total_size: project.total_size(),
    };
    store.create(project)?;

    let mut human = HumanOutput::new(format!("Created project {}", output.name));
    human.push_summary("tasks", output.task_count.to_string());
    human.push_summary("total size", output.total_size.to_string());
    if let Some(due) = output.due_date {
        human.push_summary("due", due.to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "create",
        &output,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let store = open_store(options.dir);
    let projects = store.list()?;

    let entries: Vec<ListEntry> = projects
        .iter()
        .map(|project| ListEntry {
            name: project.name.clone(),
            due_date: project.due_date,
            task_count: project.tasks.len(),
            remaining_size: project.remaining_size(),
            done: project.is_done(),
        })
        .collect();
    let output = ListOutput {
        total: entries.len(),
        projects: entries,
    };

    let mut human = HumanOutput::new(format!("{} project(s)", output.total));
    for entry in &output.projects {
        let state = if entry.done { "done" } else { "open" };
        human.push_detail(format!(
            "{} [{}] {} task(s), {} point(s) remaining",
            entry.name, state, entry.task_count, entry.remaining_size
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let store = open_store(options.dir);
    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;
    if due_date.is_none() && !options.clear_due {
        return Err(Error::InvalidArgument(
            "nothing to change; pass --due or --clear-due".to_string(),
        ));
    }

    let updated = store.update(&options.name, |project| {
        project.due_date = if options.clear_due { None } else { due_date };
        Ok(())
    })?;

    let output = EditOutput {
        name: updated.name.clone(),
        due_date: updated.due_date,
    };

    let mut human = HumanOutput::new(format!("Updated project {}", output.name));
    match output.due_date {
        Some(due) => human.push_summary("due", due.to_string()),
        None => human.push_summary("due", "none"),
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &output,
        Some(&human),
    )
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let store = open_store(options.dir);
    let config = Config::load_from_dir(store.root());
    let now = match options.as_of.as_deref() {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };

    let project = store.get(&options.name)?;
    let projector = ScheduleProjector::new(VelocityCalculator::new(config.velocity.window_days));
    let report = projector.report(&project, now);

    let mut human = HumanOutput::new(format!("Project {}", project.name));
    human.push_summary("total size", report.total_size.to_string());
    human.push_summary("remaining size", report.remaining_size.to_string());
    human.push_summary(
        "completed velocity",
        format!(
            "{} point(s) / {} day(s)",
            report.completed_velocity, report.window_days
        ),
    );
    human.push_summary("current rate", format!("{:.3}/day", report.current_rate));
    human.push_summary(
        "projected days remaining",
        format_days(report.projected_days_remaining),
    );
    human.push_summary("done", report.done.to_string());
    human.push_summary("on schedule", report.on_schedule.to_string());
    if !report.projected_days_remaining.is_finite() && project.due_date.is_some() {
        human.push_warning(
            "no recent velocity data; the projection is unbounded".to_string(),
        );
    }
    for task in &project.tasks {
        let state = if task.is_complete() { "x" } else { " " };
        human.push_detail(format!("[{state}] {} ({}) {}", task.title, task.size, task.id));
    }

    let output = StatusOutput { project, report };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "status",
        &output,
        Some(&human),
    )
}

pub(crate) fn open_store(dir: Option<PathBuf>) -> ProjectStore {
    ProjectStore::new(dir.unwrap_or_else(|| PathBuf::from(".")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| Error::InvalidArgument(format!("invalid timestamp {raw}: {err}")))
}

fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| Error::InvalidArgument(format!("invalid due date {raw}: {err}")))
}

fn format_days(days: f64) -> String {
    if days.is_nan() {
        "undefined (no work, no velocity)".to_string()
    } else if days.is_infinite() {
        "unbounded (no velocity)".to_string()
    } else {
        format!("{days:.1}")
    }
}

fn task_text(tasks: Option<String>, stdin: bool) -> Result<String> {
    if let Some(text) = tasks {
        return Ok(text);
    }
    if stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(String::new())
}
