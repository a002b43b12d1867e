//! Command-line interface for pacer
//!
//! This module defines the CLI structure using clap derive macros.
//! Command handlers live in their own submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod project;
mod task;

/// pacer - backlog velocity tracking
///
/// Tracks a project's task backlog and projects whether it will finish by
/// its due date, based on recently completed throughput.
#[derive(Parser, Debug)]
#[command(name = "pacer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding `.pacer` state (defaults to current directory)
    #[arg(long, global = true, env = "PACER_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project from task text
    Create {
        /// Project name
        name: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Task text, one "<title>:<size>" per line
        #[arg(long)]
        tasks: Option<String>,

        /// Read task text from stdin instead of --tasks
        #[arg(long)]
        stdin: bool,
    },

    /// List projects
    List,

    /// Edit project attributes
    Edit {
        /// Project name
        name: String,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },

    /// Show the schedule projection for a project
    Status {
        /// Project name
        name: String,

        /// Evaluate the projection as of this time (RFC 3339, defaults to now)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Mark a task completed
    Complete {
        /// Project name
        project: String,

        /// Task id (full or unambiguous prefix)
        task_id: String,

        /// Completion time (RFC 3339, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Move a task up or down in the backlog
    Move {
        /// Project name
        project: String,

        /// Task id (full or unambiguous prefix)
        task_id: String,

        /// Direction: up or down
        direction: String,

        /// Keep the optimistic order if the backend rejects the move
        #[arg(long)]
        keep_local_on_failure: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Create {
                name,
                due,
                tasks,
                stdin,
            } => project::run_create(project::CreateOptions {
                name,
                due,
                tasks,
                stdin,
                dir: self.dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List => project::run_list(project::ListOptions {
                dir: self.dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                name,
                due,
                clear_due,
            } => project::run_edit(project::EditOptions {
                name,
                due,
                clear_due,
                dir: self.dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Status { name, as_of } => project::run_status(project::StatusOptions {
                name,
                as_of,
                dir: self.dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Complete {
                project,
                task_id,
                at,
            } => task::run_complete(task::CompleteOptions {
                project,
                task_id,
                at,
                dir: self.dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Move {
                project,
                task_id,
                direction,
                keep_local_on_failure,
            } => {
                task::run_move(task::MoveOptions {
                    project,
                    task_id,
                    direction,
                    keep_local_on_failure,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                })
                .await
            }
        }
    }
}
