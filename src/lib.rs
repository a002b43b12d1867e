//! pacer - Backlog Velocity Library
//!
//! This library provides the core functionality for the pacer CLI tool:
//! parsing free-form task text into a structured backlog, computing
//! completed velocity over a trailing window, projecting remaining
//! duration against a due date, and an optimistic reorder protocol for
//! reprioritizing the backlog.
//!
//! # Core Concepts
//!
//! - **Velocity**: total task size completed within the trailing window
//! - **Window**: fixed trailing period (days) over which completed work
//!   counts toward velocity
//! - **Projection**: remaining work divided by the current daily rate,
//!   possibly non-finite
//! - **Optimistic reorder**: local order mutated before server
//!   confirmation, with explicit success/failure follow-up
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.pacer.toml`
//! - `error`: Error types and result aliases
//! - `output`: Shared human/JSON output formatting
//! - `parser`: Task text parsing
//! - `project`: Project aggregate over an ordered backlog
//! - `schedule`: Schedule projection and on-schedule verdicts
//! - `sequencer`: Optimistic task reordering protocol
//! - `store`: JSON snapshot persistence
//! - `task`: Task entities
//! - `velocity`: Completed-velocity computation

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod project;
pub mod schedule;
pub mod sequencer;
pub mod store;
pub mod task;
pub mod velocity;

pub use error::{Error, Result};
