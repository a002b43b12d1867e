//! Error types for pacer
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown project or task)
//! - 3: Blocked by protocol (move confirmation already in flight)
//! - 4: Operation failed (io error, rejected move)

use thiserror::Error;

use crate::task::TaskId;

/// Exit codes for the pacer CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const MOVE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for pacer operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project already exists: {0}")]
    ProjectExists(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Protocol blocks (exit code 3)
    #[error("Move already in flight for task {0}")]
    MoveInFlight(TaskId),

    // Operation failures (exit code 4)
    #[error("Move rejected for task {task_id}: {reason}")]
    MoveRejected { task_id: TaskId, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_)
            | Error::ProjectNotFound(_)
            | Error::ProjectExists(_)
            | Error::TaskNotFound(_) => exit_codes::USER_ERROR,

            // Protocol blocks
            Error::MoveInFlight(_) => exit_codes::MOVE_BLOCKED,

            // Operation failures
            Error::MoveRejected { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for pacer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: None,
        }
    }
}
