//! CLI error types

use cadence_primitives::ResourceError;
use cadence_schedule::ScheduleError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed workload file
    #[error("Invalid workload: {0}")]
    Workload(String),

    /// Scheduling failed
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Invalid resource
    #[error("Invalid resource: {0}")]
    Resource(#[from] ResourceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
