//! Error types for supervisor operations.

use thiserror::Error;

/// Result type alias for supervisor operations.
pub type Result<T> = std::result::Result<T, SupervisorError>;

/// Errors that can occur while supervising workers.
///
/// Only a primary worker's startup failure is fatal; every other fault
/// (auxiliary startup, unexpected exits, stop failures) is logged and
/// absorbed by the supervisor.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The primary worker could not be started. Aborts the whole run.
    #[error("Primary worker '{name}' failed to start: {reason}")]
    PrimaryStartup { name: String, reason: String },

    /// Spawning a worker process failed at the OS level.
    #[error("Failed to spawn '{name}': {source}")]
    Spawn {
        name: String,
        source: std::io::Error,
    },
}
