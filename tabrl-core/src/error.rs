//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum TabrlError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// No persisted agent state at the given path.
    #[error("No agent state found at {0}")]
    AgentStateNotFound(PathBuf),

    /// Persisted agent state has an unsupported format version.
    #[error("Unsupported agent state format version: {0}")]
    AgentStateVersion(u32),
}
