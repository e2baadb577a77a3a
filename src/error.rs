//! Error types for tshost
//!
//! Uses `thiserror` for library errors. Compiler diagnostics are never errors;
//! they travel in `BuildResult::diagnostics` instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Main error type for host, build and watch operations
#[derive(Error, Debug)]
pub enum HostError {
    /// A project-relative source read found nothing at the joined path
    #[error("source file not found: {path}")]
    NotFound { path: PathBuf },

    /// The adapter failed to persist an output artifact
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// No usable project configuration or entry file
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Native file watcher could not be installed
    #[error("watch error: {message}")]
    Watch { message: String },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostError {
    pub fn configuration(message: impl Into<String>) -> Self {
        HostError::Configuration {
            message: message.into(),
        }
    }
}
