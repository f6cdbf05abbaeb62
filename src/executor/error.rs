// Error types for Executor module
#![allow(dead_code)]

use thiserror::Error;

/// Executor error types
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Failed to launch interpreter '{interpreter}': {source}")]
    LaunchFailed {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for interpreter '{interpreter}': {source}")]
    WaitFailed {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutorError {
    /// The interpreter binary does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExecutorError::LaunchFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Execution configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Command timeout must be greater than zero seconds")]
    InvalidTimeout,
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
