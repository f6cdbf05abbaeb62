// Atomic test definition errors

use crate::platform::ExecutorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or missing test definitions
#[derive(Debug, Error)]
pub enum TestDefinitionError {
    #[error("Test '{name}' has no command for executor '{executor}'")]
    EmptyCommand { name: String, executor: ExecutorKind },

    #[error("Test file not found: {0}")]
    NotFound(PathBuf),

    #[error("Malformed test file: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TestDefinitionError>;
