// Runner errors

use crate::atomic::TestDefinitionError;
use crate::executor::{ConfigError, ExecutorError};
use thiserror::Error;

/// Fatal runner errors; timeouts, skips and non-zero exits are outcomes, not errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Invalid test definition: {0}")]
    Definition(#[from] TestDefinitionError),

    #[error("Invalid execution config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Launch(#[from] ExecutorError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
