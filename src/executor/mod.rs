// Executor module - runs commands through an interpreter subprocess
#![allow(unused_imports)]

pub mod config;
pub mod error;
pub mod process;
pub mod types;

pub use config::{ConfigHandle, ExecutionConfig};
pub use error::{ConfigError, ExecutorError, Result};
pub use process::{IO_CAPTURE_TIMEOUT, MAX_OUTPUT_BYTES, ProcessExecutor};
pub use types::ExecutionResult;
