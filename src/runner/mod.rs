// Runner module - binds atomic tests to interpreters and executes them
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod base;
pub mod cloud;
pub mod error;
pub mod local;
pub mod traits;
pub mod types;

pub use base::RunnerCore;
pub use cloud::{CloudCli, CloudRunner, ProbeStatus};
pub use error::{Result, RunnerError};
pub use local::LocalRunner;
pub use traits::Runner;
pub use types::{RunOutcome, RunState, SkipReason};
