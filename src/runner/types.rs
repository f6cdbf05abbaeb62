// Runner types

use crate::executor::ExecutionResult;
use crate::platform::{ExecutorKind, Platform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a runner is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Constructed,
    InterpreterResolved,
    Executing,
    Completed,
    TimedOut,
    Skipped,
    /// The interpreter could not be launched
    Failed,
}

/// Why a test was not executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedPlatform { platform: Platform },
    ManualExecutor,
    NoInterpreter { executor: ExecutorKind, platform: Platform },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedPlatform { platform } => {
                write!(f, "test does not support platform '{}'", platform)
            }
            SkipReason::ManualExecutor => write!(f, "manual executor is not executed"),
            SkipReason::NoInterpreter { executor, platform } => {
                write!(f, "no interpreter for '{}' on '{}'", executor, platform)
            }
        }
    }
}

/// Result of `Runner::run`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The command exited; any exit code counts
    Completed { result: ExecutionResult },
    /// The command was killed at the timeout; `result` is empty
    TimedOut { result: ExecutionResult },
    Skipped { reason: SkipReason },
}

impl RunOutcome {
    pub fn result(&self) -> Option<&ExecutionResult> {
        match self {
            RunOutcome::Completed { result } | RunOutcome::TimedOut { result } => Some(result),
            RunOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped { .. })
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, RunOutcome::TimedOut { .. })
    }
}
