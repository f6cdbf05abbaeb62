// Data types for Executor module
#![allow(dead_code)]

use crate::output::sanitizer::clean;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output from a single interpreter run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Text the interpreter wrote to stdout
    pub stdout: String,
    /// Text the interpreter wrote to stderr
    pub stderr: String,
    /// stdout and stderr interleaved in arrival order
    pub output: String,
    /// Exit code; `None` after a timeout or when killed by a signal
    pub return_code: Option<i32>,
    #[serde(default)]
    pub timed_out: bool,
    /// Whether a captured view hit the size limit and lost its tail
    #[serde(default)]
    pub truncated: bool,
    /// Whether banner/prompt noise has been stripped
    #[serde(default)]
    pub sanitized: bool,
    pub pid: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Empty result for a command that hit its timeout
    pub fn timed_out(pid: Option<u32>, started_at: DateTime<Utc>, duration_ms: u64) -> Self {
        Self {
            timed_out: true,
            pid,
            started_at,
            duration_ms,
            ..Self::default()
        }
    }

    /// Exit code 0
    pub fn succeeded(&self) -> bool {
        self.return_code == Some(0)
    }

    /// No captured text at all
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty() && self.output.is_empty()
    }

    /// Strip console banner and prompts from every captured view
    pub fn sanitize(mut self) -> Self {
        if !self.sanitized {
            self.stdout = clean(&self.stdout);
            self.stderr = clean(&self.stderr);
            self.output = clean(&self.output);
            self.sanitized = true;
        }
        self
    }
}
