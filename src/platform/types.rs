// Data types for Platform module
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Canonical platform tag
///
/// Tags outside the known set (cloud tags such as `iaas:aws`, or other
/// operating systems) are kept verbatim so membership checks simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Windows,
    Linux,
    Macos,
    /// Fallback column of the interpreter table
    Default,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Default => "default",
            Platform::Other(tag) => tag,
        }
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::Macos,
            "default" => Platform::Default,
            _ => Platform::Other(tag),
        }
    }
}

impl From<&str> for Platform {
    fn from(tag: &str) -> Self {
        Platform::from(tag.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executor named by an atomic test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorKind {
    CommandPrompt,
    Powershell,
    Sh,
    Bash,
    /// Informational steps for a human; never executed
    Manual,
}

impl ExecutorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorKind::CommandPrompt => "command_prompt",
            ExecutorKind::Powershell => "powershell",
            ExecutorKind::Sh => "sh",
            ExecutorKind::Bash => "bash",
            ExecutorKind::Manual => "manual",
        }
    }
}

impl fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute path of an interpreter binary from the static table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterpreterPath(&'static str);

impl InterpreterPath {
    pub(crate) const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn as_path(&self) -> &'static Path {
        Path::new(self.0)
    }
}

impl fmt::Display for InterpreterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
