// Data types for Atomic module

use crate::atomic::error::{Result, TestDefinitionError};
use crate::platform::{ExecutorKind, Platform};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved atomic test, input arguments already substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicTest {
    /// Technique identifier, e.g. `T1059.004`
    pub technique: String,
    #[serde(rename = "guid")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub supported_platforms: Vec<Platform>,
    pub executor: ExecutorKind,
    /// Command text handed to the interpreter
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub cleanup_command: Option<String>,
}

impl AtomicTest {
    pub fn new(
        technique: impl Into<String>,
        name: impl Into<String>,
        executor: ExecutorKind,
        command: impl Into<String>,
    ) -> Self {
        Self {
            technique: technique.into(),
            id: Uuid::new_v4(),
            name: name.into(),
            supported_platforms: Vec::new(),
            executor,
            command: command.into(),
            cleanup_command: None,
        }
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.supported_platforms = platforms.into_iter().collect();
        self
    }

    pub fn with_cleanup(mut self, command: impl Into<String>) -> Self {
        self.cleanup_command = Some(command.into());
        self
    }

    /// Reject tests that would hand an interpreter nothing to run
    pub fn validate(&self) -> Result<()> {
        if self.executor != ExecutorKind::Manual && self.command.trim().is_empty() {
            return Err(TestDefinitionError::EmptyCommand {
                name: self.name.clone(),
                executor: self.executor,
            });
        }
        Ok(())
    }

    pub fn supports(&self, platform: &Platform) -> bool {
        self.supported_platforms.contains(platform)
    }

    /// Cleanup command, if it has any text
    pub fn cleanup(&self) -> Option<&str> {
        self.cleanup_command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_rejected() {
        let test = AtomicTest::new("T1059.004", "empty", ExecutorKind::Sh, "  ");
        assert!(matches!(
            test.validate(),
            Err(TestDefinitionError::EmptyCommand { .. })
        ));
    }

    #[test]
    fn test_manual_may_have_empty_command() {
        let test = AtomicTest::new("T1003", "manual steps", ExecutorKind::Manual, "");
        assert!(test.validate().is_ok());
    }

    #[test]
    fn test_supports_platform() {
        let test = AtomicTest::new("T1059.004", "sh", ExecutorKind::Sh, "id")
            .with_platforms([Platform::Linux, Platform::Macos]);
        assert!(test.supports(&Platform::Linux));
        assert!(!test.supports(&Platform::Windows));
    }

    #[test]
    fn test_blank_cleanup_ignored() {
        let test = AtomicTest::new("T1059.004", "sh", ExecutorKind::Sh, "id").with_cleanup(" ");
        assert!(test.cleanup().is_none());

        let test = test.with_cleanup("rm -f /tmp/x");
        assert_eq!(test.cleanup(), Some("rm -f /tmp/x"));
    }
}
