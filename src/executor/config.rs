// Execution configuration

use crate::executor::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::warn;

/// Default per-command timeout in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 20;

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Process-wide execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Seconds a command may run before it is killed
    pub command_timeout: u64,
    /// Log the resolver's decisions and skip reasons
    pub show_details: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT_SECS,
            show_details: false,
        }
    }
}

impl ExecutionConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = ExecutionConfig::default();

        config.command_timeout = parse_env_var("ATOMIC_COMMAND_TIMEOUT", config.command_timeout);
        config.show_details = parse_env_var("ATOMIC_SHOW_DETAILS", config.show_details);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_timeout == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout)
    }
}

/// Shared handle to an [`ExecutionConfig`].
///
/// Runners keep a clone of the handle and read it when they execute, not when
/// they are built. Changes made through any clone between construction and
/// `run()` are therefore seen by the run.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle(Arc<RwLock<ExecutionConfig>>);

impl ConfigHandle {
    pub fn new(config: ExecutionConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> ExecutionConfig {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut ExecutionConfig)) {
        let mut config = self.0.write().unwrap_or_else(|e| e.into_inner());
        f(&mut config);
    }

    pub fn show_details(&self) -> bool {
        self.snapshot().show_details
    }
}

impl From<ExecutionConfig> for ConfigHandle {
    fn from(config: ExecutionConfig) -> Self {
        Self::new(config)
    }
}
