// Cloud runner - executes tests that drive a cloud provider's CLI

use crate::atomic::AtomicTest;
use crate::executor::ConfigHandle;
use crate::platform::{Platform, local_platform};
use crate::runner::base::RunnerCore;
use crate::runner::error::Result;
use crate::runner::traits::Runner;
use crate::runner::types::RunOutcome;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Cloud CLI a test drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CloudCli {
    Aws,
    Azure,
    Gcp,
}

impl CloudCli {
    pub fn binary(&self) -> &'static str {
        match self {
            CloudCli::Aws => "aws",
            CloudCli::Azure => "az",
            CloudCli::Gcp => "gcloud",
        }
    }

    /// Command that prints the CLI version when it is installed
    pub fn version_probe(&self) -> String {
        format!("{} --version", self.binary())
    }

    /// Platform tag used by tests targeting this provider
    pub fn platform(&self) -> Platform {
        let tag = match self {
            CloudCli::Aws => "iaas:aws",
            CloudCli::Azure => "iaas:azure",
            CloudCli::Gcp => "iaas:gcp",
        };
        Platform::from(tag)
    }
}

impl fmt::Display for CloudCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Outcome of the CLI version probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeStatus {
    Available { version: String },
    Failed { return_code: Option<i32>, output: String },
    TimedOut,
    LaunchFailed { error: String },
    /// The test is skipped, so there is no interpreter to probe with
    Skipped,
}

impl ProbeStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, ProbeStatus::Available { .. })
    }
}

/// Runs an atomic test through a cloud provider's CLI.
///
/// Before running, the CLI is probed with `--version`. The probe is best
/// effort: a missing or broken CLI is logged and the run still goes ahead.
#[derive(Debug)]
pub struct CloudRunner {
    core: RunnerCore,
    cli: CloudCli,
    probe: Option<ProbeStatus>,
}

impl CloudRunner {
    pub fn new(
        cli: CloudCli,
        test: AtomicTest,
        working_dir: impl Into<PathBuf>,
        config: ConfigHandle,
    ) -> Result<Self> {
        Self::for_platform(cli, test, working_dir, config, local_platform())
    }

    /// Bind `test` as if the host were `platform`.
    ///
    /// Tests are accepted when they list either the host platform or the
    /// provider's `iaas:` tag; the interpreter always comes from the host.
    pub fn for_platform(
        cli: CloudCli,
        test: AtomicTest,
        working_dir: impl Into<PathBuf>,
        config: ConfigHandle,
        platform: Platform,
    ) -> Result<Self> {
        let supported = test.supports(&platform) || test.supports(&cli.platform());
        let core = RunnerCore::bind(test, working_dir, config, platform, supported)?;
        Ok(Self {
            core,
            cli,
            probe: None,
        })
    }

    pub fn cli(&self) -> CloudCli {
        self.cli
    }

    /// Status of the last probe, `None` before the first run
    pub fn probe_status(&self) -> Option<&ProbeStatus> {
        self.probe.as_ref()
    }

    /// Probe the CLI through the same executor path the test uses
    pub async fn check_cli(&self) -> ProbeStatus {
        let command = self.cli.version_probe();

        let status = match self.core.execute_command(&command).await {
            Ok(None) => ProbeStatus::Skipped,
            Ok(Some(result)) if result.timed_out => ProbeStatus::TimedOut,
            Ok(Some(result)) if result.succeeded() => ProbeStatus::Available {
                version: result.output.trim().to_string(),
            },
            Ok(Some(result)) => ProbeStatus::Failed {
                return_code: result.return_code,
                output: result.output.trim().to_string(),
            },
            Err(e) => ProbeStatus::LaunchFailed {
                error: e.to_string(),
            },
        };

        match &status {
            ProbeStatus::Available { version } => {
                info!(cli = %self.cli, version = %version, "Cloud CLI detected");
            }
            ProbeStatus::Skipped => {
                self.core.show_details("Test is skipped, not probing cloud CLI.");
            }
            other => {
                warn!(cli = %self.cli, probe = ?other, "Cloud CLI check failed, running anyway");
            }
        }

        status
    }
}

#[async_trait]
impl Runner for CloudRunner {
    fn core(&self) -> &RunnerCore {
        &self.core
    }

    async fn run(&mut self) -> Result<RunOutcome> {
        let probe = self.check_cli().await;
        self.probe = Some(probe);
        self.core.run_test().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_probe_commands() {
        assert_eq!(CloudCli::Aws.version_probe(), "aws --version");
        assert_eq!(CloudCli::Azure.version_probe(), "az --version");
        assert_eq!(CloudCli::Gcp.version_probe(), "gcloud --version");
    }

    #[test]
    fn test_cli_platform_tags() {
        assert_eq!(CloudCli::Aws.platform().as_str(), "iaas:aws");
        assert_eq!(CloudCli::Azure.platform(), Platform::Other("iaas:azure".to_string()));
    }
}
