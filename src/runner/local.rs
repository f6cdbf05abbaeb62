// Local runner - executes tests directly on this host

use crate::atomic::AtomicTest;
use crate::executor::ConfigHandle;
use crate::platform::{Platform, local_platform};
use crate::runner::base::RunnerCore;
use crate::runner::error::Result;
use crate::runner::traits::Runner;
use crate::runner::types::RunOutcome;
use async_trait::async_trait;
use std::path::PathBuf;

/// Runs an atomic test with the host's own interpreters
#[derive(Debug)]
pub struct LocalRunner {
    core: RunnerCore,
}

impl LocalRunner {
    /// Bind `test` to `working_dir` on the host platform
    pub fn new(
        test: AtomicTest,
        working_dir: impl Into<PathBuf>,
        config: ConfigHandle,
    ) -> Result<Self> {
        Self::for_platform(test, working_dir, config, local_platform())
    }

    /// Bind `test` as if the host were `platform`
    pub fn for_platform(
        test: AtomicTest,
        working_dir: impl Into<PathBuf>,
        config: ConfigHandle,
        platform: Platform,
    ) -> Result<Self> {
        let supported = test.supports(&platform);
        let core = RunnerCore::bind(test, working_dir, config, platform, supported)?;
        Ok(Self { core })
    }
}

#[async_trait]
impl Runner for LocalRunner {
    fn core(&self) -> &RunnerCore {
        &self.core
    }

    async fn run(&mut self) -> Result<RunOutcome> {
        self.core.run_test().await
    }
}
