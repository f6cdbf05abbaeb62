// Runner trait

use crate::atomic::AtomicTest;
use crate::executor::ExecutionResult;
use crate::runner::base::RunnerCore;
use crate::runner::error::Result;
use crate::runner::types::{RunOutcome, RunState};
use async_trait::async_trait;

/// Executes one bound atomic test
#[async_trait]
pub trait Runner: Send + Sync {
    fn core(&self) -> &RunnerCore;

    /// Run the test's command; skipped tests never spawn a process
    async fn run(&mut self) -> Result<RunOutcome>;

    /// Run the test's cleanup command, if any
    async fn cleanup(&self) -> Result<Option<ExecutionResult>> {
        self.core().run_cleanup().await
    }

    fn test(&self) -> &AtomicTest {
        self.core().test()
    }

    fn state(&self) -> RunState {
        self.core().state()
    }
}
