// Shared state and execution path for every runner variant

use crate::atomic::AtomicTest;
use crate::executor::{ConfigHandle, ExecutionResult, ProcessExecutor};
use crate::output::print_process_output;
use crate::platform::{ExecutorKind, InterpreterPath, Platform, resolve_interpreter};
use crate::runner::error::Result;
use crate::runner::types::{RunOutcome, RunState, SkipReason};
use std::path::{Path, PathBuf};
use tracing::info;

/// A test bound to a working directory, with its interpreter resolved
#[derive(Debug)]
pub struct RunnerCore {
    test: AtomicTest,
    working_dir: PathBuf,
    config: ConfigHandle,
    platform: Platform,
    interpreter: Option<InterpreterPath>,
    skip: Option<SkipReason>,
    state: RunState,
    executor: ProcessExecutor,
}

impl RunnerCore {
    /// Bind `test` to `working_dir` on `platform`.
    ///
    /// `supported` says whether the variant accepts the test on this platform.
    /// The interpreter is resolved here; a skipped test never gets one.
    pub fn bind(
        test: AtomicTest,
        working_dir: impl Into<PathBuf>,
        config: ConfigHandle,
        platform: Platform,
        supported: bool,
    ) -> Result<Self> {
        test.validate()?;

        let mut core = Self {
            test,
            working_dir: working_dir.into(),
            config,
            platform,
            interpreter: None,
            skip: None,
            state: RunState::Constructed,
            executor: ProcessExecutor::new(),
        };

        core.show_details("Checking if executor works on local system platform.");

        if !supported {
            core.skip = Some(SkipReason::UnsupportedPlatform {
                platform: core.platform.clone(),
            });
        } else if core.test.executor == ExecutorKind::Manual {
            core.skip = Some(SkipReason::ManualExecutor);
        } else {
            match resolve_interpreter(core.test.executor, &core.platform) {
                Some(interpreter) => {
                    core.interpreter = Some(interpreter);
                    core.state = RunState::InterpreterResolved;
                }
                None => {
                    core.skip = Some(SkipReason::NoInterpreter {
                        executor: core.test.executor,
                        platform: core.platform.clone(),
                    });
                }
            }
        }

        Ok(core)
    }

    pub fn test(&self) -> &AtomicTest {
        &self.test
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn interpreter(&self) -> Option<InterpreterPath> {
        self.interpreter
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Log `message` only when show-details is on
    pub fn show_details(&self, message: &str) {
        if self.config.show_details() {
            info!("{}", message);
        }
    }

    async fn execute_with(
        &self,
        interpreter: InterpreterPath,
        command: &str,
    ) -> Result<ExecutionResult> {
        let config = self.config.snapshot();
        config.validate()?;

        let result = self
            .executor
            .execute(
                interpreter.as_path(),
                command,
                Some(&self.working_dir),
                config.timeout(),
            )
            .await?;

        Ok(result.sanitize())
    }

    /// Run `command` with the resolved interpreter in the working directory.
    ///
    /// Returns `None` without spawning anything when the test was skipped.
    pub async fn execute_command(&self, command: &str) -> Result<Option<ExecutionResult>> {
        match self.interpreter {
            Some(interpreter) => self.execute_with(interpreter, command).await.map(Some),
            None => Ok(None),
        }
    }

    /// Execute the test's command and move to a terminal state
    pub async fn run_test(&mut self) -> Result<RunOutcome> {
        self.config.snapshot().validate()?;

        let Some(interpreter) = self.interpreter else {
            let reason = self.skip.clone().unwrap_or(SkipReason::ManualExecutor);
            self.show_details(&format!("Skipping '{}': {}", self.test.name, reason));
            self.state = RunState::Skipped;
            return Ok(RunOutcome::Skipped { reason });
        };

        info!(
            technique = %self.test.technique,
            guid = %self.test.id,
            name = %self.test.name,
            executor = %self.test.executor,
            platform = %self.platform,
            "Running atomic test"
        );

        self.state = RunState::Executing;
        let command = self.test.command.clone();
        let result = match self.execute_with(interpreter, &command).await {
            Ok(result) => result,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e);
            }
        };

        if result.timed_out {
            self.state = RunState::TimedOut;
            return Ok(RunOutcome::TimedOut { result });
        }

        print_process_output(&command, &result);
        self.state = RunState::Completed;
        Ok(RunOutcome::Completed { result })
    }

    /// Execute the cleanup command, if the test has one and was not skipped
    pub async fn run_cleanup(&self) -> Result<Option<ExecutionResult>> {
        let Some(cleanup) = self.test.cleanup() else {
            return Ok(None);
        };
        if self.interpreter.is_none() {
            return Ok(None);
        }

        info!(name = %self.test.name, "Running cleanup command");
        let result = self.execute_command(cleanup).await?;
        if let Some(result) = &result {
            if !result.timed_out {
                print_process_output(cleanup, result);
            }
        }
        Ok(result)
    }
}
