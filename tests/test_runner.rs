// Integration tests for Runner module
// This file should be run with cargo test --test test_runner
#![cfg(unix)]

#[path = "../src/atomic/mod.rs"]
mod atomic;

#[path = "../src/executor/mod.rs"]
mod executor;

#[path = "../src/output/mod.rs"]
mod output;

#[path = "../src/platform/mod.rs"]
mod platform;

#[path = "../src/runner/mod.rs"]
mod runner;

use atomic::AtomicTest;
use executor::{ConfigHandle, ExecutionConfig};
use platform::{ExecutorKind, Platform};

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    });
}

fn config(timeout: u64) -> ConfigHandle {
    ConfigHandle::new(ExecutionConfig {
        command_timeout: timeout,
        show_details: true,
    })
}

fn sh_test(command: &str) -> AtomicTest {
    AtomicTest::new("T1059.004", "sh test", ExecutorKind::Sh, command)
        .with_platforms([Platform::Linux, Platform::Macos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{
        CloudCli, CloudRunner, LocalRunner, ProbeStatus, RunOutcome, RunState, Runner,
        RunnerError, SkipReason,
    };

    /// End-to-end run on a linux host
    #[tokio::test]
    async fn test_local_run_end_to_end() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let test = AtomicTest::new("T1059.004", "atomic ok", ExecutorKind::Sh, "echo atomic-ok")
            .with_platforms([Platform::Linux]);
        let mut runner =
            LocalRunner::for_platform(test, dir.path(), config(5), Platform::Linux).unwrap();
        assert_eq!(runner.state(), RunState::InterpreterResolved);

        let outcome = runner.run().await.unwrap();
        let result = match outcome {
            RunOutcome::Completed { result } => result,
            other => panic!("expected completion, got {other:?}"),
        };

        assert_eq!(result.output, "atomic-ok\n");
        assert_eq!(result.return_code, Some(0));
        assert!(result.sanitized);
        assert_eq!(runner.state(), RunState::Completed);
    }

    /// Host platform detection picks the same interpreter
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[tokio::test]
    async fn test_local_run_on_host_platform() {
        init_tracing();

        let mut runner = LocalRunner::new(sh_test("echo host"), ".", config(5)).unwrap();
        let outcome = runner.run().await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(outcome.result().unwrap().output, "host\n");
    }

    /// Non-zero exit completes normally
    #[tokio::test]
    async fn test_nonzero_exit_completes() {
        init_tracing();

        let mut runner =
            LocalRunner::for_platform(sh_test("exit 2"), ".", config(5), Platform::Linux).unwrap();
        let outcome = runner.run().await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(outcome.result().unwrap().return_code, Some(2));
        assert_eq!(runner.state(), RunState::Completed);
    }

    /// Unsupported platform skips without spawning
    #[tokio::test]
    async fn test_unsupported_platform_skipped() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let command = format!("touch {}", marker.display());

        let mut runner =
            LocalRunner::for_platform(sh_test(&command), dir.path(), config(5), Platform::Windows)
                .unwrap();
        assert!(runner.core().interpreter().is_none());

        let outcome = runner.run().await.unwrap();
        match outcome {
            RunOutcome::Skipped {
                reason: SkipReason::UnsupportedPlatform { platform },
            } => assert_eq!(platform, Platform::Windows),
            other => panic!("expected skip, got {other:?}"),
        }
        assert_eq!(runner.state(), RunState::Skipped);
        assert!(!marker.exists(), "no process should have run");
    }

    /// Supported platform without a table entry is skipped
    #[tokio::test]
    async fn test_missing_table_entry_skipped() {
        init_tracing();

        let test = AtomicTest::new("T1059.001", "ps", ExecutorKind::Powershell, "Get-Process")
            .with_platforms([Platform::Linux]);
        let mut runner = LocalRunner::for_platform(test, ".", config(5), Platform::Linux).unwrap();

        let outcome = runner.run().await.unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Skipped {
                reason: SkipReason::NoInterpreter {
                    executor: ExecutorKind::Powershell,
                    ..
                }
            }
        ));
    }

    /// Manual executor never runs
    #[tokio::test]
    async fn test_manual_executor_skipped() {
        init_tracing();

        let test = AtomicTest::new("T1003", "manual", ExecutorKind::Manual, "")
            .with_platforms([Platform::Linux]);
        let mut runner = LocalRunner::for_platform(test, ".", config(5), Platform::Linux).unwrap();

        let outcome = runner.run().await.unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Skipped {
                reason: SkipReason::ManualExecutor
            }
        ));
        assert!(runner.cleanup().await.unwrap().is_none());
    }

    /// Empty command with a real executor fails closed
    #[tokio::test]
    async fn test_empty_command_rejected() {
        init_tracing();

        let result = LocalRunner::for_platform(sh_test(""), ".", config(5), Platform::Linux);
        assert!(matches!(result, Err(RunnerError::Definition(_))));
    }

    /// Timeout is reported, not raised
    #[tokio::test]
    async fn test_timeout_outcome() {
        init_tracing();

        let mut runner =
            LocalRunner::for_platform(sh_test("exec sleep 30"), ".", config(1), Platform::Linux)
                .unwrap();
        let outcome = runner.run().await.unwrap();

        match outcome {
            RunOutcome::TimedOut { result } => {
                assert_eq!(result.return_code, None);
                assert!(result.is_empty());
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(runner.state(), RunState::TimedOut);
    }

    /// Config edits after construction are seen by run()
    #[tokio::test]
    async fn test_config_read_at_run_time() {
        init_tracing();

        let handle = config(30);
        let mut runner = LocalRunner::for_platform(
            sh_test("exec sleep 30"),
            ".",
            handle.clone(),
            Platform::Linux,
        )
        .unwrap();

        handle.update(|c| c.command_timeout = 1);

        let start = std::time::Instant::now();
        let outcome = runner.run().await.unwrap();
        assert!(outcome.is_timed_out());
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }

    /// Invalid config at run time is fatal
    #[tokio::test]
    async fn test_zero_timeout_is_fatal() {
        init_tracing();

        let handle = config(5);
        let mut runner =
            LocalRunner::for_platform(sh_test("echo hi"), ".", handle.clone(), Platform::Linux)
                .unwrap();
        handle.update(|c| c.command_timeout = 0);

        let result = runner.run().await;
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }

    /// Cleanup runs through the same path
    #[tokio::test]
    async fn test_cleanup_command() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let test = sh_test("touch artifact").with_cleanup("rm artifact && echo cleaned");
        let mut runner =
            LocalRunner::for_platform(test, dir.path(), config(5), Platform::Linux).unwrap();

        runner.run().await.unwrap();
        assert!(dir.path().join("artifact").exists());

        let cleanup = runner.cleanup().await.unwrap().expect("cleanup should run");
        assert_eq!(cleanup.return_code, Some(0));
        assert_eq!(cleanup.output, "cleaned\n");
        assert!(!dir.path().join("artifact").exists());
    }

    /// Cloud probe failure does not stop the run
    #[tokio::test]
    async fn test_cloud_runner_runs_after_probe() {
        init_tracing();

        let test = AtomicTest::new("T1580", "cloud", ExecutorKind::Sh, "echo cloud-ok")
            .with_platforms([CloudCli::Aws.platform()]);
        let mut runner =
            CloudRunner::for_platform(CloudCli::Aws, test, ".", config(10), Platform::Linux)
                .unwrap();
        assert!(runner.probe_status().is_none());

        let outcome = runner.run().await.unwrap();

        let probe = runner.probe_status().expect("probe should have run");
        assert!(!matches!(probe, ProbeStatus::Skipped));
        assert!(outcome.is_completed());
        assert_eq!(outcome.result().unwrap().output, "cloud-ok\n");
    }

    /// Cloud runner still honours platform skips
    #[tokio::test]
    async fn test_cloud_runner_skip() {
        init_tracing();

        let test = AtomicTest::new("T1580", "azure only", ExecutorKind::Sh, "echo no")
            .with_platforms([CloudCli::Azure.platform()]);
        let mut runner =
            CloudRunner::for_platform(CloudCli::Aws, test, ".", config(5), Platform::Linux)
                .unwrap();

        let outcome = runner.run().await.unwrap();
        assert!(outcome.is_skipped());
        assert_eq!(runner.probe_status(), Some(&ProbeStatus::Skipped));
    }

    /// Missing interpreter binary is fatal for the run
    #[tokio::test]
    async fn test_launch_failure_is_fatal() {
        init_tracing();

        // The interpreter path is fixed, so fail the spawn through its cwd
        let mut runner = LocalRunner::for_platform(
            sh_test("echo hi"),
            "/nonexistent/working/dir",
            config(5),
            Platform::Linux,
        )
        .unwrap();

        let result = runner.run().await;
        assert!(matches!(result, Err(RunnerError::Launch(_))));
        assert_eq!(runner.state(), RunState::Failed);
    }
}
