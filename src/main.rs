mod atomic;
mod executor;
mod output;
mod platform;
mod runner;

use atomic::{AtomicTest, abs_path, filter_technique, load_tests};
use clap::Parser;
use executor::{ConfigHandle, ExecutionConfig, ExecutionResult};
use runner::{CloudCli, CloudRunner, LocalRunner, RunOutcome, Runner};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, error, info, warn};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "atomic-runner")]
#[command(about = "Run resolved atomic tests against this host or a cloud CLI")]
struct Args {
    /// TOML file with resolved atomic tests
    tests: PathBuf,

    /// Working directory for test commands (expands ~ and $VARS)
    #[arg(short = 'C', long, default_value = ".")]
    working_dir: String,

    /// Command timeout in seconds (overrides ATOMIC_COMMAND_TIMEOUT)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Log resolver decisions and skip reasons
    #[arg(long)]
    show_details: bool,

    /// Run tests through a cloud provider CLI
    #[arg(long, value_enum)]
    cloud: Option<CloudCli>,

    /// Only run tests for this technique id
    #[arg(long)]
    technique: Option<String>,

    /// Run each test's cleanup command afterwards
    #[arg(long)]
    cleanup: bool,

    /// Print a JSON report per test to stdout
    #[arg(long)]
    json: bool,
}

/// Per-test report printed with `--json`
#[derive(Debug, Serialize)]
struct TestReport {
    technique: String,
    guid: String,
    name: String,
    outcome: RunOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup: Option<ExecutionResult>,
}

fn build_runner(
    test: AtomicTest,
    working_dir: &Path,
    config: &ConfigHandle,
    cloud: Option<CloudCli>,
) -> runner::Result<Box<dyn Runner>> {
    let runner: Box<dyn Runner> = match cloud {
        Some(cli) => Box::new(CloudRunner::new(cli, test, working_dir, config.clone())?),
        None => Box::new(LocalRunner::new(test, working_dir, config.clone())?),
    };
    Ok(runner)
}

async fn run_all(
    tests: Vec<AtomicTest>,
    working_dir: &Path,
    config: &ConfigHandle,
    args: &Args,
) -> Result<Vec<TestReport>, Box<dyn std::error::Error>> {
    let mut reports = Vec::with_capacity(tests.len());

    for test in tests {
        let mut runner = build_runner(test, working_dir, config, args.cloud)?;
        let outcome = runner.run().await?;

        match &outcome {
            RunOutcome::Completed { result } => info!(
                name = %runner.test().name,
                return_code = ?result.return_code,
                "Test completed"
            ),
            RunOutcome::TimedOut { .. } => {
                warn!(name = %runner.test().name, "Test timed out")
            }
            RunOutcome::Skipped { reason } => {
                info!(name = %runner.test().name, reason = %reason, "Test skipped")
            }
        }

        let cleanup = if args.cleanup {
            runner.cleanup().await?
        } else {
            None
        };

        let test = runner.test();
        reports.push(TestReport {
            technique: test.technique.clone(),
            guid: test.id.to_string(),
            name: test.name.clone(),
            outcome,
            cleanup,
        });
    }

    Ok(reports)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.show_details {
        Level::DEBUG
    } else {
        Level::INFO
    };
    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    // Initialize config
    let mut exec_config = ExecutionConfig::from_env()?;
    if let Some(timeout) = args.timeout {
        exec_config.command_timeout = timeout;
    }
    if args.show_details {
        exec_config.show_details = true;
    }
    exec_config.validate()?;

    info!(
        command_timeout = exec_config.command_timeout,
        show_details = exec_config.show_details,
        "Configuration loaded"
    );
    let config = ConfigHandle::new(exec_config);

    // Load tests
    let mut tests = load_tests(&args.tests)?;
    if let Some(technique) = &args.technique {
        tests = filter_technique(tests, technique);
    }
    if tests.is_empty() {
        warn!("No atomic tests to run");
        return Ok(());
    }

    let working_dir = abs_path(&args.working_dir);
    info!(
        tests = tests.len(),
        working_dir = %working_dir.display(),
        cloud = ?args.cloud,
        "Running atomic tests"
    );

    let reports = match run_all(tests, &working_dir, &config, &args).await {
        Ok(reports) => reports,
        Err(e) => {
            error!(error = %e, "Atomic test run aborted");
            process::exit(1);
        }
    };

    let completed = reports.iter().filter(|r| r.outcome.is_completed()).count();
    let timed_out = reports.iter().filter(|r| r.outcome.is_timed_out()).count();
    let skipped = reports.iter().filter(|r| r.outcome.is_skipped()).count();
    info!(completed, timed_out, skipped, "Finished");

    if args.json {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
    }

    Ok(())
}
