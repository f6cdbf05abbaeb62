// Logs finished commands for the reporting side

use crate::executor::types::ExecutionResult;
use crate::output::sanitizer::clean;
use tracing::{error, info};

/// Cleaned text of a finished command, as it is logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    /// Combined stdout and stderr in arrival order, `None` when blank
    pub output: Option<String>,
    /// Stderr alone, `None` when the command wrote nothing there
    pub errors: Option<String>,
}

impl ProcessReport {
    /// Text from an already sanitized result is used as is
    pub fn from_result(result: &ExecutionResult) -> Self {
        let view = |text: &str| {
            if result.sanitized {
                non_blank(text.to_string())
            } else {
                non_blank(clean(text))
            }
        };
        Self {
            output: view(&result.output),
            errors: view(&result.stderr),
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Log command info, its output (or "(No output)") and any errors.
///
/// "Output" is the combined view, so stderr text appears there too; it is
/// repeated under "Errors" at error level.
pub fn print_process_output(command: &str, result: &ExecutionResult) -> ProcessReport {
    let report = ProcessReport::from_result(result);

    info!(
        command = %command,
        return_code = ?result.return_code,
        duration_ms = result.duration_ms,
        "Command info"
    );

    match &report.output {
        Some(output) => info!("Output: {}", output),
        None => info!("(No output)"),
    }

    if let Some(errors) = &report.errors {
        error!("Errors: {}", errors);
    }

    report
}
