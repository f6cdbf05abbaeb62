// Loads resolved atomic tests from a TOML file

use crate::atomic::error::{Result, TestDefinitionError};
use crate::atomic::types::AtomicTest;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TestFile {
    #[serde(default)]
    atomic_tests: Vec<AtomicTest>,
}

/// Parse tests from TOML text
pub fn parse_tests(content: &str) -> Result<Vec<AtomicTest>> {
    let file: TestFile = toml::from_str(content)?;

    if file.atomic_tests.is_empty() {
        return Err(TestDefinitionError::Malformed(
            "provide one or more atomic_tests".to_string(),
        ));
    }

    for test in &file.atomic_tests {
        test.validate()?;
    }

    Ok(file.atomic_tests)
}

/// Load tests from a TOML file
pub fn load_tests(path: &Path) -> Result<Vec<AtomicTest>> {
    if !path.exists() {
        return Err(TestDefinitionError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let tests = parse_tests(&content)?;

    debug!(path = %path.display(), test_count = tests.len(), "loaded atomic tests");
    Ok(tests)
}

/// Keep only the tests for `technique` (case-insensitive)
pub fn filter_technique(tests: Vec<AtomicTest>, technique: &str) -> Vec<AtomicTest> {
    tests
        .into_iter()
        .filter(|t| t.technique.eq_ignore_ascii_case(technique))
        .collect()
}
