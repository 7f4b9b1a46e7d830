//! Test results and JSON report

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::E2eResult;

/// Result of running a single test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl CaseResult {
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            success: true,
            duration_ms: duration.as_millis() as u64,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            duration_ms: duration.as_millis() as u64,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of a harness run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub results: Vec<CaseResult>,
}

impl SuiteResult {
    /// Aggregate individual case results
    pub fn from_results(results: Vec<CaseResult>, duration: Duration) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms: duration.as_millis() as u64,
            finished_at: chrono::Utc::now(),
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Write the report as pretty JSON into the output directory
    pub fn write_to(&self, output_dir: &Path) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(output_dir)?;

        let path = output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_counts() {
        let results = vec![
            CaseResult::passed("a", Duration::from_millis(10)),
            CaseResult::failed("b", Duration::from_millis(20), "boom"),
            CaseResult::passed("c", Duration::from_millis(30)),
        ];
        let suite = SuiteResult::from_results(results, Duration::from_millis(60));

        assert_eq!(suite.total, 3);
        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert!(!suite.all_passed());
    }

    #[test]
    fn test_empty_suite_passes() {
        let suite = SuiteResult::from_results(vec![], Duration::ZERO);
        assert!(suite.all_passed());
        assert_eq!(suite.total, 0);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let suite = SuiteResult::from_results(
            vec![CaseResult::passed("a", Duration::from_millis(5))],
            Duration::from_millis(5),
        );
        let path = suite.write_to(dir.path()).unwrap();

        let body = std::fs::read_to_string(path).unwrap();
        let parsed: SuiteResult = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.results[0].name, "a");
    }
}
