//! Harness orchestration
//!
//! Owns the console server (unless an external one was supplied) and runs
//! the built-in cases, one fresh browser tab per case.

use std::time::Instant;

use loadlab_common::{RunId, TestDataFactory};
use tracing::{error, info};

use crate::config::HarnessConfig;
use crate::driver::{Driver, DriverConfig};
use crate::error::{E2eError, E2eResult};
use crate::page::Page;
use crate::pages::BasePage;
use crate::report::{CaseResult, SuiteResult};
use crate::server::ServerHandle;
use crate::suites;

pub struct Harness {
    config: HarnessConfig,
    server: Option<ServerHandle>,
    data: TestDataFactory,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_run_id(config, RunId::random())
    }

    /// Use an explicit run id (CI builds pass their build number here)
    pub fn with_run_id(config: HarnessConfig, run_id: RunId) -> Self {
        info!("Harness run id: {}", run_id);
        Self {
            config,
            server: None,
            data: TestDataFactory::new(run_id),
        }
    }

    /// Ensure a console is reachable, spawning one if none was supplied
    pub async fn ensure_server(&mut self) -> E2eResult<()> {
        if self.config.base_url.is_some() || self.server.is_some() {
            return Ok(());
        }
        let server = ServerHandle::spawn(self.config.server.clone()).await?;
        self.server = Some(server);
        Ok(())
    }

    pub fn stop_server(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    fn base_url(&self) -> String {
        if let Some(url) = &self.config.base_url {
            return url.trim_end_matches('/').to_string();
        }
        self.server
            .as_ref()
            .map(|s| s.base_url().to_string())
            .unwrap_or_else(|| self.config.driver.base_url.clone())
    }

    fn driver_config(&self) -> DriverConfig {
        let mut config = self.config.driver.clone();
        config.base_url = self.base_url();
        config.screenshot_dir = self.config.output_dir.join("screenshots");
        config
    }

    /// Run every built-in case and aggregate the results
    pub async fn run_all(&mut self) -> E2eResult<SuiteResult> {
        self.run_cases(suites::ALL_CASES).await
    }

    /// Run a named subset of the built-in cases
    pub async fn run_cases(&mut self, cases: &[&str]) -> E2eResult<SuiteResult> {
        self.ensure_server().await?;

        let start = Instant::now();
        let mut results = Vec::with_capacity(cases.len());

        info!("Running {} case(s)...", cases.len());

        for name in cases {
            let case_start = Instant::now();
            let result = match self.run_case(name).await {
                Ok(()) => {
                    let result = CaseResult::passed(*name, case_start.elapsed());
                    info!("PASS {} ({} ms)", name, result.duration_ms);
                    result
                }
                Err(e) => {
                    error!("FAIL {} - {}", name, e);
                    CaseResult::failed(*name, case_start.elapsed(), e.to_string())
                }
            };
            results.push(result);
        }

        let suite = SuiteResult::from_results(results, start.elapsed());
        info!(
            "Results: {} passed, {} failed ({} ms)",
            suite.passed, suite.failed, suite.duration_ms
        );
        Ok(suite)
    }

    /// Run one case on a fresh tab.
    ///
    /// A failure aborts only this case; the next one gets its own driver.
    pub async fn run_case(&mut self, name: &str) -> E2eResult<()> {
        let driver = Driver::launch(self.driver_config()).await?;
        let base = BasePage::new(Page::new(driver));

        match name {
            suites::NAVIGATION_HEADINGS => suites::navigation_headings(base).await,
            suites::CONNECTION_INDICATOR => suites::connection_indicator(base).await,
            suites::SCENARIO_CREATE => suites::scenario_create(base, &mut self.data).await,
            suites::SCENARIO_DUPLICATE => suites::scenario_duplicate(base, &mut self.data).await,
            suites::SCENARIO_EDIT => suites::scenario_edit(base, &mut self.data).await,
            suites::SCENARIO_DELETE => suites::scenario_delete(base, &mut self.data).await,
            suites::FORM_VALIDATION => suites::form_validation(base).await,
            other => Err(E2eError::UnknownCase(other.to_string())),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = self.stop_server();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_base_url_wins() {
        let mut config = HarnessConfig::default();
        config.base_url = Some("http://console.test/".to_string());
        let harness = Harness::with_run_id(config, RunId::new("t1"));

        assert_eq!(harness.base_url(), "http://console.test");
        assert_eq!(
            harness.driver_config().base_url,
            "http://console.test"
        );
    }

    #[test]
    fn test_screenshots_land_under_output_dir() {
        let mut config = HarnessConfig::default();
        config.output_dir = std::path::PathBuf::from("out");
        let harness = Harness::with_run_id(config, RunId::new("t2"));

        assert_eq!(
            harness.driver_config().screenshot_dir,
            std::path::PathBuf::from("out/screenshots")
        );
    }

    #[test]
    fn test_fallback_base_url_without_server() {
        let harness = Harness::with_run_id(HarnessConfig::default(), RunId::new("t3"));
        assert_eq!(harness.base_url(), harness.config.driver.base_url);
    }
}
