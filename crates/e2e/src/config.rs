//! Harness configuration
//!
//! All knobs are named, typed fields with defaults; environment variables
//! (`LOADLAB_*`) override them for CI use.

use std::path::PathBuf;
use std::time::Duration;

use crate::driver::{Browser, DriverConfig};
use crate::server::ServerConfig;

/// Top-level configuration for a harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Console server to spawn (ignored when `base_url` is set)
    pub server: ServerConfig,

    /// Browser driver settings
    pub driver: DriverConfig,

    /// External console URL; when set, no server is spawned
    pub base_url: Option<String>,

    /// Output directory for the JSON report and screenshots
    pub output_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            driver: DriverConfig::default(),
            base_url: None,
            output_dir: PathBuf::from("test-results"),
        }
    }
}

impl HarnessConfig {
    /// Apply `LOADLAB_*` environment overrides on top of the current values
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("LOADLAB_BASE_URL") {
            if !url.is_empty() {
                self.base_url = Some(url);
            }
        }
        if let Ok(path) = std::env::var("LOADLAB_SERVER_BINARY") {
            self.server.binary_path = PathBuf::from(path);
        }
        if let Ok(headless) = std::env::var("LOADLAB_HEADLESS") {
            self.driver.headless = headless != "0" && headless != "false";
        }
        if let Ok(browser) = std::env::var("LOADLAB_BROWSER") {
            self.driver.browser = Browser::parse(&browser);
        }
        if let Ok(timeout) = std::env::var("LOADLAB_DEFAULT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.driver.default_timeout_ms = ms;
            }
        }
        self
    }

    /// Default per-wait timeout as a `Duration`
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.driver.default_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert!(config.base_url.is_none());
        assert_eq!(config.output_dir, PathBuf::from("test-results"));
        assert_eq!(config.driver.default_timeout_ms, 5000);
        assert!(config.driver.headless);
    }

    #[test]
    fn test_default_timeout_duration() {
        let mut config = HarnessConfig::default();
        config.driver.default_timeout_ms = 250;
        assert_eq!(config.default_timeout(), Duration::from_millis(250));
    }
}
