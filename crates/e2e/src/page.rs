//! Typed page handle
//!
//! `Page` owns the driver for one browser tab and exposes typed wrappers
//! over the wire commands. Exactly one page-object chain holds a `Page` at
//! a time, so no locking is needed anywhere above this layer.

use std::path::{Path, PathBuf};

use crate::driver::{DialogAction, Driver, DriverCommand, WaitState};
use crate::error::{E2eError, E2eResult};

pub struct Page {
    driver: Driver,
}

impl Page {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }

    /// Default wait budget configured for this tab
    pub fn default_timeout_ms(&self) -> u64 {
        self.driver.config().default_timeout_ms
    }

    fn screenshot_dir(&self) -> PathBuf {
        self.driver.config().screenshot_dir.clone()
    }

    /// Navigate to a path relative to the base URL and wait for load.
    ///
    /// Failures surface as `E2eError::Navigation` with the offending path.
    pub async fn goto(&mut self, path: &str) -> E2eResult<()> {
        let result = self
            .driver
            .execute(DriverCommand::Goto {
                url: path.to_string(),
            })
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(E2eError::Timeout { timeout_ms, .. }) => Err(E2eError::Navigation {
                url: path.to_string(),
                reason: format!("did not settle within {} ms", timeout_ms),
            }),
            Err(E2eError::Driver(reason)) => Err(E2eError::Navigation {
                url: path.to_string(),
                reason,
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn wait_for_selector(
        &mut self,
        selector: &str,
        state: WaitState,
        timeout_ms: u64,
    ) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::WaitForSelector {
                selector: selector.to_string(),
                state,
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    pub async fn click(&mut self, selector: &str, timeout_ms: u64) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::Click {
                selector: selector.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    pub async fn fill(&mut self, selector: &str, value: &str, timeout_ms: u64) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::Fill {
                selector: selector.to_string(),
                value: value.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    /// Current value of an input or textarea
    pub async fn input_value(&mut self, selector: &str, timeout_ms: u64) -> E2eResult<String> {
        let value = self
            .driver
            .execute(DriverCommand::InputValue {
                selector: selector.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Text content of an element; missing text reads as empty string
    pub async fn text_content(&mut self, selector: &str, timeout_ms: u64) -> E2eResult<String> {
        let value = self
            .driver
            .execute(DriverCommand::TextContent {
                selector: selector.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Immediate visibility check, no waiting
    pub async fn is_visible(&mut self, selector: &str) -> E2eResult<bool> {
        let value = self
            .driver
            .execute(DriverCommand::IsVisible {
                selector: selector.to_string(),
            })
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Number of elements currently matching the selector
    pub async fn count(&mut self, selector: &str) -> E2eResult<usize> {
        let value = self
            .driver
            .execute(DriverCommand::Count {
                selector: selector.to_string(),
            })
            .await?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| E2eError::Driver(format!("count returned non-number: {}", value)))
    }

    pub async fn select_option(
        &mut self,
        selector: &str,
        value: &str,
        timeout_ms: u64,
    ) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::SelectOption {
                selector: selector.to_string(),
                value: value.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    pub async fn title(&mut self) -> E2eResult<String> {
        let value = self.driver.execute(DriverCommand::Title).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn current_url(&mut self) -> E2eResult<String> {
        let value = self.driver.execute(DriverCommand::Url).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Wait until the page URL contains the given fragment
    pub async fn wait_for_url(&mut self, url_contains: &str, timeout_ms: u64) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::WaitForUrl {
                url_contains: url_contains.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    /// Capture a full-page screenshot into the configured directory
    pub async fn screenshot(&mut self, name: &str) -> E2eResult<PathBuf> {
        let path = self.screenshot_dir().join(format!("{}.png", name));
        self.screenshot_to(&path, true).await?;
        Ok(path)
    }

    pub async fn screenshot_to(&mut self, path: &Path, full_page: bool) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::Screenshot {
                path: path.to_string_lossy().to_string(),
                full_page,
            })
            .await?;
        Ok(())
    }

    /// Arm a one-shot handler for the next browser dialog.
    ///
    /// Must be called before the action that raises the dialog; the event
    /// fires asynchronously relative to the triggering click.
    pub async fn once_dialog(&mut self, action: DialogAction) -> E2eResult<()> {
        self.driver
            .execute(DriverCommand::OnceDialog { action })
            .await?;
        Ok(())
    }

    /// Close the tab and shut the sidecar down
    pub async fn close(self) -> E2eResult<()> {
        self.driver.close().await
    }
}
