//! Page Object Model for the LoadLab console
//!
//! Each screen is wrapped by a page object holding a private selector
//! table; test cases call named domain methods and never touch raw
//! selectors. Feature pages compose a [`BasePage`] rather than inheriting
//! from it, and ownership of the underlying tab moves with the user's
//! navigation: transitions consume the source page and return the target.

pub mod new_scenario;
pub mod scenarios;

pub use new_scenario::NewScenarioPage;
pub use scenarios::ScenariosPage;

use tracing::debug;

use crate::driver::{DialogAction, WaitState};
use crate::error::{E2eError, E2eResult};
use crate::page::Page;

/// Top-level heading present on every console route
const HEADING: &str = "main h1";

/// WebSocket connection indicator in the console header
const CONNECTION_STATUS: &str = "[data-testid=\"connection-status\"]";

/// Shared navigation and interaction primitives for all page objects.
///
/// Every method is one independent request/response cycle against the
/// browser; there is no cross-call sequencing beyond "wait, then act".
pub struct BasePage {
    page: Page,
    default_timeout_ms: u64,
}

impl BasePage {
    pub fn new(page: Page) -> Self {
        let default_timeout_ms = page.default_timeout_ms();
        Self {
            page,
            default_timeout_ms,
        }
    }

    /// Give the tab back, shutting nothing down
    pub fn into_page(self) -> Page {
        self.page
    }

    /// Navigate to a console path and wait for the document to load
    pub async fn navigate_to(&mut self, path: &str) -> E2eResult<()> {
        debug!("navigate_to {}", path);
        self.page.goto(path).await
    }

    /// Wait until the element is visible, with the default timeout
    pub async fn wait_for_element(&mut self, selector: &str) -> E2eResult<()> {
        self.wait_for_element_with_timeout(selector, self.default_timeout_ms)
            .await
    }

    pub async fn wait_for_element_with_timeout(
        &mut self,
        selector: &str,
        timeout_ms: u64,
    ) -> E2eResult<()> {
        self.page
            .wait_for_selector(selector, WaitState::Visible, timeout_ms)
            .await
    }

    /// Wait until the element is gone (hidden or detached)
    pub async fn wait_for_element_hidden(&mut self, selector: &str) -> E2eResult<()> {
        self.page
            .wait_for_selector(selector, WaitState::Hidden, self.default_timeout_ms)
            .await
    }

    /// Wait for the element, then click it
    pub async fn safe_click(&mut self, selector: &str) -> E2eResult<()> {
        self.wait_for_element(selector).await?;
        self.page.click(selector, self.default_timeout_ms).await
    }

    /// Wait for the field, fill it, and verify the written value round-trips
    pub async fn safe_fill(&mut self, selector: &str, value: &str) -> E2eResult<()> {
        self.wait_for_element(selector).await?;
        self.page
            .fill(selector, value, self.default_timeout_ms)
            .await?;
        let actual = self
            .page
            .input_value(selector, self.default_timeout_ms)
            .await?;
        if actual != value {
            return Err(E2eError::ValidationMismatch {
                selector: selector.to_string(),
                expected: value.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Wait for the dropdown, choose an option, and verify the selection
    pub async fn safe_select(&mut self, selector: &str, value: &str) -> E2eResult<()> {
        self.wait_for_element(selector).await?;
        self.page
            .select_option(selector, value, self.default_timeout_ms)
            .await?;
        let actual = self
            .page
            .input_value(selector, self.default_timeout_ms)
            .await?;
        if actual != value {
            return Err(E2eError::ValidationMismatch {
                selector: selector.to_string(),
                expected: value.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Probe variant of [`wait_for_element`]: timeout becomes `false`.
    ///
    /// Only wait-condition timeouts are swallowed; driver or protocol
    /// failures still propagate.
    pub async fn is_element_visible(
        &mut self,
        selector: &str,
        timeout_ms: u64,
    ) -> E2eResult<bool> {
        match self
            .page
            .wait_for_selector(selector, WaitState::Visible, timeout_ms)
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Text content of an element; empty string when the node has no text
    pub async fn get_text_content(&mut self, selector: &str) -> E2eResult<String> {
        self.page
            .text_content(selector, self.default_timeout_ms)
            .await
    }

    pub async fn get_current_url(&mut self) -> E2eResult<String> {
        self.page.current_url().await
    }

    pub async fn get_page_title(&mut self) -> E2eResult<String> {
        self.page.title().await
    }

    pub async fn take_screenshot(&mut self, name: &str) -> E2eResult<std::path::PathBuf> {
        self.page.screenshot(name).await
    }

    /// Trimmed text of the route's top-level heading
    pub async fn heading_text(&mut self) -> E2eResult<String> {
        Ok(self.get_text_content(HEADING).await?.trim().to_string())
    }

    /// Raw text of the WebSocket connection indicator
    pub async fn connection_status(&mut self) -> E2eResult<String> {
        Ok(self
            .get_text_content(CONNECTION_STATUS)
            .await?
            .trim()
            .to_string())
    }

    /// Whether the console reports a live WebSocket connection
    pub async fn is_connected(&mut self) -> E2eResult<bool> {
        if !self
            .is_element_visible(CONNECTION_STATUS, self.default_timeout_ms)
            .await?
        {
            return Ok(false);
        }
        Ok(self.connection_status().await?.contains("Connected"))
    }

    /// Arm a one-shot accept/dismiss handler for the next dialog.
    ///
    /// Must run before the click that raises the dialog.
    pub async fn arm_dialog(&mut self, action: DialogAction) -> E2eResult<()> {
        self.page.once_dialog(action).await
    }

    pub fn default_timeout_ms(&self) -> u64 {
        self.default_timeout_ms
    }

    pub(crate) fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
