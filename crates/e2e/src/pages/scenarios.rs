//! Scenario list page
//!
//! Wraps `/scenarios`: the card grid plus the per-card action controls
//! (edit, duplicate, delete) and the entry point to the creation form.

use loadlab_common::{Route, ScenarioConfig};
use tracing::info;

use crate::driver::DialogAction;
use crate::error::E2eResult;
use crate::pages::{BasePage, NewScenarioPage};

pub(crate) const PAGE_READY: &str = "[data-testid=\"scenarios-page\"]";
const NEW_SCENARIO_BUTTON: &str = "[data-testid=\"new-scenario-button\"]";
const CARD: &str = "[data-testid=\"scenario-card\"]";
const CARD_NAME: &str = "[data-testid=\"scenario-name\"]";

/// Escape a scenario name for embedding in a quoted selector string
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Selector for the card whose name is exactly `name`
fn card_selector(name: &str) -> String {
    format!("{}:has({}:text-is(\"{}\"))", CARD, CARD_NAME, escape(name))
}

/// Selector for a named action control inside a specific card
fn card_action_selector(name: &str, action: &str) -> String {
    format!(
        "{} [data-testid=\"scenario-{}\"]",
        card_selector(name),
        action
    )
}

/// Selector for the name node of the i-th card (1-based)
fn nth_card_name_selector(index: usize) -> String {
    format!(":nth-match({}, {})", CARD_NAME, index)
}

pub struct ScenariosPage {
    base: BasePage,
}

impl ScenariosPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Navigate to `/scenarios` and wait for the list to render
    pub async fn open(mut base: BasePage) -> E2eResult<Self> {
        base.navigate_to(Route::Scenarios.path()).await?;
        base.wait_for_element(PAGE_READY).await?;
        Ok(Self { base })
    }

    pub fn base(&mut self) -> &mut BasePage {
        &mut self.base
    }

    pub fn into_base(self) -> BasePage {
        self.base
    }

    /// Number of scenario cards currently listed
    pub async fn scenario_count(&mut self) -> E2eResult<usize> {
        self.base.page_mut().count(CARD).await
    }

    /// Names of all listed scenarios, in display order
    pub async fn scenario_names(&mut self) -> E2eResult<Vec<String>> {
        let count = self.scenario_count().await?;
        let mut names = Vec::with_capacity(count);
        for index in 1..=count {
            let name = self
                .base
                .get_text_content(&nth_card_name_selector(index))
                .await?;
            names.push(name.trim().to_string());
        }
        Ok(names)
    }

    /// Whether a card with exactly this name is visible
    pub async fn has_scenario(&mut self, name: &str) -> E2eResult<bool> {
        let timeout = self.base.default_timeout_ms();
        self.base
            .is_element_visible(&card_selector(name), timeout)
            .await
    }

    /// Click "New Scenario" and hand the tab to the creation form
    pub async fn start_new_scenario(mut self) -> E2eResult<NewScenarioPage> {
        self.base.safe_click(NEW_SCENARIO_BUTTON).await?;
        NewScenarioPage::attach(self.base).await
    }

    /// Create a scenario end to end and return to the refreshed list
    pub async fn create_scenario(self, scenario: &ScenarioConfig) -> E2eResult<ScenariosPage> {
        info!("Creating scenario: {}", scenario.name);
        let form = self.start_new_scenario().await?;
        form.create(scenario).await
    }

    /// Open the edit form for a named scenario
    pub async fn edit_scenario(mut self, name: &str) -> E2eResult<NewScenarioPage> {
        info!("Editing scenario: {}", name);
        self.base
            .safe_click(&card_action_selector(name, "edit"))
            .await?;
        NewScenarioPage::attach(self.base).await
    }

    /// Duplicate a named scenario and wait for the copy's card to appear.
    ///
    /// The console names copies "<name> (Copy)".
    pub async fn duplicate_scenario(&mut self, name: &str) -> E2eResult<String> {
        info!("Duplicating scenario: {}", name);
        self.base
            .safe_click(&card_action_selector(name, "duplicate"))
            .await?;
        let copy_name = format!("{} (Copy)", name);
        self.base
            .wait_for_element(&card_selector(&copy_name))
            .await?;
        Ok(copy_name)
    }

    /// Delete a named scenario, accepting the confirmation dialog.
    ///
    /// The dialog handler is armed before the triggering click; the dialog
    /// event fires asynchronously and needs a handler already attached.
    pub async fn delete_scenario(&mut self, name: &str) -> E2eResult<()> {
        info!("Deleting scenario: {}", name);
        self.base.arm_dialog(DialogAction::Accept).await?;
        self.base
            .safe_click(&card_action_selector(name, "delete"))
            .await?;
        self.base
            .wait_for_element_hidden(&card_selector(name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_selector_targets_exact_name() {
        let selector = card_selector("Smoke Test");
        assert_eq!(
            selector,
            "[data-testid=\"scenario-card\"]:has([data-testid=\"scenario-name\"]:text-is(\"Smoke Test\"))"
        );
    }

    #[test]
    fn test_card_selector_escapes_quotes() {
        let selector = card_selector("the \"big\" run");
        assert!(selector.contains("the \\\"big\\\" run"));
    }

    #[test]
    fn test_action_selector_is_card_scoped() {
        let selector = card_action_selector("Smoke", "delete");
        assert!(selector.starts_with("[data-testid=\"scenario-card\"]"));
        assert!(selector.ends_with(" [data-testid=\"scenario-delete\"]"));
    }

    #[test]
    fn test_nth_name_selector_is_one_based() {
        assert_eq!(
            nth_card_name_selector(1),
            ":nth-match([data-testid=\"scenario-name\"], 1)"
        );
    }
}
