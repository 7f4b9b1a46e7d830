//! Scenario creation/edit form
//!
//! Wraps `/scenarios/new` and the edit variant of the same form. Composite
//! fills run in a fixed order with no rollback: test state is disposable,
//! so a failure mid-form simply leaves a partially-filled page behind.

use loadlab_common::{Route, ScenarioConfig};
use tracing::info;

use crate::error::E2eResult;
use crate::pages::{BasePage, ScenariosPage};

const FORM: &str = "[data-testid=\"scenario-form\"]";
const NAME_INPUT: &str = "[data-testid=\"scenario-name-input\"]";
const DESCRIPTION_INPUT: &str = "[data-testid=\"scenario-description-input\"]";
const URL_INPUT: &str = "[data-testid=\"scenario-url-input\"]";
const METHOD_SELECT: &str = "[data-testid=\"scenario-method-select\"]";
const USERS_INPUT: &str = "[data-testid=\"scenario-users-input\"]";
const DURATION_INPUT: &str = "[data-testid=\"scenario-duration-input\"]";
const RAMP_UP_INPUT: &str = "[data-testid=\"scenario-rampup-input\"]";
const PATTERN_SELECT: &str = "[data-testid=\"scenario-pattern-select\"]";
const SUBMIT_BUTTON: &str = "[data-testid=\"scenario-submit\"]";

pub struct NewScenarioPage {
    base: BasePage,
}

impl NewScenarioPage {
    /// Navigate to `/scenarios/new` directly
    pub async fn open(mut base: BasePage) -> E2eResult<Self> {
        base.navigate_to(Route::NewScenario.path()).await?;
        Self::attach(base).await
    }

    /// Take over a tab that is already transitioning to the form
    pub(crate) async fn attach(mut base: BasePage) -> E2eResult<Self> {
        base.wait_for_element(FORM).await?;
        Ok(Self { base })
    }

    pub fn base(&mut self) -> &mut BasePage {
        &mut self.base
    }

    pub fn base_owned(self) -> BasePage {
        self.base
    }

    pub async fn fill_name(&mut self, name: &str) -> E2eResult<()> {
        self.base.safe_fill(NAME_INPUT, name).await
    }

    pub async fn fill_description(&mut self, description: &str) -> E2eResult<()> {
        self.base.safe_fill(DESCRIPTION_INPUT, description).await
    }

    pub async fn fill_target_url(&mut self, url: &str) -> E2eResult<()> {
        self.base.safe_fill(URL_INPUT, url).await
    }

    pub async fn select_method(&mut self, method: loadlab_common::HttpMethod) -> E2eResult<()> {
        self.base.safe_select(METHOD_SELECT, method.as_str()).await
    }

    pub async fn fill_virtual_users(&mut self, users: u32) -> E2eResult<()> {
        self.base.safe_fill(USERS_INPUT, &users.to_string()).await
    }

    pub async fn fill_duration_secs(&mut self, secs: u32) -> E2eResult<()> {
        self.base.safe_fill(DURATION_INPUT, &secs.to_string()).await
    }

    pub async fn fill_ramp_up_secs(&mut self, secs: u32) -> E2eResult<()> {
        self.base.safe_fill(RAMP_UP_INPUT, &secs.to_string()).await
    }

    pub async fn select_load_pattern(
        &mut self,
        pattern: loadlab_common::LoadPattern,
    ) -> E2eResult<()> {
        self.base.safe_select(PATTERN_SELECT, pattern.as_str()).await
    }

    /// Fill every field of the form from a scenario fixture.
    ///
    /// Order is fixed (name, description, URL, method, users, duration,
    /// ramp-up, pattern); a failure leaves earlier fields filled.
    pub async fn fill_complete_form(&mut self, scenario: &ScenarioConfig) -> E2eResult<()> {
        scenario.validate()?;
        info!("Filling scenario form: {}", scenario.name);

        self.fill_name(&scenario.name).await?;
        if let Some(description) = &scenario.description {
            self.fill_description(description).await?;
        }
        self.fill_target_url(&scenario.target_url).await?;
        self.select_method(scenario.method).await?;
        self.fill_virtual_users(scenario.virtual_users).await?;
        self.fill_duration_secs(scenario.duration_secs).await?;
        self.fill_ramp_up_secs(scenario.ramp_up_secs).await?;
        if let Some(pattern) = scenario.load_pattern {
            self.select_load_pattern(pattern).await?;
        }
        Ok(())
    }

    /// Submit and wait for the redirect back to the scenario list
    pub async fn submit(mut self) -> E2eResult<ScenariosPage> {
        self.base.safe_click(SUBMIT_BUTTON).await?;
        self.base
            .wait_for_element(super::scenarios::PAGE_READY)
            .await?;
        Ok(ScenariosPage::new(self.base))
    }

    /// Submit an invalid form and confirm the console keeps us on it
    pub async fn submit_expecting_rejection(&mut self) -> E2eResult<bool> {
        self.base.safe_click(SUBMIT_BUTTON).await?;
        let timeout = self.base.default_timeout_ms();
        self.base.is_element_visible(FORM, timeout).await
    }

    /// Fill the complete form and submit in one step
    pub async fn create(mut self, scenario: &ScenarioConfig) -> E2eResult<ScenariosPage> {
        self.fill_complete_form(scenario).await?;
        self.submit().await
    }
}
