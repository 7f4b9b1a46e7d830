//! Built-in test cases
//!
//! Cases own no reusable logic: they drive page objects and assert
//! observable outcomes (URLs, headings, card counts). Each case receives a
//! fresh tab and a run-scoped data factory from the harness.

use loadlab_common::{Route, TestDataFactory};
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::pages::{BasePage, NewScenarioPage, ScenariosPage};

pub const NAVIGATION_HEADINGS: &str = "navigation-headings";
pub const CONNECTION_INDICATOR: &str = "connection-indicator";
pub const SCENARIO_CREATE: &str = "scenario-create";
pub const SCENARIO_DUPLICATE: &str = "scenario-duplicate";
pub const SCENARIO_EDIT: &str = "scenario-edit";
pub const SCENARIO_DELETE: &str = "scenario-delete";
pub const FORM_VALIDATION: &str = "form-validation";

/// All built-in cases, in execution order
pub const ALL_CASES: &[&str] = &[
    NAVIGATION_HEADINGS,
    CONNECTION_INDICATOR,
    SCENARIO_CREATE,
    SCENARIO_DUPLICATE,
    SCENARIO_EDIT,
    SCENARIO_DELETE,
    FORM_VALIDATION,
];

fn assert_that(condition: bool, message: impl Into<String>) -> E2eResult<()> {
    if condition {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(message.into()))
    }
}

/// Every sidebar route renders and shows its expected heading.
///
/// The comparison screen's label is not pinned down; for it we only
/// require a heading to be present.
pub async fn navigation_headings(mut base: BasePage) -> E2eResult<()> {
    for route in Route::all() {
        base.navigate_to(route.path()).await?;
        let heading = base.heading_text().await?;
        debug!("{} -> {:?}", route.path(), heading);

        if *route == Route::Comparison {
            assert_that(
                !heading.is_empty(),
                format!("{} rendered without a heading", route.path()),
            )?;
        } else {
            assert_that(
                heading == route.heading(),
                format!(
                    "{} heading: expected {:?}, got {:?}",
                    route.path(),
                    route.heading(),
                    heading
                ),
            )?;
        }
    }
    base.into_page().close().await
}

/// The dashboard shows the WebSocket indicator in a connected state
pub async fn connection_indicator(mut base: BasePage) -> E2eResult<()> {
    base.navigate_to(Route::Dashboard.path()).await?;
    let connected = base.is_connected().await?;
    let status = base.connection_status().await.unwrap_or_default();
    assert_that(
        connected,
        format!("connection indicator not connected (status text: {:?})", status),
    )?;
    base.into_page().close().await
}

/// Creating a scenario redirects to the list and shows it exactly once
pub async fn scenario_create(base: BasePage, data: &mut TestDataFactory) -> E2eResult<()> {
    let scenario = data.scenario("Automated Test Scenario");

    let list = ScenariosPage::open(base).await?;
    let mut list = list.create_scenario(&scenario).await?;

    let url = list.base().get_current_url().await?;
    assert_that(
        url.ends_with(Route::Scenarios.path()),
        format!("expected redirect to {}, got {}", Route::Scenarios.path(), url),
    )?;

    let names = list.scenario_names().await?;
    let occurrences = names.iter().filter(|n| **n == scenario.name).count();
    assert_that(
        occurrences == 1,
        format!(
            "expected {:?} exactly once in the list, found {} time(s)",
            scenario.name, occurrences
        ),
    )?;

    list.into_base().into_page().close().await
}

/// Duplicating adds exactly one card and the copy is discoverable
pub async fn scenario_duplicate(base: BasePage, data: &mut TestDataFactory) -> E2eResult<()> {
    let scenario = data.scenario("Duplicate Source");

    let list = ScenariosPage::open(base).await?;
    let mut list = list.create_scenario(&scenario).await?;
    let before = list.scenario_count().await?;

    let copy_name = list.duplicate_scenario(&scenario.name).await?;

    let after = list.scenario_count().await?;
    assert_that(
        after == before + 1,
        format!("card count after duplicate: expected {}, got {}", before + 1, after),
    )?;
    assert_that(
        list.has_scenario(&copy_name).await?,
        format!("copy {:?} not found in the list", copy_name),
    )?;

    list.into_base().into_page().close().await
}

/// Renaming through the edit form swaps the old name for the new one
pub async fn scenario_edit(base: BasePage, data: &mut TestDataFactory) -> E2eResult<()> {
    let scenario = data.scenario("Edit Source");
    let new_name = data.scenario_name("Edited Scenario");

    let list = ScenariosPage::open(base).await?;
    let list = list.create_scenario(&scenario).await?;

    let mut form = list.edit_scenario(&scenario.name).await?;
    form.fill_name(&new_name).await?;
    let mut list = form.submit().await?;

    assert_that(
        list.has_scenario(&new_name).await?,
        format!("renamed scenario {:?} not found", new_name),
    )?;
    assert_that(
        !list.has_scenario(&scenario.name).await?,
        format!("old name {:?} still listed after rename", scenario.name),
    )?;

    list.into_base().into_page().close().await
}

/// Deleting removes the card and decreases the count by exactly one
pub async fn scenario_delete(base: BasePage, data: &mut TestDataFactory) -> E2eResult<()> {
    let scenario = data.scenario("Delete Target");

    let list = ScenariosPage::open(base).await?;
    let mut list = list.create_scenario(&scenario).await?;
    let before = list.scenario_count().await?;

    list.delete_scenario(&scenario.name).await?;

    let after = list.scenario_count().await?;
    assert_that(
        after + 1 == before,
        format!(
            "card count after delete: expected {}, got {}",
            before.saturating_sub(1),
            after
        ),
    )?;
    assert_that(
        !list.has_scenario(&scenario.name).await?,
        format!("{:?} still listed after delete", scenario.name),
    )?;

    list.into_base().into_page().close().await
}

/// Submitting the form without a name keeps the user on the form
pub async fn form_validation(base: BasePage) -> E2eResult<()> {
    let mut form = NewScenarioPage::open(base).await?;
    form.fill_target_url("https://example.com").await?;

    let still_on_form = form.submit_expecting_rejection().await?;
    assert_that(
        still_on_form,
        "empty-name submission unexpectedly left the creation form".to_string(),
    )?;

    let mut base = form.base_owned();
    let url = base.get_current_url().await?;
    assert_that(
        url.contains(Route::NewScenario.path()),
        format!("expected to stay on {}, got {}", Route::NewScenario.path(), url),
    )?;

    base.into_page().close().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_names_are_unique() {
        let mut names = ALL_CASES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_CASES.len());
    }

    #[test]
    fn test_assert_that() {
        assert!(assert_that(true, "ok").is_ok());
        let err = assert_that(false, "nope").unwrap_err();
        assert!(matches!(err, E2eError::AssertionFailed(_)));
        assert!(err.to_string().contains("nope"));
    }
}
