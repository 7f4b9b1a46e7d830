//! Run-scoped test data generation
//!
//! Fixture names must be unique per harness run so that list assertions
//! ("present exactly once") are not confused by leftovers from earlier
//! runs against the same console instance. The run id is supplied by the
//! caller; nothing here holds process-global state.

use uuid::Uuid;

use crate::types::{HttpMethod, ScenarioConfig};

/// Identifier scoping all fixtures created by one harness run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

impl RunId {
    /// Wrap an explicit, caller-chosen run id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random run id
    pub fn random() -> Self {
        // Eight hex chars keep scenario names readable in the UI
        let uuid = Uuid::new_v4().simple().to_string();
        Self(uuid[..8].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory deriving unique fixture values from a run id and a counter
#[derive(Debug)]
pub struct TestDataFactory {
    run_id: RunId,
    counter: u32,
}

impl TestDataFactory {
    pub fn new(run_id: RunId) -> Self {
        Self { run_id, counter: 0 }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Next unique scenario name containing the given label
    pub fn scenario_name(&mut self, label: &str) -> String {
        self.counter += 1;
        format!("{} [{}-{}]", label, self.run_id, self.counter)
    }

    /// A complete scenario fixture targeting a well-known public endpoint
    pub fn scenario(&mut self, label: &str) -> ScenarioConfig {
        ScenarioConfig::new(
            self.scenario_name(label),
            "https://jsonplaceholder.typicode.com/posts/1",
        )
        .with_description(format!("Created by harness run {}", self.run_id))
        .with_method(HttpMethod::Get)
        .with_virtual_users(2)
        .with_duration_secs(60)
        .with_ramp_up_secs(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_run_id() {
        let id = RunId::new("ci-42");
        assert_eq!(id.as_str(), "ci-42");
    }

    #[test]
    fn test_random_run_ids_differ() {
        assert_ne!(RunId::random(), RunId::random());
    }

    #[test]
    fn test_names_are_unique_within_a_run() {
        let mut factory = TestDataFactory::new(RunId::new("run1"));
        let a = factory.scenario_name("Smoke");
        let b = factory.scenario_name("Smoke");
        assert_ne!(a, b);
        assert!(a.contains("run1"));
        assert!(a.contains("Smoke"));
    }

    #[test]
    fn test_scenario_fixture_is_valid() {
        let mut factory = TestDataFactory::new(RunId::new("run1"));
        let scenario = factory.scenario("CRUD");
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.virtual_users, 2);
        assert_eq!(scenario.duration_secs, 60);
        assert_eq!(scenario.ramp_up_secs, 5);
    }
}
