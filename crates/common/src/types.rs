//! Core types for the LoadLab harness

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// HTTP method selectable in the scenario form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "DELETE")]
    Delete,
}

impl Default for HttpMethod {
    fn default() -> Self {
        Self::Get
    }
}

impl HttpMethod {
    /// Value rendered in the console's method dropdown
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

/// Load pattern tag offered by the scenario form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPattern {
    Constant,
    RampUp,
    RampDown,
    Spike,
    Stress,
}

impl LoadPattern {
    /// Option value used by the console's load-pattern dropdown
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPattern::Constant => "constant",
            LoadPattern::RampUp => "ramp-up",
            LoadPattern::RampDown => "ramp-down",
            LoadPattern::Spike => "spike",
            LoadPattern::Stress => "stress",
        }
    }
}

impl std::fmt::Display for LoadPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "constant" => Ok(LoadPattern::Constant),
            "ramp-up" => Ok(LoadPattern::RampUp),
            "ramp-down" => Ok(LoadPattern::RampDown),
            "spike" => Ok(LoadPattern::Spike),
            "stress" => Ok(LoadPattern::Stress),
            other => Err(Error::UnknownLoadPattern(other.to_string())),
        }
    }
}

/// A load-test scenario as entered into the console's creation form.
///
/// The harness never persists these; values flow from a test case through
/// the form and are owned by the application under test afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_url: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub virtual_users: u32,
    pub duration_secs: u32,
    pub ramp_up_secs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_pattern: Option<LoadPattern>,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            target_url: target_url.into(),
            method: HttpMethod::Get,
            virtual_users: 1,
            duration_secs: 60,
            ramp_up_secs: 0,
            load_pattern: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_virtual_users(mut self, virtual_users: u32) -> Self {
        self.virtual_users = virtual_users;
        self
    }

    pub fn with_duration_secs(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_ramp_up_secs(mut self, ramp_up_secs: u32) -> Self {
        self.ramp_up_secs = ramp_up_secs;
        self
    }

    pub fn with_load_pattern(mut self, pattern: LoadPattern) -> Self {
        self.load_pattern = Some(pattern);
        self
    }

    /// Validate the scenario against the form's own constraints.
    ///
    /// The console enforces these server-side as well; validating here lets
    /// test cases fail fast on bad fixtures instead of mid-form.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidScenario("name must not be empty".into()));
        }
        if self.target_url.trim().is_empty() {
            return Err(Error::InvalidScenario(
                "target_url must not be empty".into(),
            ));
        }
        if self.virtual_users == 0 {
            return Err(Error::InvalidScenario(
                "virtual_users must be at least 1".into(),
            ));
        }
        if self.duration_secs == 0 {
            return Err(Error::InvalidScenario(
                "duration_secs must be at least 1".into(),
            ));
        }
        if self.ramp_up_secs > self.duration_secs {
            return Err(Error::InvalidScenario(format!(
                "ramp_up_secs ({}) must not exceed duration_secs ({})",
                self.ramp_up_secs, self.duration_secs
            )));
        }
        Ok(())
    }
}

/// Console routes addressable by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Scenarios,
    NewScenario,
    Executions,
    History,
    Comparison,
}

impl Route {
    /// URL path for this route, relative to the console base URL
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Scenarios => "/scenarios",
            Route::NewScenario => "/scenarios/new",
            Route::Executions => "/executions",
            Route::History => "/history",
            Route::Comparison => "/comparison",
        }
    }

    /// Top-level heading rendered on this route
    pub fn heading(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Scenarios => "Scenarios",
            Route::NewScenario => "New Scenario",
            Route::Executions => "Executions",
            Route::History => "History",
            Route::Comparison => "Comparison",
        }
    }

    /// All top-level navigation targets, in sidebar order
    pub fn all() -> &'static [Route] {
        &[
            Route::Dashboard,
            Route::Scenarios,
            Route::Executions,
            Route::History,
            Route::Comparison,
        ]
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_round_trip() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_load_pattern_values_match_dropdown() {
        assert_eq!(LoadPattern::RampUp.as_str(), "ramp-up");
        assert_eq!("stress".parse::<LoadPattern>().unwrap(), LoadPattern::Stress);
        assert!("sawtooth".parse::<LoadPattern>().is_err());
    }

    #[test]
    fn test_scenario_builder_defaults() {
        let scenario = ScenarioConfig::new("smoke", "https://example.com");
        assert_eq!(scenario.method, HttpMethod::Get);
        assert_eq!(scenario.virtual_users, 1);
        assert!(scenario.description.is_none());
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_scenario_validation_rejects_bad_fixtures() {
        assert!(ScenarioConfig::new("", "https://example.com")
            .validate()
            .is_err());
        assert!(ScenarioConfig::new("smoke", "").validate().is_err());
        assert!(ScenarioConfig::new("smoke", "https://example.com")
            .with_virtual_users(0)
            .validate()
            .is_err());
        assert!(ScenarioConfig::new("smoke", "https://example.com")
            .with_duration_secs(10)
            .with_ramp_up_secs(11)
            .validate()
            .is_err());
    }

    #[test]
    fn test_scenario_serialization_uses_form_values() {
        let scenario = ScenarioConfig::new("smoke", "https://example.com")
            .with_method(HttpMethod::Post)
            .with_load_pattern(LoadPattern::RampUp);
        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["load_pattern"], "ramp-up");
    }

    #[test]
    fn test_route_table() {
        assert_eq!(Route::Dashboard.path(), "/");
        assert_eq!(Route::NewScenario.path(), "/scenarios/new");
        assert_eq!(Route::Executions.heading(), "Executions");
        // NewScenario is reached through the scenarios page, not the sidebar
        assert!(!Route::all().contains(&Route::NewScenario));
        assert_eq!(Route::all().len(), 5);
    }
}
