//! LoadLab Common Library
//!
//! Shared types for the LoadLab E2E harness: the scenario model used to
//! drive the console's creation form, the console route table, and the
//! run-scoped test-data factory.

pub mod error;
pub mod testdata;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use testdata::{RunId, TestDataFactory};
pub use types::{HttpMethod, LoadPattern, Route, ScenarioConfig};

/// LoadLab harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
