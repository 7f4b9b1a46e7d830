//! Error types for the LoadLab common library

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// LoadLab common error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("Unknown load pattern: {0}")]
    UnknownLoadPattern(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
