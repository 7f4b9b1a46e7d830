//! Error types for the E2E harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Timeout after {timeout_ms} ms waiting for: {what}")]
    Timeout { what: String, timeout_ms: u64 },

    #[error("Fill verification failed for {selector}: wrote {expected:?}, read back {actual:?}")]
    ValidationMismatch {
        selector: String,
        expected: String,
        actual: String,
    },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Driver process exited unexpectedly")]
    DriverExited,

    #[error("Server failed to start: {0}")]
    ServerStartup(String),

    #[error("Server health check failed after {0} attempts")]
    ServerHealthCheck(usize),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Unknown test case: {0}")]
    UnknownCase(String),

    #[error("Invalid fixture: {0}")]
    Fixture(#[from] loadlab_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl E2eError {
    /// Whether this error is a wait condition that ran out of time.
    ///
    /// Probe methods convert exactly these into `false`; every other
    /// failure keeps propagating.
    pub fn is_timeout(&self) -> bool {
        matches!(self, E2eError::Timeout { .. })
    }
}

pub type E2eResult<T> = Result<T, E2eError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        let err = E2eError::Timeout {
            what: "[data-testid=card]".into(),
            timeout_ms: 5000,
        };
        assert!(err.is_timeout());
        assert!(!E2eError::DriverExited.is_timeout());
    }

    #[test]
    fn test_messages_carry_selector_and_cause() {
        let err = E2eError::ValidationMismatch {
            selector: "#name".into(),
            expected: "a".into(),
            actual: "b".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("#name"));
        assert!(msg.contains("\"a\""));
        assert!(msg.contains("\"b\""));

        let err = E2eError::Navigation {
            url: "/scenarios".into(),
            reason: "net::ERR_CONNECTION_REFUSED".into(),
        };
        assert!(err.to_string().contains("/scenarios"));
        assert!(err.to_string().contains("ERR_CONNECTION_REFUSED"));
    }
}
