//! LoadLab E2E Test Harness
//!
//! A Rust-controlled end-to-end harness for the LoadLab console that:
//! - Spawns the console web server as a subprocess
//! - Drives a persistent Playwright sidecar over a line-JSON protocol
//! - Wraps the console's screens in page objects
//! - Runs built-in test cases and writes a JSON report
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Harness (Rust)                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Harness                                                     │
//! │    ├── ServerHandle       spawn + health-check the console   │
//! │    ├── suites::*          built-in cases, one Driver each    │
//! │    └── SuiteResult        aggregate + JSON report            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Page objects                                                │
//! │    ├── BasePage           navigate / wait / safe act / probe │
//! │    ├── ScenariosPage      cards, create/edit/dup/delete      │
//! │    └── NewScenarioPage    form fills + submit                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Page ──► Driver ──► node driver.js ──► Playwright browser   │
//! │        (typed calls)   (line JSON over stdin/stdout)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod harness;
pub mod page;
pub mod pages;
pub mod report;
pub mod server;
pub mod suites;

pub use config::HarnessConfig;
pub use driver::{Browser, Driver, DriverConfig};
pub use error::{E2eError, E2eResult};
pub use harness::Harness;
pub use page::Page;
pub use report::{CaseResult, SuiteResult};
