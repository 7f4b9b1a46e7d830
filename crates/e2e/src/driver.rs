//! Playwright driver sidecar
//!
//! A generated Node script is spawned once per test and kept alive for the
//! whole browser session. Rust sends one command per line on stdin and
//! reads one JSON response per line from stdout, so mid-test reads
//! (`input_value`, `text_content`) return real values instead of requiring
//! a whole new browser launch per step.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as TokioCommand};
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};

/// How long to wait for the sidecar to report readiness
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }

    /// Lenient parse for CLI/env values; unknown names fall back to chromium
    pub fn parse(s: &str) -> Self {
        match s {
            "firefox" => Browser::Firefox,
            "webkit" => Browser::Webkit,
            _ => Browser::Chromium,
        }
    }
}

/// Configuration for the Playwright sidecar
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub default_timeout_ms: u64,
    pub screenshot_dir: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            default_timeout_ms: 5000,
            screenshot_dir: PathBuf::from("test-results/screenshots"),
        }
    }
}

/// Element state accepted by `wait_for_selector`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    /// Playwright's state option value
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

/// What to do with a browser dialog when it fires
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogAction {
    Accept,
    Dismiss,
}

/// One command on the driver wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverCommand {
    Goto {
        url: String,
    },
    WaitForSelector {
        selector: String,
        state: WaitState,
        timeout_ms: u64,
    },
    Click {
        selector: String,
        timeout_ms: u64,
    },
    Fill {
        selector: String,
        value: String,
        timeout_ms: u64,
    },
    InputValue {
        selector: String,
        timeout_ms: u64,
    },
    TextContent {
        selector: String,
        timeout_ms: u64,
    },
    IsVisible {
        selector: String,
    },
    Count {
        selector: String,
    },
    SelectOption {
        selector: String,
        value: String,
        timeout_ms: u64,
    },
    Title,
    Url,
    WaitForUrl {
        url_contains: String,
        timeout_ms: u64,
    },
    Screenshot {
        path: String,
        full_page: bool,
    },
    OnceDialog {
        action: DialogAction,
    },
    Close,
}

impl DriverCommand {
    /// Short description used in timeout and log messages
    pub fn describe(&self) -> String {
        match self {
            DriverCommand::Goto { url } => format!("goto:{}", url),
            DriverCommand::WaitForSelector { selector, state, .. } => {
                format!("wait[{}]:{}", state.as_str(), selector)
            }
            DriverCommand::Click { selector, .. } => format!("click:{}", selector),
            DriverCommand::Fill { selector, .. } => format!("fill:{}", selector),
            DriverCommand::InputValue { selector, .. } => format!("input_value:{}", selector),
            DriverCommand::TextContent { selector, .. } => format!("text_content:{}", selector),
            DriverCommand::IsVisible { selector } => format!("is_visible:{}", selector),
            DriverCommand::Count { selector } => format!("count:{}", selector),
            DriverCommand::SelectOption { selector, .. } => format!("select:{}", selector),
            DriverCommand::Title => "title".to_string(),
            DriverCommand::Url => "url".to_string(),
            DriverCommand::WaitForUrl { url_contains, .. } => {
                format!("wait_for_url:{}", url_contains)
            }
            DriverCommand::Screenshot { path, .. } => format!("screenshot:{}", path),
            DriverCommand::OnceDialog { action } => format!("once_dialog:{:?}", action),
            DriverCommand::Close => "close".to_string(),
        }
    }

    /// The wait budget of this command, if it has one
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            DriverCommand::WaitForSelector { timeout_ms, .. }
            | DriverCommand::Click { timeout_ms, .. }
            | DriverCommand::Fill { timeout_ms, .. }
            | DriverCommand::InputValue { timeout_ms, .. }
            | DriverCommand::TextContent { timeout_ms, .. }
            | DriverCommand::SelectOption { timeout_ms, .. }
            | DriverCommand::WaitForUrl { timeout_ms, .. } => Some(*timeout_ms),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    id: u64,
    #[serde(flatten)]
    command: &'a DriverCommand,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    value: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    timeout: bool,
}

/// Handle to the running sidecar process
pub struct Driver {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    config: DriverConfig,
    // Holds the generated script for the lifetime of the process
    _script_dir: tempfile::TempDir,
}

impl Driver {
    /// Spawn the sidecar and wait for it to report readiness
    pub async fn launch(config: DriverConfig) -> E2eResult<Self> {
        check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;

        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("driver.js");
        std::fs::write(&script_path, driver_script(&config))?;

        debug!("Spawning Playwright driver: {}", script_path.display());

        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| E2eError::Driver(format!("failed to spawn node: {}", e)))?;

        let stdin = child.stdin.take().ok_or(E2eError::DriverExited)?;
        let stdout = child.stdout.take().ok_or(E2eError::DriverExited)?;
        let mut lines = BufReader::new(stdout).lines();

        // The first line announces readiness (or a launch failure)
        let ready = tokio::time::timeout(LAUNCH_TIMEOUT, lines.next_line())
            .await
            .map_err(|_| E2eError::Timeout {
                what: "driver startup".to_string(),
                timeout_ms: LAUNCH_TIMEOUT.as_millis() as u64,
            })?
            .map_err(E2eError::Io)?
            .ok_or(E2eError::DriverExited)?;

        let response: Response = serde_json::from_str(&ready)
            .map_err(|_| E2eError::Driver(format!("unexpected startup line: {}", ready)))?;
        if !response.ready {
            return Err(E2eError::Driver(
                response
                    .error
                    .unwrap_or_else(|| "driver failed to start".to_string()),
            ));
        }

        Ok(Self {
            child,
            stdin,
            lines,
            next_id: 0,
            config,
            _script_dir: script_dir,
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Send one command and wait for its response.
    ///
    /// Execution is strictly sequential: `&mut self` guarantees a single
    /// in-flight command per driver.
    pub async fn execute(&mut self, command: DriverCommand) -> E2eResult<serde_json::Value> {
        self.next_id += 1;
        let id = self.next_id;

        let mut line = serde_json::to_string(&Request {
            id,
            command: &command,
        })?;
        line.push('\n');

        debug!("driver <- {}", command.describe());

        self.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|_| E2eError::DriverExited)?;
        self.stdin
            .flush()
            .await
            .map_err(|_| E2eError::DriverExited)?;

        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(E2eError::Io)?
                .ok_or(E2eError::DriverExited)?;

            let response: Response = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(_) => {
                    // Stray console output from the page under test
                    warn!("driver: ignoring non-JSON line: {}", line);
                    continue;
                }
            };

            if response.id != id {
                warn!("driver: out-of-order response id {} (want {})", response.id, id);
                continue;
            }

            if response.ok {
                return Ok(response.value);
            }

            let reason = response
                .error
                .unwrap_or_else(|| "unknown driver error".to_string());
            if response.timeout {
                return Err(E2eError::Timeout {
                    what: command.describe(),
                    timeout_ms: command
                        .timeout_ms()
                        .unwrap_or(self.config.default_timeout_ms),
                });
            }
            return Err(E2eError::Driver(format!(
                "{} failed: {}",
                command.describe(),
                reason
            )));
        }
    }

    /// Close the browser and wait for the sidecar to exit
    pub async fn close(mut self) -> E2eResult<()> {
        // Best effort: the process is killed on drop regardless
        if self.execute(DriverCommand::Close).await.is_ok() {
            let _ = self.child.wait().await;
        }
        Ok(())
    }
}

/// Check that Playwright is available on this machine
pub fn check_playwright_installed() -> E2eResult<()> {
    let status = std::process::Command::new("npx")
        .args(["playwright", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(E2eError::PlaywrightNotFound),
    }
}

/// Generate the Node driver script for the given configuration.
///
/// Pure function so the emitted protocol handling is unit-testable.
pub fn driver_script(config: &DriverConfig) -> String {
    format!(
        r#"const {{ chromium, firefox, webkit }} = require('playwright');
const readline = require('readline');

const reply = (msg) => process.stdout.write(JSON.stringify(msg) + '\n');

(async () => {{
  let browser;
  try {{
    browser = await {browser}.launch({{ headless: {headless} }});
  }} catch (e) {{
    reply({{ ready: false, error: 'browser launch failed: ' + e.message }});
    process.exit(1);
  }}
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';

  reply({{ ready: true }});

  const rl = readline.createInterface({{ input: process.stdin }});
  for await (const line of rl) {{
    if (!line.trim()) continue;
    let req;
    try {{
      req = JSON.parse(line);
    }} catch (e) {{
      reply({{ id: 0, ok: false, error: 'bad request: ' + e.message }});
      continue;
    }}
    try {{
      let value = null;
      switch (req.cmd) {{
        case 'goto':
          await page.goto(baseUrl + req.url, {{ waitUntil: 'load' }});
          break;
        case 'wait_for_selector':
          await page.waitForSelector(req.selector, {{ state: req.state, timeout: req.timeout_ms }});
          break;
        case 'click':
          await page.click(req.selector, {{ timeout: req.timeout_ms }});
          break;
        case 'fill':
          await page.fill(req.selector, req.value, {{ timeout: req.timeout_ms }});
          break;
        case 'input_value':
          value = await page.inputValue(req.selector, {{ timeout: req.timeout_ms }});
          break;
        case 'text_content':
          value = await page.textContent(req.selector, {{ timeout: req.timeout_ms }});
          break;
        case 'is_visible':
          value = await page.isVisible(req.selector);
          break;
        case 'count':
          value = await page.locator(req.selector).count();
          break;
        case 'select_option':
          await page.selectOption(req.selector, req.value, {{ timeout: req.timeout_ms }});
          break;
        case 'title':
          value = await page.title();
          break;
        case 'url':
          value = page.url();
          break;
        case 'wait_for_url':
          await page.waitForURL((u) => u.toString().includes(req.url_contains), {{ timeout: req.timeout_ms }});
          break;
        case 'screenshot':
          await page.screenshot({{ path: req.path, fullPage: req.full_page }});
          break;
        case 'once_dialog':
          page.once('dialog', (d) => req.action === 'accept' ? d.accept() : d.dismiss());
          break;
        case 'close':
          reply({{ id: req.id, ok: true, value: null }});
          await browser.close();
          process.exit(0);
        default:
          throw new Error('unknown cmd: ' + req.cmd);
      }}
      reply({{ id: req.id, ok: true, value: value }});
    }} catch (e) {{
      reply({{ id: req.id, ok: false, error: e.message, timeout: e.name === 'TimeoutError' }});
    }}
  }}
  await browser.close();
}})();
"#,
        browser = config.browser.as_str(),
        headless = config.headless,
        width = config.viewport_width,
        height = config.viewport_height,
        base_url = config.base_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_embeds_config() {
        let config = DriverConfig {
            base_url: "http://127.0.0.1:9999".to_string(),
            browser: Browser::Firefox,
            headless: false,
            viewport_width: 1920,
            viewport_height: 1080,
            ..Default::default()
        };
        let script = driver_script(&config);
        assert!(script.contains("await firefox.launch({ headless: false })"));
        assert!(script.contains("width: 1920, height: 1080"));
        assert!(script.contains("const baseUrl = 'http://127.0.0.1:9999';"));
    }

    #[test]
    fn test_script_dispatches_every_command() {
        let script = driver_script(&DriverConfig::default());
        for cmd in [
            "goto",
            "wait_for_selector",
            "click",
            "fill",
            "input_value",
            "text_content",
            "is_visible",
            "count",
            "select_option",
            "title",
            "url",
            "wait_for_url",
            "screenshot",
            "once_dialog",
            "close",
        ] {
            assert!(
                script.contains(&format!("case '{}':", cmd)),
                "missing dispatch for {}",
                cmd
            );
        }
    }

    #[test]
    fn test_script_registers_dialog_handler_as_one_shot() {
        let script = driver_script(&DriverConfig::default());
        assert!(script.contains("page.once('dialog'"));
    }

    #[test]
    fn test_script_flags_timeouts() {
        let script = driver_script(&DriverConfig::default());
        assert!(script.contains("timeout: e.name === 'TimeoutError'"));
    }

    #[test]
    fn test_command_wire_format() {
        let command = DriverCommand::WaitForSelector {
            selector: "[data-testid=\"card\"]".to_string(),
            state: WaitState::Visible,
            timeout_ms: 5000,
        };
        let wire = serde_json::to_value(Request {
            id: 7,
            command: &command,
        })
        .unwrap();
        assert_eq!(
            wire,
            json!({
                "id": 7,
                "cmd": "wait_for_selector",
                "selector": "[data-testid=\"card\"]",
                "state": "visible",
                "timeout_ms": 5000,
            })
        );
    }

    #[test]
    fn test_dialog_action_wire_format() {
        let wire = serde_json::to_value(DriverCommand::OnceDialog {
            action: DialogAction::Accept,
        })
        .unwrap();
        assert_eq!(wire, json!({ "cmd": "once_dialog", "action": "accept" }));
    }

    #[test]
    fn test_response_parsing() {
        let response: Response =
            serde_json::from_str(r#"{"id":3,"ok":true,"value":"Dashboard"}"#).unwrap();
        assert_eq!(response.id, 3);
        assert!(response.ok);
        assert_eq!(response.value, json!("Dashboard"));
        assert!(!response.timeout);

        let response: Response =
            serde_json::from_str(r#"{"id":4,"ok":false,"error":"Timeout 5000ms","timeout":true}"#)
                .unwrap();
        assert!(!response.ok);
        assert!(response.timeout);

        let ready: Response = serde_json::from_str(r#"{"ready":true}"#).unwrap();
        assert!(ready.ready);
    }

    #[test]
    fn test_command_describe_and_timeout() {
        let command = DriverCommand::Click {
            selector: "#save".to_string(),
            timeout_ms: 1234,
        };
        assert_eq!(command.describe(), "click:#save");
        assert_eq!(command.timeout_ms(), Some(1234));
        assert_eq!(DriverCommand::Title.timeout_ms(), None);
    }

    #[test]
    fn test_browser_parse() {
        assert_eq!(Browser::parse("webkit"), Browser::Webkit);
        assert_eq!(Browser::parse("anything-else"), Browser::Chromium);
    }
}
