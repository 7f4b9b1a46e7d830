//! Console server management
//!
//! Spawns the LoadLab console binary for the duration of a harness run and
//! health-checks it before any browser traffic is sent.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Handle to a running console process
pub struct ServerHandle {
    child: Child,
    base_url: String,
    pub port: u16,
}

impl ServerHandle {
    /// Spawn the console and wait until it answers health checks
    pub async fn spawn(config: ServerConfig) -> E2eResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("Spawning console on port {}", port);

        let mut cmd = Command::new(&config.binary_path);
        cmd.env("LOADLAB_WEB_PORT", port.to_string())
            .env("LOADLAB_WEB_HOST", "127.0.0.1")
            .env("LOADLAB_WEB_STATIC_DIR", &config.static_dir);

        // Test mode swaps the execution engine for a stub so CRUD flows
        // never launch real load
        if config.test_mode {
            cmd.env("LOADLAB_TEST_MODE", "1");
        }

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            E2eError::ServerStartup(format!(
                "Failed to spawn {}: {}",
                config.binary_path.display(),
                e
            ))
        })?;

        let handle = ServerHandle {
            child,
            base_url,
            port,
        };

        handle.wait_for_healthy(config.startup_timeout).await?;

        info!("Console is healthy at {}", handle.base_url);
        Ok(handle)
    }

    /// Poll `/health` until the console answers or the timeout elapses
    async fn wait_for_healthy(&self, timeout_duration: Duration) -> E2eResult<()> {
        let health_url = format!("{}/health", self.base_url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&health_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return Ok(());
                }
                Ok(resp) => {
                    warn!("Health check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for console to start...");
                    }
                    // Connection refused is expected while the console boots
                    if !e.is_connect() {
                        warn!("Health check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::ServerHealthCheck(attempts))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the console, SIGTERM first, then kill
    pub fn stop(&mut self) -> E2eResult<()> {
        info!("Stopping console (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning the console
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the loadlab-web binary
    pub binary_path: PathBuf,

    /// Directory containing the console's built static assets
    pub static_dir: PathBuf,

    /// Port to listen on (None = find a free port)
    pub port: Option<u16>,

    /// Timeout for console startup
    pub startup_timeout: Duration,

    /// Stub out the load-execution engine
    pub test_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("target/debug/loadlab-web"),
            static_dir: PathBuf::from("ui/dist"),
            port: None,
            startup_timeout: Duration::from_secs(30),
            test_mode: true,
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.test_mode);
        assert!(config.port.is_none());
        assert_eq!(config.startup_timeout, Duration::from_secs(30));
    }
}
