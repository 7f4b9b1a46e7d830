//! E2E harness entry point
//!
//! This file is the test binary that drives a real browser against the
//! LoadLab console. Run with: cargo test --package loadlab-e2e --test e2e
//!
//! Machines without Playwright (or without a console binary and no
//! --base-url) skip cleanly with exit code 0 so plain `cargo test` stays
//! green.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use loadlab_common::RunId;
use loadlab_e2e::driver::{check_playwright_installed, Browser};
use loadlab_e2e::{E2eResult, Harness, HarnessConfig};

#[derive(Parser, Debug)]
#[command(name = "loadlab-e2e")]
#[command(about = "E2E test harness for the LoadLab console")]
struct Args {
    /// URL of an already-running console; skips spawning one
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the console binary to spawn
    #[arg(long, default_value = "target/debug/loadlab-web")]
    server_binary: PathBuf,

    /// Path to the console's static assets
    #[arg(long, default_value = "ui/dist")]
    static_dir: PathBuf,

    /// Port to run the console on (0 = auto)
    #[arg(long, default_value = "0")]
    port: u16,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,

    /// Run only the named case
    #[arg(short, long)]
    case: Option<String>,

    /// Explicit run id for fixture names (defaults to a random one)
    #[arg(long)]
    run_id: Option<String>,

    /// Output directory for the report and screenshots
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if check_playwright_installed().is_err() {
        eprintln!("loadlab-e2e: Playwright not found, skipping browser tests");
        eprintln!("loadlab-e2e: install with: npx playwright install");
        std::process::exit(0);
    }

    if args.base_url.is_none() && !args.server_binary.exists() {
        eprintln!(
            "loadlab-e2e: console binary {} not found and no --base-url given, skipping",
            args.server_binary.display()
        );
        std::process::exit(0);
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut config = HarnessConfig::default().apply_env();

    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }
    config.server.binary_path = args.server_binary;
    config.server.static_dir = args.static_dir;
    config.server.port = if args.port == 0 { None } else { Some(args.port) };
    config.driver.browser = Browser::parse(&args.browser);
    config.driver.headless = args.headless;
    config.driver.viewport_width = args.viewport_width;
    config.driver.viewport_height = args.viewport_height;
    config.output_dir = args.output;

    let run_id = args
        .run_id
        .map(RunId::new)
        .unwrap_or_else(RunId::random);
    let mut harness = Harness::with_run_id(config.clone(), run_id);

    let suite = if let Some(case) = args.case {
        harness.run_cases(&[case.as_str()]).await?
    } else {
        harness.run_all().await?
    };

    suite.write_to(&config.output_dir)?;

    Ok(suite.all_passed())
}
