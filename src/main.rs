//! feedsnap CLI
//!
//! Runs one collection pass over the configured feed and writes the
//! deduplicated snapshot.

use anyhow::Context;
use clap::Parser;
use feedsnap::browser::BrowserConfig;
use feedsnap::collector::{self, RunOutcome};
use feedsnap::config::RunConfig;
use std::path::PathBuf;

/// Incremental infinite-scroll feed collector
#[derive(Parser, Debug)]
#[command(name = "feedsnap")]
#[command(version)]
#[command(about = "Collect a deduplicated snapshot of an infinite-scroll feed")]
struct Args {
    /// Path to the YAML run configuration
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Path to the session cookie file (JSON array)
    #[arg(long, default_value = "cookies.json")]
    cookies: PathBuf,

    /// Output path for the collected snapshot
    #[arg(short, long, default_value = "output/feed_raw.json")]
    output: PathBuf,

    /// Run the browser headless
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = RunConfig::from_path(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    let browser_cfg = BrowserConfig {
        headless: args.headless,
        chrome_path: args.chrome_path.clone(),
        ..BrowserConfig::default()
    };

    let outcome = collector::run(&cfg, &browser_cfg, &args.cookies, &args.output)
        .await
        .map_err(|e| {
            tracing::error!("Run failed: {}", e);
            e
        })?;

    match outcome {
        RunOutcome::Saved {
            count,
            rounds,
            path,
        } => {
            tracing::info!(
                "Saved {} unique records after {} rounds -> {}",
                count,
                rounds,
                path.display()
            );
        }
        RunOutcome::Empty { rounds } => {
            tracing::warn!(
                "Nothing collected after {} rounds; check the session cookies or the search window",
                rounds
            );
        }
    }

    Ok(())
}
