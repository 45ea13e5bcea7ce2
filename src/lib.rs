//! feedsnap - Incremental infinite-scroll feed collector
//!
//! This crate drives a headless browser through a dynamically-loaded feed,
//! extracting visible items on each scroll round and merging them into a
//! deduplicated snapshot. Work is bounded by a configurable scroll budget,
//! with early exit when page growth stagnates (end of feed).
//!
//! # Architecture
//!
//! ```text
//! run ──▶ Window Resolver ──▶ feed URL
//!  │
//!  ├──▶ Session (cookies) ──▶ Browser Controller (CDP)
//!  │                               │
//!  ▼                               ▼
//! collect_feed loop ────────▶ PageDriver
//!  │   extract pass ──▶ DedupAccumulator
//!  │   scroll + pause
//!  │   ScrollState (stagnation)
//!  ▼
//! persist (JSON snapshot)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use feedsnap::browser::BrowserConfig;
//! use feedsnap::config::RunConfig;
//! use feedsnap::collector;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = RunConfig::from_path("config.yaml")?;
//!     let outcome = collector::run(
//!         &cfg,
//!         &BrowserConfig::default(),
//!         Path::new("cookies.json"),
//!         Path::new("output/feed_raw.json"),
//!     )
//!     .await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod collector;
pub mod config;
pub mod error;
pub mod extraction;
pub mod output;
pub mod session;

// Re-exports for convenience
pub use browser::{BrowserConfig, BrowserController, CdpDriver, PageDriver};
pub use collector::{collect_feed, DedupAccumulator, RunOutcome, ScrollState};
pub use config::{RunConfig, Window};
pub use error::{Error, Result};
pub use extraction::RawRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
