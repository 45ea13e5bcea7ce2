//! Collection orchestration
//!
//! `collect_feed` is the scroll loop itself, generic over any `PageDriver`.
//! `run` wires the whole thing together: window resolution, session
//! injection, navigation, the loop, guaranteed browser shutdown, and
//! persistence of the final set.

use crate::browser::{BrowserConfig, BrowserController, CdpDriver, PageDriver};
use crate::collector::dedup::DedupAccumulator;
use crate::collector::stagnation::ScrollState;
use crate::config::{RunConfig, Window};
use crate::error::Result;
use crate::extraction::{extract_pass, RawRecord};
use crate::{output, session};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Work bound for one collection loop
#[derive(Debug, Clone)]
pub struct ScrollBudget {
    /// Maximum scroll rounds
    pub scroll_times: u32,
    /// Viewport advance per round, pixels
    pub scroll_delta: i64,
    /// Pause after each scroll
    pub scroll_pause: Duration,
}

impl From<&RunConfig> for ScrollBudget {
    fn from(cfg: &RunConfig) -> Self {
        Self {
            scroll_times: cfg.scroll_times,
            scroll_delta: cfg.scroll_delta,
            scroll_pause: cfg.scroll_pause(),
        }
    }
}

/// Result of the collection loop, before persistence
#[derive(Debug)]
pub struct Harvest {
    /// Deduplicated records
    pub records: Vec<RawRecord>,
    /// Rounds actually executed
    pub rounds: usize,
    /// Whether the loop stopped early on end-of-feed
    pub stagnated: bool,
}

/// Terminal outcome of a run
#[derive(Debug)]
pub enum RunOutcome {
    /// Records were collected and written out
    Saved {
        /// Unique records written
        count: usize,
        /// Rounds executed
        rounds: usize,
        /// Output file path
        path: PathBuf,
    },
    /// Nothing was collected; no output written
    ///
    /// A warning state, not a failure: usually an expired session or a
    /// search that matched nothing.
    Empty {
        /// Rounds executed
        rounds: usize,
    },
}

/// Drive the scroll loop against an already-navigated page
///
/// One round = extract pass, merge, scroll, pause, height check. The loop
/// exits early when the stagnation detector signals end-of-feed, otherwise
/// runs the full budget.
pub async fn collect_feed<D: PageDriver>(driver: &D, budget: &ScrollBudget) -> Result<Harvest> {
    let mut accumulator = DedupAccumulator::new();
    let mut state = ScrollState::new(driver.content_height().await?);
    let mut rounds = 0usize;
    let mut stagnated = false;

    for round in 1..=budget.scroll_times {
        rounds = round as usize;

        accumulator.merge(extract_pass(driver).await?);

        driver.scroll_by(budget.scroll_delta).await?;
        driver.wait(budget.scroll_pause).await;

        if state.update(driver.content_height().await?) {
            info!("End of feed detected at round {}; stopping early", round);
            stagnated = true;
            break;
        }
    }

    Ok(Harvest {
        records: accumulator.finalize(),
        rounds,
        stagnated,
    })
}

/// Persist a harvest, or report the empty outcome without writing
pub fn finish(harvest: Harvest, output_path: &Path) -> Result<RunOutcome> {
    if harvest.records.is_empty() {
        return Ok(RunOutcome::Empty {
            rounds: harvest.rounds,
        });
    }
    output::persist(&harvest.records, output_path)?;
    Ok(RunOutcome::Saved {
        count: harvest.records.len(),
        rounds: harvest.rounds,
        path: output_path.to_path_buf(),
    })
}

/// Execute a full collection run end to end
///
/// Cookie loading happens before any browser work so a missing session file
/// fails fast. The browser is closed on every path out of the session,
/// including navigation failure, before the error propagates.
#[instrument(skip_all, fields(days_back = cfg.days_back, scroll_times = cfg.scroll_times))]
pub async fn run(
    cfg: &RunConfig,
    browser_cfg: &BrowserConfig,
    cookies_path: &Path,
    output_path: &Path,
) -> Result<RunOutcome> {
    let window = Window::resolve(cfg.days_back);
    let url = cfg.feed_url(&window);
    info!("Collecting feed window {} .. {}", window.since, window.until);

    let cookies = session::load_cookies(cookies_path)?;

    let controller = BrowserController::launch(browser_cfg).await?;
    let session_result = drive_session(&controller, cfg, &url, &cookies).await;
    if let Err(e) = controller.close().await {
        warn!("Browser shutdown failed: {}", e);
    }
    let harvest = session_result?;

    finish(harvest, output_path)
}

/// Everything that needs the live browser, so `run` can close it once
async fn drive_session(
    controller: &BrowserController,
    cfg: &RunConfig,
    url: &str,
    cookies: &[session::SessionCookie],
) -> Result<Harvest> {
    let page = controller.new_page().await?;
    session::inject_cookies(&page, cookies).await?;

    let driver = CdpDriver::new(page, &cfg.item_selector);
    driver.navigate(url, cfg.timeout()).await?;

    // Extra settle time for the initial feed paint; best effort only.
    driver.wait(cfg.settle_delay()).await;

    collect_feed(&driver, &ScrollBudget::from(cfg)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_config() {
        let cfg: RunConfig = serde_yaml::from_str(
            "search_url_template: \"https://x.test\"\nscroll_times: 5\nscroll_pause: 0.25\nscroll_delta: 1200",
        )
        .unwrap();
        let budget = ScrollBudget::from(&cfg);
        assert_eq!(budget.scroll_times, 5);
        assert_eq!(budget.scroll_delta, 1200);
        assert_eq!(budget.scroll_pause, Duration::from_millis(250));
    }

    #[test]
    fn test_finish_empty_is_not_an_error() {
        let harvest = Harvest {
            records: Vec::new(),
            rounds: 7,
            stagnated: false,
        };
        let outcome = finish(harvest, Path::new("/tmp/never-written.json")).unwrap();
        assert!(matches!(outcome, RunOutcome::Empty { rounds: 7 }));
    }
}
