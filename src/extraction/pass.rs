//! Per-pass feed item extraction
//!
//! A single malformed or detached item must never abort a pass: candidates
//! that fail to parse are dropped and the pass continues. An empty first
//! query gets exactly one retry after a short delay, covering the render
//! race where the feed has not painted yet.

use crate::browser::PageDriver;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Delay before the single retry of an empty candidate query
const EMPTY_RETRY_DELAY: Duration = Duration::from_secs(1);

/// One feed item as captured at a point in time
///
/// Immutable once created. Identity for dedup purposes is the exact `text`
/// (case- and whitespace-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Visible text of the item
    pub text: String,
    /// Inner markup of the item
    pub raw_html: String,
}

/// Run one extraction pass over the currently-rendered page
///
/// Returns records in DOM encounter order. Items that reappear after
/// scrolling show up again in later passes; the accumulator handles that.
pub async fn extract_pass<D: PageDriver>(driver: &D) -> Result<Vec<RawRecord>> {
    let mut candidates = driver.visible_candidates().await?;

    if candidates.is_empty() {
        driver.wait(EMPTY_RETRY_DELAY).await;
        candidates = driver.visible_candidates().await?;
    }

    let total = candidates.len();
    let records: Vec<RawRecord> = candidates.iter().filter_map(parse_candidate).collect();

    if records.len() < total {
        debug!(
            "Pass extracted {} of {} candidates (rest skipped)",
            records.len(),
            total
        );
    } else {
        trace!("Pass extracted {} candidates", total);
    }

    Ok(records)
}

/// Parse one candidate value, returning None on any shape mismatch
fn parse_candidate(value: &serde_json::Value) -> Option<RawRecord> {
    let text = value.get("text")?.as_str()?;
    let raw_html = value.get("raw_html")?.as_str()?;
    Some(RawRecord {
        text: text.to_string(),
        raw_html: raw_html.to_string(),
    })
}
