//! Page driver capability interface
//!
//! The collection loop never touches CDP directly; it talks to a
//! `PageDriver`, which exposes exactly the five operations the loop needs.
//! Production uses `CdpDriver` over a ChromiumOxide page; tests feed the
//! loop a scripted fake.

use crate::error::{ExtractionError, NavigationError, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, instrument};

/// Narrow capability interface over a rendered page
#[async_trait]
pub trait PageDriver {
    /// Navigate to a URL, failing after `timeout`
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Measure current page content height in pixels
    async fn content_height(&self) -> Result<i64>;

    /// Snapshot currently-rendered candidate items as raw JSON values
    ///
    /// Each value is one matched element captured as `{text, raw_html}`;
    /// elements that detach mid-read are skipped inside the page script.
    async fn visible_candidates(&self) -> Result<Vec<serde_json::Value>>;

    /// Advance the viewport by `delta` pixels
    async fn scroll_by(&self, delta: i64) -> Result<()>;

    /// Sleep for the given duration
    async fn wait(&self, duration: Duration);
}

/// CDP-backed driver over a ChromiumOxide page
pub struct CdpDriver {
    page: Page,
    item_selector: String,
}

impl CdpDriver {
    /// Wrap a page, locating feed items with the given CSS selector
    pub fn new(page: Page, item_selector: impl Into<String>) -> Self {
        Self {
            page,
            item_selector: item_selector.into(),
        }
    }

    /// Access the underlying page
    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl PageDriver for CdpDriver {
    #[instrument(skip(self))]
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NavigationError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            ))
            .into());
        }

        let timeout_ms = timeout.as_millis() as u64;
        tokio::time::timeout(timeout, self.page.goto(url))
            .await
            .map_err(|_| NavigationError::Timeout(timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        // Wait for DOMContentLoaded; dynamic feed content keeps loading
        // past this point, which the settle delay and scroll loop absorb.
        let ready_script = r#"
            new Promise(resolve => {
                if (document.readyState !== 'loading') {
                    resolve(true);
                } else {
                    document.addEventListener('DOMContentLoaded', () => resolve(true));
                }
            })
        "#;
        tokio::time::timeout(timeout, self.page.evaluate(ready_script))
            .await
            .map_err(|_| NavigationError::Timeout(timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        debug!("Navigation complete: {}", url);
        Ok(())
    }

    async fn content_height(&self) -> Result<i64> {
        let height: i64 = self
            .page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| ExtractionError::MeasureFailed(e.to_string()))?
            .into_value()
            .map_err(|e| ExtractionError::MeasureFailed(e.to_string()))?;
        Ok(height)
    }

    async fn visible_candidates(&self) -> Result<Vec<serde_json::Value>> {
        let script = format!(
            r#"
            (() => {{
                const out = [];
                for (const el of document.querySelectorAll('{}')) {{
                    try {{
                        out.push({{ text: el.innerText, raw_html: el.innerHTML }});
                    }} catch (e) {{
                        // element detached mid-read; skip it
                    }}
                }}
                return out;
            }})()
            "#,
            self.item_selector.replace('\'', "\\'")
        );

        let candidates: Vec<serde_json::Value> = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ExtractionError::QueryFailed(e.to_string()))?
            .into_value()
            .map_err(|e| ExtractionError::QueryFailed(e.to_string()))?;
        Ok(candidates)
    }

    async fn scroll_by(&self, delta: i64) -> Result<()> {
        let script = format!("(() => {{ window.scrollBy(0, {}); return true; }})()", delta);
        self.page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ExtractionError::ScrollFailed(e.to_string()))?;
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
