//! Run configuration and date-window resolution
//!
//! The config file is a small YAML document read once per run. Every field
//! except `search_url_template` carries a default matching the values the
//! target feed was tuned against.

use crate::error::{ConfigError, Result};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for one collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// How many days of feed history to request (default: 1)
    #[serde(default = "default_days_back")]
    pub days_back: u64,

    /// Feed URL template with `{since}` and `{until}` placeholders
    pub search_url_template: String,

    /// Maximum number of scroll rounds (default: 30)
    #[serde(default = "default_scroll_times")]
    pub scroll_times: u32,

    /// Pause after each scroll, in seconds; fractional values allowed (default: 2)
    #[serde(default = "default_scroll_pause")]
    pub scroll_pause: f64,

    /// Navigation timeout in milliseconds (default: 60000)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Settle delay after navigation before the first pass, in ms (default: 3000)
    #[serde(default = "default_settle_delay")]
    pub settle_delay: u64,

    /// Viewport advance per scroll round, in pixels (default: 3000)
    #[serde(default = "default_scroll_delta")]
    pub scroll_delta: i64,

    /// CSS selector locating one feed item (default: "article")
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
}

fn default_days_back() -> u64 {
    1
}

fn default_scroll_times() -> u32 {
    30
}

fn default_scroll_pause() -> f64 {
    2.0
}

fn default_timeout() -> u64 {
    60000
}

fn default_settle_delay() -> u64 {
    3000
}

fn default_scroll_delta() -> i64 {
    3000
}

fn default_item_selector() -> String {
    "article".to_string()
}

impl RunConfig {
    /// Load the configuration from a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: RunConfig = serde_yaml::from_str(&raw).map_err(ConfigError::Parse)?;
        Ok(cfg)
    }

    /// Build the feed URL by substituting the window bounds into the template
    pub fn feed_url(&self, window: &Window) -> String {
        self.search_url_template
            .replace("{since}", &window.since.to_string())
            .replace("{until}", &window.until.to_string())
    }

    /// Scroll pause as a `Duration`
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_secs_f64(self.scroll_pause)
    }

    /// Navigation timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Post-navigation settle delay as a `Duration`
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay)
    }
}

/// Date window parameterizing the feed query
///
/// `until` is always the current UTC date; `since` is `days_back` days
/// earlier. Both render as `YYYY-MM-DD` (the `NaiveDate` display form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Start of the window (inclusive)
    pub since: NaiveDate,
    /// End of the window (inclusive)
    pub until: NaiveDate,
}

impl Window {
    /// Resolve the window ending at the current UTC date
    pub fn resolve(days_back: u64) -> Self {
        Self::ending(Utc::now().date_naive(), days_back)
    }

    /// Resolve the window ending at a given date; pure, used by tests
    pub fn ending(until: NaiveDate, days_back: u64) -> Self {
        Self {
            since: until - Days::new(days_back),
            until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_applied() {
        let cfg: RunConfig =
            serde_yaml::from_str("search_url_template: \"https://x.test/search?since={since}&until={until}\"")
                .unwrap();
        assert_eq!(cfg.days_back, 1);
        assert_eq!(cfg.scroll_times, 30);
        assert_eq!(cfg.scroll_pause, 2.0);
        assert_eq!(cfg.timeout, 60000);
        assert_eq!(cfg.settle_delay, 3000);
        assert_eq!(cfg.scroll_delta, 3000);
        assert_eq!(cfg.item_selector, "article");
    }

    #[test]
    fn test_template_required() {
        let result: std::result::Result<RunConfig, _> = serde_yaml::from_str("days_back: 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_fractional_scroll_pause() {
        let cfg: RunConfig = serde_yaml::from_str(
            "search_url_template: \"https://x.test\"\nscroll_pause: 0.5",
        )
        .unwrap();
        assert_eq!(cfg.scroll_pause(), Duration::from_millis(500));
    }

    #[test]
    fn test_window_resolution() {
        let until = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = Window::ending(until, 7);
        assert_eq!(window.since.to_string(), "2024-03-03");
        assert_eq!(window.until.to_string(), "2024-03-10");
    }

    #[test]
    fn test_window_zero_days() {
        let until = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = Window::ending(until, 0);
        assert_eq!(window.since, window.until);
    }

    #[test]
    fn test_feed_url_substitution() {
        let cfg: RunConfig = serde_yaml::from_str(
            "search_url_template: \"https://x.test/search?q=rust%20since%3A{since}%20until%3A{until}\"",
        )
        .unwrap();
        let window = Window::ending(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), 7);
        assert_eq!(
            cfg.feed_url(&window),
            "https://x.test/search?q=rust%20since%3A2024-03-03%20until%3A2024-03-10"
        );
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = RunConfig::from_path("/nonexistent/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Cannot read config file"));
    }
}
