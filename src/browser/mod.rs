//! Browser automation module
//!
//! This module wraps ChromiumOxide behind two seams: `BrowserController`
//! owns the browser process lifecycle, and `PageDriver` is the narrow
//! capability interface the collection loop runs against (so the loop can
//! be tested with a scripted fake driver).

pub mod controller;
pub mod driver;

pub use controller::{BrowserConfig, BrowserController};
pub use driver::{CdpDriver, PageDriver};
