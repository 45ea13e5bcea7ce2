//! Feed-item extraction module
//!
//! One "pass" pulls the currently-rendered feed items out of the page.
//! Passes overlap across scroll rounds by design; deduplication happens
//! downstream in the collector.

pub mod pass;

pub use pass::{extract_pass, RawRecord};
