//! Incremental collection module
//!
//! The heart of the crate: the scroll loop that drives extraction passes,
//! detects feed exhaustion through page-height stagnation, and merges
//! results into a deduplicated set bounded by the configured scroll budget.

pub mod dedup;
pub mod run;
pub mod stagnation;

pub use dedup::DedupAccumulator;
pub use run::{collect_feed, finish, run, Harvest, RunOutcome, ScrollBudget};
pub use stagnation::{ScrollState, STALL_LIMIT};
