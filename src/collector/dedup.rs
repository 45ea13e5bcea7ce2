//! Cross-pass record deduplication
//!
//! Scroll passes overlap: items near the viewport boundary appear in
//! several consecutive passes. The accumulator keys records by exact text;
//! the latest capture of a given text wins. Keys are never removed mid-run.

use crate::extraction::RawRecord;
use std::collections::HashMap;

/// Unique-by-text record set built up across passes
#[derive(Debug, Default)]
pub struct DedupAccumulator {
    records: HashMap<String, RawRecord>,
}

impl DedupAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of records, last write wins per text key
    pub fn merge<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        for record in records {
            self.records.insert(record.text.clone(), record);
        }
    }

    /// Number of unique records collected so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the accumulator and yield the collected records
    ///
    /// Emitted order is map iteration order; callers must not depend on it.
    /// Taking `self` by value makes a second finalize a compile error.
    pub fn finalize(self) -> Vec<RawRecord> {
        self.records.into_values().collect()
    }
}
