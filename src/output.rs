//! Snapshot persistence
//!
//! Writes the collected set as a pretty-printed JSON array, creating the
//! parent directory if needed. Each run fully overwrites the file; the
//! snapshot is the current window, not an append log.

use crate::error::Result;
use crate::extraction::RawRecord;
use std::path::Path;
use tracing::{debug, instrument};

/// Write records to `path` as a JSON array
#[instrument(skip(records), fields(count = records.len()))]
pub fn persist(records: &[RawRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> RawRecord {
        RawRecord {
            text: text.to_string(),
            raw_html: format!("<p>{}</p>", text),
        }
    }

    #[test]
    fn test_persist_creates_directory_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/output/feed_raw.json");

        persist(&[record("a"), record("b")], &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<RawRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_persist_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed_raw.json");

        persist(&[record("a"), record("b"), record("c")], &path).unwrap();
        persist(&[record("only")], &path).unwrap();

        let parsed: Vec<RawRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "only");
    }

    #[test]
    fn test_persist_utf8_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed_raw.json");

        persist(&[record("café ☕ 日本語")], &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        // Non-ASCII must survive verbatim, not escaped.
        assert!(raw.contains("café ☕ 日本語"));
    }
}
