//! Stats persistence as a JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::StatsBook;

/// Load stats from a JSON file.
///
/// If the file is missing, returns an empty book.
pub fn load_stats(path: &Path) -> Result<StatsBook> {
    if !path.exists() {
        return Ok(StatsBook::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let book: StatsBook =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(book)
}

/// Atomically write stats to disk (temp file + rename).
pub fn write_stats(path: &Path, book: &StatsBook) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(book).context("serialize stats json")?;
    buf.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, buf).with_context(|| format!("write temp stats {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace stats {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;

    #[test]
    fn load_missing_returns_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let book = load_stats(&temp.path().join("missing.json")).expect("load");
        assert!(book.is_empty());
    }

    #[test]
    fn write_then_load_keeps_totals() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("stats.json");

        let mut book = StatsBook::new();
        book.record(
            "alice",
            &GameOutcome {
                won: true,
                attempts_used: 3,
            },
        );
        write_stats(&path, &book).expect("write");

        let loaded = load_stats(&path).expect("load");
        assert_eq!(loaded, book);
        assert_eq!(loaded.get("alice").distribution.get(&3), Some(&1));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("stats.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(load_stats(&path).is_err());
    }
}
