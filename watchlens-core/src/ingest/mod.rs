//! Ingestion of watch-history exports
//!
//! Finds export files on disk, reads them, and normalizes their entries
//! into [`WatchRecord`]s ready for [`crate::analytics`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ watch-history.json   │ ──► │  normalizer  │ ──► │ Vec<WatchRecord> │
//! │ (file or takeout dir)│     │              │     │                  │
//! └──────────────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use watchlens_core::ingest;
//! use std::path::Path;
//!
//! let exports = ingest::discover_exports(Path::new("Takeout")).unwrap();
//! let records = ingest::load_exports(&exports).unwrap();
//! println!("{} records", records.len());
//! ```

pub mod normalize;

pub use normalize::{normalize_entries, normalize_entry, normalize_export, EXPECTED_SHAPE};

use crate::error::{Error, Result};
use crate::types::WatchRecord;
use std::path::{Path, PathBuf};

/// File name a takeout archive uses for the viewing history.
pub const EXPORT_FILE_NAME: &str = "watch-history.json";

/// Parse export content already held in memory.
pub fn parse_export(content: &str) -> Result<Vec<WatchRecord>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    normalize_export(&value)
}

/// Read and normalize a single export file.
pub fn load_export(path: &Path) -> Result<Vec<WatchRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records = parse_export(&content)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Loaded watch-history export"
    );

    Ok(records)
}

/// Read several exports and concatenate their records in order.
pub fn load_exports(paths: &[PathBuf]) -> Result<Vec<WatchRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_export(path)?);
    }
    Ok(records)
}

/// Resolve a user-supplied path to export files.
///
/// A file is returned as is. A directory, such as an unpacked takeout
/// archive, is searched recursively for `watch-history.json`.
pub fn discover_exports(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = path.join("**").join(EXPORT_FILE_NAME);
    let pattern_str = pattern.to_string_lossy();

    let entries = glob::glob(&pattern_str)
        .map_err(|e| Error::Discovery(format!("invalid glob pattern {}: {}", pattern_str, e)))?;

    let mut files: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
    files.sort();

    if files.is_empty() {
        return Err(Error::NoExports(path.to_path_buf()));
    }

    tracing::debug!(root = %path.display(), found = files.len(), "Discovered exports");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_export_rejects_bad_json() {
        assert!(matches!(parse_export("[{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_discover_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        fs::write(&file, "[]").unwrap();

        let found = discover_exports(&file).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_discover_takeout_directory() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("Takeout/YouTube and YouTube Music/history");
        fs::create_dir_all(&history).unwrap();
        fs::write(history.join(EXPORT_FILE_NAME), "[]").unwrap();
        fs::write(history.join("search-history.json"), "[]").unwrap();

        let found = discover_exports(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with(EXPORT_FILE_NAME));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover_exports(dir.path()),
            Err(Error::NoExports(_))
        ));
    }

    #[test]
    fn test_load_exports_concatenates() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, r#"[{"title": "Watched A"}]"#).unwrap();
        fs::write(&b, r#"[{"title": "Watched B"}, {"header": "YouTube"}]"#).unwrap();

        let records = load_exports(&[a, b]).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Watched A", "Watched B"]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_export(&missing), Err(Error::Io(_))));
    }
}
