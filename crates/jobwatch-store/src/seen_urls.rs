//! The seen-URL store: every listing URL ever reported as new.
//!
//! The store is a plain UTF-8 text file with one URL per line. It only
//! grows: URLs are appended at the end of a run and never removed.
//! Concurrent runs against the same file are not supported.

use crate::error::Result;
use crate::lines::{append_lines, read_lines};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat append-only store of previously reported listing URLs.
#[derive(Debug, Clone)]
pub struct SeenUrlStore {
    path: PathBuf,
}

impl SeenUrlStore {
    /// Create a store backed by `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored URL.
    ///
    /// Only lines starting with `http` are kept. A missing file is an empty set.
    pub fn load(&self) -> Result<HashSet<String>> {
        let urls: HashSet<String> = read_lines(&self.path, |line| line.starts_with("http"))?
            .into_iter()
            .collect();
        debug!(path = %self.path.display(), count = urls.len(), "loaded seen URLs");
        Ok(urls)
    }

    /// Append URLs, one per line. No-op on empty input.
    pub fn save<S: AsRef<str>>(&self, urls: &[S]) -> Result<()> {
        append_lines(&self.path, urls)?;
        if !urls.is_empty() {
            debug!(path = %self.path.display(), count = urls.len(), "saved new URLs");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_store_is_empty() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = SeenUrlStore::new(tmp.path().join("jobs_found.txt"));
        assert!(store.load().expect("load").is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load_is_superset() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("jobs_found.txt");
        std::fs::write(&path, "https://old/1\n").expect("seed store");

        let store = SeenUrlStore::new(&path);
        store
            .save(&["https://x/1", "https://x/2"])
            .expect("save urls");

        let loaded = store.load().expect("load");
        let expected: HashSet<String> = ["https://old/1", "https://x/1", "https://x/2"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_load_skips_blank_and_non_url_lines() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("jobs_found.txt");
        std::fs::write(&path, "\n  https://x/1  \nnot a url\n\nhttp://x/2\n").expect("seed");

        let loaded = SeenUrlStore::new(&path).load().expect("load");
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("https://x/1"));
        assert!(loaded.contains("http://x/2"));
    }

    #[test]
    fn test_save_empty_does_not_create_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = SeenUrlStore::new(tmp.path().join("jobs_found.txt"));
        store.save::<&str>(&[]).expect("save nothing");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = SeenUrlStore::new(tmp.path().join("a").join("b").join("jobs_found.txt"));
        store.save(&["https://x/1"]).expect("save");
        assert_eq!(
            std::fs::read_to_string(store.path()).expect("read"),
            "https://x/1\n"
        );
    }
}
