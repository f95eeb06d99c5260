//! Names of every company scraped in a previous run.
//!
//! Used to flag companies that are being scraped for the first time.

use crate::error::Result;
use crate::lines::{append_lines, read_lines};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Flat append-only store of company names.
#[derive(Debug, Clone)]
pub struct KnownCompanies {
    path: PathBuf,
}

impl KnownCompanies {
    /// Create a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all known names. A missing file is an empty set.
    pub fn load(&self) -> Result<HashSet<String>> {
        Ok(read_lines(&self.path, |_| true)?.into_iter().collect())
    }

    /// Names from `candidates` not yet in the store, in input order.
    pub fn new_names<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Result<Vec<String>> {
        let known = self.load()?;
        let mut seen = HashSet::new();
        Ok(candidates
            .into_iter()
            .filter(|name| !known.contains(*name) && seen.insert(*name))
            .map(str::to_string)
            .collect())
    }

    /// Append names to the store.
    pub fn record<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        append_lines(&self.path, names)
    }
}
