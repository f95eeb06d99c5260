//! Jobwatch Store - flat-file persistence.
//!
//! Everything lives under a single data directory:
//!
//! ```text
//! <data_dir>/
//! ├── jobs_found.txt        seen-URL store, one URL per line
//! ├── companies_seen.txt    every company name ever scraped
//! └── search_results/
//!     ├── by_company/       per-company job logs
//!     └── by_scrape/        per-run summaries and errors.txt
//! ```
//!
//! All files are UTF-8 text and only ever appended to (summaries are new
//! files per run). A single process is assumed to own the directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod known_companies;
mod lines;
pub mod results;
pub mod seen_urls;

pub use error::{Result, StoreError};
pub use known_companies::KnownCompanies;
pub use results::{company_file_stem, ResultLogs, RunSummary};
pub use seen_urls::SeenUrlStore;

use std::path::{Path, PathBuf};

/// Well-known file locations inside a data directory.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    data_dir: PathBuf,
}

impl StoreLayout {
    /// Layout rooted at `data_dir`. The directory need not exist yet.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory itself.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Seen-URL store at `jobs_found.txt`.
    #[must_use]
    pub fn seen_urls(&self) -> SeenUrlStore {
        SeenUrlStore::new(self.data_dir.join("jobs_found.txt"))
    }

    /// Known-company store at `companies_seen.txt`.
    #[must_use]
    pub fn known_companies(&self) -> KnownCompanies {
        KnownCompanies::new(self.data_dir.join("companies_seen.txt"))
    }

    /// Result log writer rooted at `search_results/`.
    #[must_use]
    pub fn result_logs(&self) -> ResultLogs {
        ResultLogs::new(self.data_dir.join("search_results"))
    }
}
