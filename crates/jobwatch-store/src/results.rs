//! Human-readable result logs under `search_results/`.
//!
//! - `by_company/<company>.txt`: every reported job, appended per run
//! - `by_scrape/<timestamp>.txt`: one summary per production run
//! - `by_scrape/errors.txt`: per-company scrape failures
//!
//! Directories are created on first write, so a run that finds nothing
//! leaves no empty tree behind.

use crate::error::{Result, StoreError};
use crate::lines::{ensure_parent, open_append};
use chrono::{DateTime, Local};
use jobwatch_core::JobRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const RULE: &str = "============================================================";
const SUB_RULE: &str = "----------------------------------------";

/// New jobs found in one run, grouped by company in run order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    companies: Vec<(String, Vec<JobRecord>)>,
}

impl RunSummary {
    /// Empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the jobs reported for a company. Repeated names are merged.
    pub fn record(&mut self, company: &str, jobs: Vec<JobRecord>) {
        match self.companies.iter_mut().find(|(name, _)| name == company) {
            Some((_, existing)) => existing.extend(jobs),
            None => self.companies.push((company.to_string(), jobs)),
        }
    }

    /// `(company, jobs)` pairs in run order, including companies with no jobs.
    pub fn companies(&self) -> impl Iterator<Item = (&str, &[JobRecord])> {
        self.companies
            .iter()
            .map(|(name, jobs)| (name.as_str(), jobs.as_slice()))
    }

    /// Total number of jobs across all companies.
    #[must_use]
    pub fn total_jobs(&self) -> usize {
        self.companies.iter().map(|(_, jobs)| jobs.len()).sum()
    }

    /// Number of companies with at least one job.
    #[must_use]
    pub fn companies_with_jobs(&self) -> usize {
        self.companies
            .iter()
            .filter(|(_, jobs)| !jobs.is_empty())
            .count()
    }

    /// Every job URL in run order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.companies
            .iter()
            .flat_map(|(_, jobs)| jobs.iter().map(|j| j.url.clone()))
            .collect()
    }

    /// Render the summary file body.
    #[must_use]
    pub fn render(&self, now: DateTime<Local>) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Job Scraper Summary - {}\n{RULE}\n\n",
            now.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("Total jobs found: {}\n", self.total_jobs()));
        out.push_str(&format!(
            "Companies with jobs: {}\n",
            self.companies_with_jobs()
        ));

        for (company, jobs) in self.companies() {
            if jobs.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{company} ({} jobs):\n{SUB_RULE}\n", jobs.len()));
            for job in jobs {
                out.push_str(&format!("{}\n{}\n\n", job.job_line(company), job.url));
            }
        }
        out
    }
}

/// Writer for the `search_results/` tree.
#[derive(Debug, Clone)]
pub struct ResultLogs {
    root: PathBuf,
}

impl ResultLogs {
    /// Create a writer rooted at `root` (normally `<data_dir>/search_results`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the result tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Per-company log file for `company`.
    #[must_use]
    pub fn company_log_path(&self, company: &str) -> PathBuf {
        self.root
            .join("by_company")
            .join(format!("{}.txt", company_file_stem(company)))
    }

    /// Error log shared by every run.
    #[must_use]
    pub fn error_log_path(&self) -> PathBuf {
        self.root.join("by_scrape").join("errors.txt")
    }

    /// Append one job to its company's log.
    pub fn append_job(&self, company: &str, job: &JobRecord) -> Result<()> {
        let path = self.company_log_path(company);
        let mut file = open_append(&path)?;
        write!(
            file,
            "[{}] {}\n{}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            job.job_line(company),
            job.url
        )
        .map_err(|source| StoreError::Write { path, source })
    }

    /// Append a scrape failure to the error log.
    pub fn append_error(&self, company: &str, message: &str) -> Result<()> {
        let path = self.error_log_path();
        let mut file = open_append(&path)?;
        writeln!(
            file,
            "[{}] ERROR scraping {company}: {message}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .map_err(|source| StoreError::Write { path, source })
    }

    /// Write the run summary to a new timestamped file and return its path.
    pub fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf> {
        let now = Local::now();
        let path = self
            .root
            .join("by_scrape")
            .join(format!("{}.txt", now.format("%Y-%m-%d_%H-%M")));
        ensure_parent(&path)?;
        fs::write(&path, summary.render(now)).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote run summary");
        Ok(path)
    }
}

/// File stem for a company log: lower-cased, spaces and hyphens as underscores.
#[must_use]
pub fn company_file_stem(company: &str) -> String {
    company.to_lowercase().replace([' ', '-'], "_")
}
