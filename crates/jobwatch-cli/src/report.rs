//! Console report for production and manual-test runs.
//!
//! These are the user-facing lines a run prints to stdout. Diagnostics go
//! through `tracing` instead.

use chrono::Local;
use jobwatch_roster::{CompanyEntry, Tier};
use jobwatch_scanner::{CompanyReport, RunMode, RunObserver, RunReport};
use std::io::Write;
use std::time::Duration;

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the run report as it happens.
///
/// Write failures are ignored: a closed stdout must not abort a run.
pub struct ConsoleReporter<W: Write> {
    out: W,
    mode: RunMode,
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W, mode: RunMode) -> Self {
        Self { out, mode }
    }

    /// Banner printed before the roster is loaded.
    pub fn banner(&mut self, include: &[String], exclude: &[String]) {
        let now = Local::now().format(TIMESTAMP);
        match self.mode {
            RunMode::Production => {
                self.line(format!("Job Scraper Starting - {now}\n"));
                self.line("INCLUDE_KEYWORDS:");
                self.line(include.join(", "));
                self.line("");
                self.line("EXCLUDE_KEYWORDS:");
                self.line(exclude.join(", "));
                self.line("");
            }
            RunMode::ManualTest => {
                self.line("Manual Scraper Testing - No Filters, Console Only");
                self.line(format!("Started at: {now}"));
                self.line(rule('=', 60));
                self.line("Testing companies with manually_verified=false only");
                self.line("All job openings will be listed (no role filtering)");
                self.line(rule('=', 60));
            }
        }
    }

    /// Closing summary.
    pub fn finished(&mut self, report: &RunReport, elapsed: Duration) {
        match self.mode {
            RunMode::Production => self.production_summary(report, elapsed),
            RunMode::ManualTest => self.manual_summary(report, elapsed),
        }
    }

    /// Notice printed when the run is cancelled.
    pub fn interrupted(&mut self) {
        match self.mode {
            RunMode::Production => self.line("\nScraping interrupted by user"),
            RunMode::ManualTest => self.line("\nTesting interrupted by user"),
        }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn production_summary(&mut self, report: &RunReport, elapsed: Duration) {
        let summary = &report.summary;
        self.line(format!("\n{} new jobs discovered", summary.total_jobs()));

        self.line(format!("\n{}", rule('=', 60)));
        self.line("SCRAPING SUMMARY");
        self.line(rule('=', 60));
        for (company, jobs) in summary.companies().filter(|(_, jobs)| !jobs.is_empty()) {
            self.line(format!("{company}: {} jobs", jobs.len()));
        }
        self.line(format!("\nTotal jobs found: {}", summary.total_jobs()));
        self.line(format!("Companies with jobs: {}", summary.companies_with_jobs()));
        if !report.failed.is_empty() {
            self.line(format!("Companies with errors: {}", report.failed.join(", ")));
        }
        if let Some(path) = &report.summary_path {
            self.line(format!("Summary written to {}", path.display()));
        }

        self.line(format!(
            "\nJob Scraper Completed - {}",
            Local::now().format(TIMESTAMP)
        ));
        self.line(format!("(Total time taken: {:.1}s)\n", elapsed.as_secs_f64()));
    }

    fn manual_summary(&mut self, report: &RunReport, elapsed: Duration) {
        let summary = &report.summary;
        self.line(format!("\n{}", rule('=', 60)));
        self.line("MANUAL TESTING SUMMARY");
        self.line(rule('=', 60));
        self.line(format!("Companies scraped: {}", summary.companies_with_jobs()));
        self.line(format!("Total jobs found: {}", summary.total_jobs()));

        if summary.total_jobs() > 0 {
            self.line("\nJobs by company:");
            for (company, jobs) in summary.companies().filter(|(_, jobs)| !jobs.is_empty()) {
                self.line(format!("  {company}: {} jobs", jobs.len()));
            }
        }

        self.line(format!("\nCompleted at: {}", Local::now().format(TIMESTAMP)));
        self.line(format!("Total time: {:.1}s", elapsed.as_secs_f64()));
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }
}

impl<W: Write> RunObserver for ConsoleReporter<W> {
    fn run_started(&mut self, mode: RunMode, previously_seen: usize, new_companies: &[String]) {
        self.mode = mode;
        if mode == RunMode::ManualTest {
            return;
        }
        self.line(format!("Loaded {previously_seen} previously found jobs"));
        if !new_companies.is_empty() {
            self.line("New companies detected (first-time scrape):");
            for company in new_companies {
                self.line(format!("  - {company}"));
            }
        }
    }

    fn tier_started(&mut self, tier: &Tier, mode: RunMode) {
        match mode {
            RunMode::Production => {
                self.line(format!("\n{}", rule('=', 60)));
                self.line(format!("SCRAPING {}", tier.name.to_uppercase()));
                self.line(rule('=', 60));
            }
            RunMode::ManualTest => {
                let verified: Vec<&CompanyEntry> = tier.verified().collect();
                self.line(format!("\n{} {} {}", rule('=', 20), tier.name, rule('=', 20)));
                self.line(format!(
                    "Unverified companies to test: {}",
                    tier.unverified().count()
                ));
                self.line(format!("Verified companies (skipped): {}", verified.len()));
                if !verified.is_empty() {
                    self.line("Skipping verified companies:");
                    for company in verified {
                        self.line(format!("  - {}", company.name));
                    }
                }
            }
        }
    }

    fn company_skipped(&mut self, company: &CompanyEntry) {
        if self.mode == RunMode::ManualTest {
            self.line(format!("No scraper configured for {}", company.name));
        }
    }

    fn company_started(&mut self, company: &CompanyEntry, _vendor: &'static str) {
        match self.mode {
            RunMode::Production => self.line(format!("\n{}", "- ".repeat(30))),
            RunMode::ManualTest => {
                self.line(format!("\nScraping {}...", company.name));
                self.line(rule('-', 40));
            }
        }
    }

    fn company_finished(&mut self, report: &CompanyReport) {
        if report.unimplemented {
            self.line(format!(
                "🚧 {} SCRAPER NOT YET IMPLEMENTED 🚧",
                report.vendor.to_uppercase()
            ));
        }

        match self.mode {
            RunMode::Production => {
                self.line(format!(
                    "Found {} new matching jobs for {}\n",
                    report.jobs.len(),
                    report.company
                ));
                for job in &report.jobs {
                    self.line(job.job_line(&report.company));
                    self.line(&job.url);
                    self.line("");
                }
            }
            RunMode::ManualTest => {
                self.line(format!("Found {} jobs for {}", report.jobs.len(), report.company));
                for job in &report.jobs {
                    match &job.location {
                        Some(location) => self.line(format!("  • {} ({location})", job.title)),
                        None => self.line(format!("  • {}", job.title)),
                    }
                    self.line(format!("    {}", job.url));
                }
            }
        }

        if let Some(error) = &report.error {
            self.line(format!("ERROR scraping {}: {error}", report.company));
        }
    }
}

fn rule(c: char, width: usize) -> String {
    c.to_string().repeat(width)
}
