//! Run orchestration across the company roster.
//!
//! Tiers and companies are processed strictly in roster order, one request
//! at a time. Each company is dispatched to its adapter and the outcome is
//! reported to a [`RunObserver`]. A failing or panicking adapter counts as
//! zero results for that company; it never aborts the run.
//!
//! Production runs scrape verified companies only, filter, dedup against
//! the seen-URL store and persist at the end. Manual-test runs scrape
//! unverified companies only, with no filter, an empty seen set and no
//! writes to disk.

use crate::adapters::{Adapter, ScrapeContext, ScrapeOutcome};
use crate::error::Result;
use crate::filter::JobFilter;
use crate::http::HttpClient;
use futures::FutureExt;
use jobwatch_core::{AppConfig, JobRecord};
use jobwatch_roster::{CompanyEntry, Roster, Tier};
use jobwatch_store::{RunSummary, StoreLayout};
use std::collections::HashSet;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Which companies a run covers and what it does with the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Verified companies, filtered, deduped and persisted
    Production,
    /// Unverified companies, unfiltered, console only
    ManualTest,
}

impl RunMode {
    fn selects(self, company: &CompanyEntry) -> bool {
        match self {
            Self::Production => company.manually_verified,
            Self::ManualTest => !company.manually_verified,
        }
    }
}

/// What happened for one company.
#[derive(Debug, Clone)]
pub struct CompanyReport {
    /// Tier the company belongs to
    pub tier: String,
    /// Company display name
    pub company: String,
    /// Adapter vendor
    pub vendor: &'static str,
    /// New jobs reported
    pub jobs: Vec<JobRecord>,
    /// Failure message, if the scrape ended early
    pub error: Option<String>,
    /// Whether the vendor has no real adapter yet
    pub unimplemented: bool,
}

/// Totals for a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Mode the run used
    pub mode: RunMode,
    /// URLs known before the run started
    pub previously_seen: usize,
    /// Companies scraped for the first time (production only)
    pub new_companies: Vec<String>,
    /// Companies skipped because no scraper is configured
    pub unconfigured: Vec<String>,
    /// Companies that reported an error
    pub failed: Vec<String>,
    /// New jobs by company
    pub summary: RunSummary,
    /// Summary file written for this run, if any
    pub summary_path: Option<PathBuf>,
}

/// Progress callbacks, called in roster order.
///
/// All methods default to doing nothing.
pub trait RunObserver {
    /// Called before a run touches the network.
    fn run_started(
        &mut self,
        _mode: RunMode,
        _previously_seen: usize,
        _new_companies: &[String],
    ) {
    }

    /// A tier is about to be processed.
    fn tier_started(&mut self, _tier: &Tier, _mode: RunMode) {}

    /// A company has no scraper configured.
    fn company_skipped(&mut self, _company: &CompanyEntry) {}

    /// A company is about to be scraped.
    fn company_started(&mut self, _company: &CompanyEntry, _vendor: &'static str) {}

    /// A company finished, successfully or not.
    fn company_finished(&mut self, _report: &CompanyReport) {}
}

impl RunObserver for () {}

/// Drives a run over the roster.
pub struct Orchestrator {
    config: AppConfig,
    roster: Roster,
    store: StoreLayout,
    http: HttpClient,
}

impl Orchestrator {
    /// Create an orchestrator.
    pub fn new(config: AppConfig, roster: Roster, store: StoreLayout) -> Result<Self> {
        let http = HttpClient::new(&config.scanning)?;
        Ok(Self {
            config,
            roster,
            store,
            http,
        })
    }

    /// The roster this orchestrator runs over.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run every selected company in roster order.
    ///
    /// Only store failures at the start or end of a production run are
    /// returned as errors.
    pub async fn run(&self, mode: RunMode, observer: &mut dyn RunObserver) -> Result<RunReport> {
        let persist = mode == RunMode::Production;
        let (filter, seen) = if persist {
            (
                JobFilter::from_config(&self.config.filters),
                self.store.seen_urls().load()?,
            )
        } else {
            (JobFilter::disabled(), HashSet::new())
        };

        let new_companies = if persist {
            let selected = self
                .roster
                .companies()
                .filter(|c| c.scraper.is_some() && mode.selects(c))
                .map(|c| c.name.as_str());
            self.store.known_companies().new_names(selected)?
        } else {
            Vec::new()
        };

        info!(?mode, previously_seen = seen.len(), "run started");
        observer.run_started(mode, seen.len(), &new_companies);

        let ctx = ScrapeContext {
            http: &self.http,
            endpoints: &self.config.endpoints,
            filter: &filter,
            seen: &seen,
        };

        let mut report = RunReport {
            mode,
            previously_seen: seen.len(),
            new_companies,
            unconfigured: Vec::new(),
            failed: Vec::new(),
            summary: RunSummary::new(),
            summary_path: None,
        };

        for tier in self.roster.tiers() {
            observer.tier_started(tier, mode);
            for company in tier.companies.iter().filter(|c| mode.selects(c)) {
                let Some(adapter) = Adapter::from_entry(company) else {
                    debug!(company = %company.name, "No scraper configured");
                    observer.company_skipped(company);
                    report.unconfigured.push(company.name.clone());
                    continue;
                };

                observer.company_started(company, adapter.vendor());
                let company_report = self
                    .scrape_company(&tier.name, company, &adapter, &ctx)
                    .await;
                if persist {
                    self.write_company_logs(&company_report);
                }
                if company_report.error.is_some() {
                    report.failed.push(company_report.company.clone());
                }
                observer.company_finished(&company_report);
                report
                    .summary
                    .record(&company_report.company, company_report.jobs);
            }
        }

        if persist {
            self.persist(&mut report)?;
        }

        info!(
            ?mode,
            total_jobs = report.summary.total_jobs(),
            companies_with_jobs = report.summary.companies_with_jobs(),
            failed = report.failed.len(),
            "run finished"
        );
        Ok(report)
    }

    async fn scrape_company(
        &self,
        tier: &str,
        company: &CompanyEntry,
        adapter: &Adapter,
        ctx: &ScrapeContext<'_>,
    ) -> CompanyReport {
        let (jobs, error, unimplemented) = match isolate_panics(adapter.fetch_jobs(ctx)).await {
            Ok(outcome) => (
                outcome.jobs,
                outcome.error.map(|e| e.to_string()),
                outcome.unimplemented.is_some(),
            ),
            Err(message) => (Vec::new(), Some(message), false),
        };

        match &error {
            Some(message) => error!(
                company = %company.name,
                vendor = adapter.vendor(),
                kept = jobs.len(),
                error = %message,
                "scrape failed"
            ),
            None => info!(
                company = %company.name,
                vendor = adapter.vendor(),
                jobs = jobs.len(),
                "scrape finished"
            ),
        }

        CompanyReport {
            tier: tier.to_string(),
            company: company.name.clone(),
            vendor: adapter.vendor(),
            jobs,
            error,
            unimplemented,
        }
    }

    fn write_company_logs(&self, report: &CompanyReport) {
        let logs = self.store.result_logs();
        if self.config.output.files_by_company {
            for job in &report.jobs {
                if let Err(e) = logs.append_job(&report.company, job) {
                    warn!(company = %report.company, error = %e, "failed to write company log");
                    break;
                }
            }
        }
        if let Some(message) = &report.error {
            if let Err(e) = logs.append_error(&report.company, message) {
                warn!(company = %report.company, error = %e, "failed to write error log");
            }
        }
    }

    fn persist(&self, report: &mut RunReport) -> Result<()> {
        let urls = report.summary.urls();
        self.store.seen_urls().save(&urls)?;
        self.store.known_companies().record(&report.new_companies)?;
        if self.config.output.files_by_scrape {
            report.summary_path = Some(self.store.result_logs().write_summary(&report.summary)?);
        }
        info!(new_urls = urls.len(), "results saved");
        Ok(())
    }
}

/// Run one scrape, turning a panic into an error message.
async fn isolate_panics<F>(scrape: F) -> std::result::Result<ScrapeOutcome, String>
where
    F: Future<Output = ScrapeOutcome>,
{
    AssertUnwindSafe(scrape)
        .catch_unwind()
        .await
        .map_err(|panic| format!("Unexpected error: {}", panic_message(panic.as_ref())))
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
