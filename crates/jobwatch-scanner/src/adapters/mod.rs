//! Per-vendor adapters.
//!
//! Each adapter turns one vendor's response shape into [`JobRecord`]s. The
//! calling convention (slug-based or bespoke) is fixed when the adapter is
//! built from a roster entry: slug-based variants carry the slug they need,
//! bespoke variants carry nothing.
//!
//! Candidates flow through a [`JobCollector`], which applies the filter
//! first, then the seen-URL check, then intra-run dedup. Errors never escape
//! [`Adapter::fetch_jobs`]: whatever was collected before the failure is
//! returned alongside the error.

mod ashby;
mod greenhouse;
mod jobvite;
mod lever;
mod netflix;
mod smartrecruiters;
mod spotify;
mod uber;
mod workday;

use crate::error::{Result, ScanError};
use crate::filter::JobFilter;
use crate::http::HttpClient;
use jobwatch_core::{CompanySlug, EndpointsConfig, JobRecord};
use jobwatch_roster::{CallingConvention, CompanyEntry, ScraperConfig};
use std::collections::HashSet;
use tracing::{debug, warn};

pub use workday::{WorkdayHost, WorkdayTarget};

/// Everything an adapter needs for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeContext<'a> {
    /// Shared transport
    pub http: &'a HttpClient,
    /// Vendor URL templates
    pub endpoints: &'a EndpointsConfig,
    /// Title and location filter
    pub filter: &'a JobFilter,
    /// URLs reported in earlier runs
    pub seen: &'a HashSet<String>,
}

/// Result of one adapter invocation.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// New jobs that passed the filter, in vendor order
    pub jobs: Vec<JobRecord>,
    /// The failure that ended the scrape early, if any
    pub error: Option<ScanError>,
    /// Set when the vendor has no real adapter yet
    pub unimplemented: Option<&'static str>,
}

/// Accumulates accepted jobs for one adapter invocation.
#[derive(Debug)]
pub struct JobCollector<'a> {
    filter: &'a JobFilter,
    seen: &'a HashSet<String>,
    emitted: HashSet<String>,
    jobs: Vec<JobRecord>,
}

impl<'a> JobCollector<'a> {
    /// Empty collector.
    #[must_use]
    pub fn new(filter: &'a JobFilter, seen: &'a HashSet<String>) -> Self {
        Self {
            filter,
            seen,
            emitted: HashSet::new(),
            jobs: Vec::new(),
        }
    }

    /// Offer a candidate. Returns whether it was kept.
    ///
    /// Jobs without a title or URL are dropped. The filter runs before any
    /// dedup check, so rejected jobs are never compared against seen URLs.
    pub fn offer(&mut self, job: JobRecord) -> bool {
        if job.title.is_empty() || job.url.is_empty() {
            debug!(title = %job.title, url = %job.url, "dropping incomplete listing");
            return false;
        }
        if !self.filter.should_include(&job.title, job.location.as_deref()) {
            return false;
        }
        if self.seen.contains(&job.url) || !self.emitted.insert(job.url.clone()) {
            return false;
        }
        self.jobs.push(job);
        true
    }

    /// Number of jobs kept so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether nothing has been kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Kept jobs in the order they were offered.
    #[must_use]
    pub fn into_jobs(self) -> Vec<JobRecord> {
        self.jobs
    }
}

/// A configured vendor adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adapter {
    /// Lever hosted board
    Lever {
        /// Company slug
        slug: CompanySlug,
    },
    /// Greenhouse board API
    Greenhouse {
        /// Company slug
        slug: CompanySlug,
    },
    /// Ashby posting API
    Ashby {
        /// Company slug
        slug: CompanySlug,
    },
    /// Workday career site (either host family)
    Workday(WorkdayTarget),
    /// SmartRecruiters postings API
    SmartRecruiters {
        /// Company slug
        slug: CompanySlug,
    },
    /// Jobvite hosted board
    Jobvite {
        /// Company slug
        slug: CompanySlug,
    },
    /// Netflix careers API
    Netflix,
    /// Spotify careers API
    Spotify,
    /// Uber careers API
    Uber,
    /// Known vendor without a real adapter
    Unimplemented {
        /// Vendor display name
        vendor: &'static str,
        /// How the adapter would be called
        convention: CallingConvention,
    },
}

impl Adapter {
    /// Build the adapter for a roster entry. `None` when no scraper is configured.
    #[must_use]
    pub fn from_entry(entry: &CompanyEntry) -> Option<Self> {
        entry
            .scraper
            .as_ref()
            .map(|scraper| Self::from_config(&entry.formatted_name, scraper))
    }

    /// Build the adapter for a scraper configuration.
    #[must_use]
    pub fn from_config(slug: &CompanySlug, scraper: &ScraperConfig) -> Self {
        let slug = slug.clone();
        match scraper {
            ScraperConfig::Lever => Self::Lever { slug },
            ScraperConfig::Greenhouse => Self::Greenhouse { slug },
            ScraperConfig::Ashby => Self::Ashby { slug },
            ScraperConfig::Workday {
                datacenter,
                site,
                tenant,
            } => Self::Workday(WorkdayTarget {
                host: WorkdayHost::Jobs,
                tenant: tenant.clone().unwrap_or(slug),
                datacenter: *datacenter,
                site: site.clone(),
            }),
            ScraperConfig::WorkdaySite {
                datacenter,
                site,
                tenant,
            } => Self::Workday(WorkdayTarget {
                host: WorkdayHost::Site,
                tenant: tenant.clone().unwrap_or(slug),
                datacenter: *datacenter,
                site: site.clone(),
            }),
            ScraperConfig::SmartRecruiters => Self::SmartRecruiters { slug },
            ScraperConfig::Jobvite => Self::Jobvite { slug },
            ScraperConfig::Netflix => Self::Netflix,
            ScraperConfig::Spotify => Self::Spotify,
            ScraperConfig::Uber => Self::Uber,
            other => Self::Unimplemented {
                vendor: other.vendor_name(),
                convention: other.calling_convention(),
            },
        }
    }

    /// Vendor display name.
    #[must_use]
    pub fn vendor(&self) -> &'static str {
        match self {
            Self::Lever { .. } => "Lever",
            Self::Greenhouse { .. } => "Greenhouse",
            Self::Ashby { .. } => "Ashby",
            Self::Workday(target) => target.host.vendor_name(),
            Self::SmartRecruiters { .. } => "SmartRecruiters",
            Self::Jobvite { .. } => "Jobvite",
            Self::Netflix => "Netflix",
            Self::Spotify => "Spotify",
            Self::Uber => "Uber",
            Self::Unimplemented { vendor, .. } => *vendor,
        }
    }

    /// Whether the adapter needs a company slug.
    #[must_use]
    pub fn calling_convention(&self) -> CallingConvention {
        match self {
            Self::Lever { .. }
            | Self::Greenhouse { .. }
            | Self::Ashby { .. }
            | Self::Workday(_)
            | Self::SmartRecruiters { .. }
            | Self::Jobvite { .. } => CallingConvention::SlugBased,
            Self::Netflix | Self::Spotify | Self::Uber => CallingConvention::Bespoke,
            Self::Unimplemented { convention, .. } => *convention,
        }
    }

    /// Fetch new, filtered jobs. Never fails: errors are reported in the outcome.
    pub async fn fetch_jobs(&self, ctx: &ScrapeContext<'_>) -> ScrapeOutcome {
        if let Self::Unimplemented { vendor, .. } = self {
            warn!(vendor = *vendor, "scraper not yet implemented");
            return ScrapeOutcome {
                unimplemented: Some(*vendor),
                ..ScrapeOutcome::default()
            };
        }

        debug!(vendor = self.vendor(), "scraping");
        let mut collector = JobCollector::new(ctx.filter, ctx.seen);
        let result = self.run(ctx, &mut collector).await;
        let error = result.err();
        if let Some(e) = &error {
            debug!(vendor = self.vendor(), kept = collector.len(), error = %e, "scrape ended early");
        }

        ScrapeOutcome {
            jobs: collector.into_jobs(),
            error,
            unimplemented: None,
        }
    }

    async fn run(&self, ctx: &ScrapeContext<'_>, out: &mut JobCollector<'_>) -> Result<()> {
        match self {
            Self::Lever { slug } => lever::fetch(ctx, out, slug).await,
            Self::Greenhouse { slug } => greenhouse::fetch(ctx, out, slug).await,
            Self::Ashby { slug } => ashby::fetch(ctx, out, slug).await,
            Self::Workday(target) => workday::fetch(ctx, out, target).await,
            Self::SmartRecruiters { slug } => smartrecruiters::fetch(ctx, out, slug).await,
            Self::Jobvite { slug } => jobvite::fetch(ctx, out, slug).await,
            Self::Netflix => netflix::fetch(ctx, out).await,
            Self::Spotify => spotify::fetch(ctx, out).await,
            Self::Uber => uber::fetch(ctx, out).await,
            Self::Unimplemented { .. } => Ok(()),
        }
    }
}

/// Page size and page ceiling for a paginated vendor.
///
/// A page shorter than `page_size` (including an empty one) is the last.
/// The ceiling only guards against a backend that never runs dry.
#[derive(Debug, Clone, Copy)]
struct Paging {
    page_size: usize,
    max_pages: usize,
}

impl Paging {
    fn is_last_page(self, returned: usize) -> bool {
        returned < self.page_size
    }
}

fn unexpected_shape(vendor: &'static str, what: &str) -> ScanError {
    ScanError::Parse {
        vendor,
        reason: what.to_string(),
    }
}
