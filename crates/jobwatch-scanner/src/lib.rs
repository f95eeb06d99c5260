//! Jobwatch Scanner - job board scraping.
//!
//! This crate fetches openings from each company's applicant tracking system,
//! filters them by title keywords and location, drops listings already
//! reported in earlier runs and hands the rest to the store.
//!
//! # Features
//!
//! - One adapter per vendor (Lever, Greenhouse, Ashby, Workday,
//!   SmartRecruiters, Jobvite, Netflix, Spotify, Uber), JSON or HTML
//! - Offset and page based pagination with a page ceiling per vendor
//! - Paced requests with bounded exponential backoff on connection failures
//! - Keyword filter plus a US/EU location heuristic
//! - Sequential orchestration with company-scoped failures
//!
//! # Example
//!
//! ```rust,no_run
//! use jobwatch_core::AppConfig;
//! use jobwatch_roster::{Roster, RosterLoader};
//! use jobwatch_scanner::{Orchestrator, RunMode};
//! use jobwatch_store::StoreLayout;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let roster = Roster::load_from(&RosterLoader::with_default_dir()?)?;
//! let store = StoreLayout::new(config.data_dir()?);
//!
//! let orchestrator = Orchestrator::new(config, roster, store)?;
//! let report = orchestrator.run(RunMode::Production, &mut ()).await?;
//! println!("{} new jobs", report.summary.total_jobs());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod adapters;
pub mod error;
pub mod filter;
pub mod geography;
pub mod http;
pub mod orchestrator;
pub mod parser;
pub mod url_builder;

// Re-export commonly used types
pub use adapters::{
    Adapter, JobCollector, ScrapeContext, ScrapeOutcome, WorkdayHost, WorkdayTarget,
};
pub use error::{Result, ScanError};
pub use filter::JobFilter;
pub use geography::is_us_or_eu;
pub use http::{HttpClient, Request};
pub use orchestrator::{CompanyReport, Orchestrator, RunMode, RunObserver, RunReport};
pub use url_builder::build_url;
