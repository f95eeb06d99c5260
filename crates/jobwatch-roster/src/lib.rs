//! Jobwatch Roster - the curated list of companies to scrape.
//!
//! This crate provides the types and loading logic for the company roster.
//! The roster is a set of TOML tier files, read in file-name order, each
//! holding an ordered list of companies and the scraper configured for them.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): Tier files, company entries, scraper platforms
//! - **Loader** ([`loader`]): TOML file loading from the `roster/` directory
//! - **Registry** ([`registry`]): Ordered, immutable roster with query support
//! - **Errors** ([`error`]): Roster-specific error types
//!
//! # Example
//!
//! ```rust,no_run
//! use jobwatch_roster::{Roster, RosterLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = RosterLoader::with_default_dir()?;
//! let roster = Roster::load_from(&loader)?;
//!
//! for tier in roster.tiers() {
//!     println!("{}: {} companies", tier.name, tier.companies.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{CallingConvention, CompanyEntry, ScraperConfig, TierFile, TierMetadata};
pub use error::{Result, RosterError};
pub use loader::RosterLoader;
pub use registry::{Roster, Tier};
