//! Jobwatch Core - Foundation crate for the Jobwatch job-listing aggregator.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other Jobwatch crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and records (`CompanySlug`, `JobRecord`)
//!
//! # Example
//!
//! ```rust
//! use jobwatch_core::{AppConfig, JobRecord};
//!
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let job = JobRecord::new("Software Engineer", "https://example.com/1");
//! assert_eq!(job.job_line("Example"), "Example --- Software Engineer");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, EndpointsConfig, FilterConfig, GeneralConfig, OutputConfig, PathsConfig,
    ScanningConfig,
};
pub use error::{ConfigError, ConfigResult, JobwatchError, Result};
pub use types::{CompanySlug, JobRecord};
