//! Configuration management for Jobwatch.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/jobwatch/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General application settings
    pub general: GeneralConfig,
    /// Request pacing and retry settings
    pub scanning: ScanningConfig,
    /// Title keyword and geography filters
    pub filters: FilterConfig,
    /// Output sink toggles
    pub output: OutputConfig,
    /// Storage and roster locations
    pub paths: PathsConfig,
    /// Vendor URL templates
    pub endpoints: EndpointsConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if missing.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBWATCH_REQUEST_DELAY_MS`: Override the inter-request delay
    /// - `JOBWATCH_TIMEOUT_SECS`: Override the per-request timeout
    /// - `JOBWATCH_DATA_DIR`: Override where seen URLs and logs are stored
    /// - `JOBWATCH_ROSTER_DIR`: Override the roster directory
    pub fn load_with_env(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("JOBWATCH_REQUEST_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.scanning.request_delay_ms = delay;
                tracing::debug!("Override scanning.request_delay_ms from env: {}", delay);
            }
        }

        if let Ok(val) = std::env::var("JOBWATCH_TIMEOUT_SECS") {
            if let Ok(timeout) = val.parse() {
                self.scanning.timeout_secs = timeout;
                tracing::debug!("Override scanning.timeout_secs from env: {}", timeout);
            }
        }

        if let Ok(val) = std::env::var("JOBWATCH_DATA_DIR") {
            tracing::debug!("Override paths.data_dir from env: {}", val);
            self.paths.data_dir = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("JOBWATCH_ROSTER_DIR") {
            tracing::debug!("Override paths.roster_dir from env: {}", val);
            self.paths.roster_dir = Some(PathBuf::from(val));
        }
    }

    /// Check values that would make a run meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.scanning.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.filters.include_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "filters.include_keywords".to_string(),
                reason: "at least one keyword is required".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to the given path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobwatch/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "jobwatch", "jobwatch").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Directory holding the seen-URL store and the result logs.
    ///
    /// Uses `paths.data_dir` when set, otherwise `~/.local/share/jobwatch`.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.paths.data_dir {
            return Ok(dir.clone());
        }
        let dirs =
            ProjectDirs::from("com", "jobwatch", "jobwatch").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Request pacing and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Courtesy delay after every request attempt, in milliseconds
    pub request_delay_ms: u64,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Total attempts per request on connection-level failures
    pub max_attempts: u32,
    /// Base backoff in milliseconds, doubled after each failed attempt
    pub backoff_base_ms: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            timeout_secs: 10,
            max_attempts: 3,
            backoff_base_ms: 1000,
            user_agent: "Jobwatch/0.1.0 (+https://github.com/jobwatch/jobwatch)".to_string(),
        }
    }
}

/// Title keyword and geography filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// A title must contain at least one of these (case-insensitive)
    pub include_keywords: Vec<String>,
    /// A title must contain none of these (case-insensitive)
    pub exclude_keywords: Vec<String>,
    /// Whether locations must classify as US or EU
    pub geography: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_keywords: to_strings(DEFAULT_INCLUDE_KEYWORDS),
            exclude_keywords: to_strings(DEFAULT_EXCLUDE_KEYWORDS),
            geography: true,
        }
    }
}

// Broad terms first: they match nearly every relevant title.
const DEFAULT_INCLUDE_KEYWORDS: &[&str] = &[
    "Engineer",
    "Developer",
    "Software",
    "Backend",
    "Full",
    "Python",
    "Go",
    "JavaScript",
    "Node.js",
    "Web",
    "Infrastructure",
    "DevOps",
    "Reliability",
    "Platform",
    "Data",
    "Machine Learning",
    "ML",
    "AI",
    "SRE",
    "Cloud Engineer",
    "API",
    "Microservice",
    "Distributed",
];

const DEFAULT_EXCLUDE_KEYWORDS: &[&str] = &[
    // Seniority and management
    "Senior",
    "Staff",
    "III",
    "IV",
    "3",
    "4",
    "5",
    "Experienced",
    "Principal",
    "Lead",
    "Manager",
    "Dir",
    "VP",
    "Head",
    "Chief",
    "Sr",
    // Out-of-scope areas
    "Solutions Architect",
    "Analyst",
    "Technical Support",
    "Partner",
    "Security",
    "Hardware",
    "Mobile",
    "iOS",
    "Research",
    "Sales",
    "Scientist",
    "Trainer",
    "Solutions Engineer",
    "Design",
    "Firmware",
    "Control Systems",
    "Electrical",
    "Mechanical",
    "FPGA",
    "Field",
    "Power",
    "Energy",
    "Propulsion",
    "Radar",
    "Robotics",
    "Sustainment",
    "Motion",
    "Fluid",
    "Manufacturing",
    "Thermal",
    "Telecom",
    "Structural",
    "Material",
    "Industrial",
    "Aerospace",
    "Sourcing",
    "Perception",
    "Vision",
    "Administrator",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Output sink toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct OutputConfig {
    /// Print job lines and the summary to stdout
    pub console: bool,
    /// Append job lines to one log file per company
    pub files_by_company: bool,
    /// Write a summary file per run (the error log is always appended)
    pub files_by_scrape: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            files_by_company: true,
            files_by_scrape: true,
        }
    }
}

/// Storage and roster locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for `jobs_found.txt`, `companies_seen.txt` and `search_results/`
    pub data_dir: Option<PathBuf>,
    /// Directory holding the roster TOML files
    pub roster_dir: Option<PathBuf>,
}

/// Vendor URL templates.
///
/// Placeholders: `{slug}`, `{tenant}`, `{datacenter}`, `{site}`, `{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Greenhouse job board API
    pub greenhouse: String,
    /// Lever hosted job board (HTML)
    pub lever: String,
    /// Ashby posting API
    pub ashby: String,
    /// Workday `myworkdayjobs.com` host
    pub workday_jobs: String,
    /// Workday `myworkdaysite.com` host
    pub workday_site: String,
    /// SmartRecruiters postings API
    pub smartrecruiters: String,
    /// SmartRecruiters public posting page
    pub smartrecruiters_posting: String,
    /// Jobvite hosted job list (HTML)
    pub jobvite: String,
    /// Netflix careers API
    pub netflix: String,
    /// Spotify careers search API
    pub spotify: String,
    /// Spotify public posting page
    pub spotify_posting: String,
    /// Uber careers search API
    pub uber: String,
    /// Uber public posting page
    pub uber_posting: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            greenhouse: "https://api.greenhouse.io/v1/boards/{slug}/jobs".to_string(),
            lever: "https://jobs.lever.co/{slug}".to_string(),
            ashby: "https://api.ashbyhq.com/posting-api/job-board/{slug}".to_string(),
            workday_jobs: "https://{tenant}.wd{datacenter}.myworkdayjobs.com".to_string(),
            workday_site: "https://wd{datacenter}.myworkdaysite.com".to_string(),
            smartrecruiters: "https://api.smartrecruiters.com/v1/companies/{slug}/postings"
                .to_string(),
            smartrecruiters_posting: "https://jobs.smartrecruiters.com/{slug}/{id}".to_string(),
            jobvite: "https://jobs.jobvite.com/{slug}/jobs".to_string(),
            netflix: "https://explore.jobs.netflix.net/api/apply/v2/jobs".to_string(),
            spotify:
                "https://api-dot-new-spotifyjobs-com.nw.r.appspot.com/wp-json/animal/v1/job/search"
                    .to_string(),
            spotify_posting: "https://www.lifeatspotify.com/jobs/{id}".to_string(),
            uber: "https://www.uber.com/api/loadSearchJobsResults".to_string(),
            uber_posting: "https://www.uber.com/global/en/careers/list/{id}/".to_string(),
        }
    }
}

impl EndpointsConfig {
    /// Point every endpoint at a single base URL, keeping each vendor's path.
    ///
    /// Host-templated Workday endpoints collapse to the base itself.
    #[must_use]
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let defaults = Self::default();
        let rebase = |template: &str| -> String {
            let path_start = template
                .find("://")
                .and_then(|scheme_end| {
                    template[scheme_end + 3..]
                        .find('/')
                        .map(|p| p + scheme_end + 3)
                })
                .unwrap_or(template.len());
            format!("{base}{}", &template[path_start..])
        };

        Self {
            greenhouse: rebase(&defaults.greenhouse),
            lever: rebase(&defaults.lever),
            ashby: rebase(&defaults.ashby),
            workday_jobs: base.to_string(),
            workday_site: base.to_string(),
            smartrecruiters: rebase(&defaults.smartrecruiters),
            smartrecruiters_posting: rebase(&defaults.smartrecruiters_posting),
            jobvite: rebase(&defaults.jobvite),
            netflix: rebase(&defaults.netflix),
            spotify: rebase(&defaults.spotify),
            spotify_posting: rebase(&defaults.spotify_posting),
            uber: rebase(&defaults.uber),
            uber_posting: rebase(&defaults.uber_posting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.scanning.request_delay_ms, 1000);
        assert_eq!(config.scanning.timeout_secs, 10);
        assert_eq!(config.scanning.max_attempts, 3);
        assert!(config.filters.geography);
        assert!(config.output.console);
        assert!(config.filters.include_keywords.contains(&"Engineer".to_string()));
        assert!(config.filters.exclude_keywords.contains(&"Senior".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[scanning]"));
        assert!(toml_str.contains("[filters]"));
        assert!(toml_str.contains("[endpoints]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.endpoints.greenhouse, config.endpoints.greenhouse);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.scanning.request_delay_ms = 250;
        config.filters.geography = false;

        config.save_to(&config_path).expect("save config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.scanning.request_delay_ms, 250);
        assert!(!loaded.filters.geography);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let config = AppConfig::load_from(&tmp.path().join("absent.toml")).expect("defaults");
        assert_eq!(config.scanning.max_attempts, 3);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scanning]
request_delay_ms = 0

[filters]
include_keywords = ["Rust"]
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.scanning.request_delay_ms, 0);
        assert_eq!(config.filters.include_keywords, vec!["Rust".to_string()]);
        // These should be defaults
        assert_eq!(config.scanning.timeout_secs, 10);
        assert!(config.filters.exclude_keywords.contains(&"Senior".to_string()));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = AppConfig::default();
        config.scanning.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "scanning.max_attempts"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_include_list() {
        let mut config = AppConfig::default();
        config.filters.include_keywords = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_data_dir() {
        let mut config = AppConfig::default();
        config.paths.data_dir = Some(PathBuf::from("/tmp/jobwatch-data"));
        assert_eq!(
            config.data_dir().expect("data dir"),
            PathBuf::from("/tmp/jobwatch-data")
        );
    }

    #[test]
    fn test_endpoints_with_base_url() {
        let endpoints = EndpointsConfig::with_base_url("http://127.0.0.1:4000/");
        assert_eq!(
            endpoints.greenhouse,
            "http://127.0.0.1:4000/v1/boards/{slug}/jobs"
        );
        assert_eq!(endpoints.lever, "http://127.0.0.1:4000/{slug}");
        assert_eq!(endpoints.netflix, "http://127.0.0.1:4000/api/apply/v2/jobs");
        assert_eq!(endpoints.workday_jobs, "http://127.0.0.1:4000");
    }
}
