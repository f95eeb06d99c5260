//! Title and location filter applied to every candidate job.

use crate::geography::is_us_or_eu;
use jobwatch_core::FilterConfig;

/// Keyword include/exclude rules plus the geography check.
///
/// Keywords are compared case-insensitively as plain substrings of the title.
#[derive(Debug, Clone)]
pub struct JobFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    geography: bool,
    enabled: bool,
}

impl JobFilter {
    /// Build a filter from configuration.
    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            include: lowercase_all(&config.include_keywords),
            exclude: lowercase_all(&config.exclude_keywords),
            geography: config.geography,
            enabled: true,
        }
    }

    /// A filter that accepts everything (manual-test mode).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            geography: false,
            enabled: false,
        }
    }

    /// Whether a job passes.
    ///
    /// A blank or absent location skips the geography check.
    #[must_use]
    pub fn should_include(&self, title: &str, location: Option<&str>) -> bool {
        if !self.enabled {
            return true;
        }
        if !self.title_matches(title) {
            return false;
        }
        match location.map(str::trim) {
            Some(location) if self.geography && !location.is_empty() => is_us_or_eu(location),
            _ => true,
        }
    }

    /// Keyword rules only: at least one include keyword and no exclude keyword.
    #[must_use]
    pub fn title_matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.include.iter().any(|k| title.contains(k.as_str()))
            && !self.exclude.iter().any(|k| title.contains(k.as_str()))
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
