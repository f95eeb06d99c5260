//! Shared types used across the Jobwatch crates.
//!
//! This module defines the newtypes and records that flow between the
//! roster, the scanner adapters and the persistence layer.

use crate::error::JobwatchError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for a company's tenant slug on an ATS vendor.
///
/// Slugs are the path segment (or subdomain) a vendor uses to identify a
/// company, e.g. `stripe` in `api.greenhouse.io/v1/boards/stripe/jobs`.
/// They must start with an alphanumeric character and contain only
/// alphanumerics, spaces, dots, underscores and hyphens (1-64 chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanySlug(String);

impl CompanySlug {
    /// Create a new `CompanySlug` from a string.
    ///
    /// # Errors
    /// Returns error if the slug doesn't match the required format.
    pub fn new(slug: impl Into<String>) -> Result<Self, JobwatchError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form, safe to splice into a URL path.
    #[must_use]
    pub fn url_encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }

    fn validate(slug: &str) -> Result<(), JobwatchError> {
        static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SLUG_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._-]{0,63}$").expect("valid regex"));

        if slug.trim_end() != slug {
            return Err(JobwatchError::Validation(format!(
                "invalid company slug: trailing whitespace in '{slug}'"
            )));
        }

        if regex.is_match(slug) {
            Ok(())
        } else {
            Err(JobwatchError::Validation(format!(
                "invalid company slug: must be 1-64 alphanumerics, spaces, dots, underscores or hyphens, got '{slug}'"
            )))
        }
    }
}

impl fmt::Display for CompanySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CompanySlug {
    type Error = JobwatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanySlug> for String {
    fn from(slug: CompanySlug) -> Self {
        slug.0
    }
}

/// A single job listing normalized from any vendor.
///
/// The URL is the identity of a listing: two records with the same URL are
/// the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Listing title as shown by the vendor
    pub title: String,
    /// Absolute URL of the listing
    pub url: String,
    /// Free-text location, if the vendor exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl JobRecord {
    /// Create a record without location.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            location: None,
        }
    }

    /// Attach a location, ignoring blank strings.
    #[must_use]
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    /// Render the report line `<company> --- <title> (<location>)`.
    ///
    /// The parenthesised part is omitted when the location is absent.
    #[must_use]
    pub fn job_line(&self, company: &str) -> String {
        match &self.location {
            Some(location) => format!("{company} --- {} ({location})", self.title),
            None => format!("{company} --- {}", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_slug_valid() {
        let valid = vec!["stripe", "apac-atlassian", "shield ai", "uscareers-yelp", "Zillow_Group"];
        for slug in valid {
            assert!(CompanySlug::new(slug).is_ok(), "Failed for: {slug}");
        }
    }

    #[test]
    fn test_company_slug_invalid() {
        let too_long = "a".repeat(65);
        let invalid = vec!["", "-stripe", "stripe/jobs", "stripe?x=1", "stripe ", too_long.as_str()];
        for slug in invalid {
            assert!(CompanySlug::new(slug).is_err(), "Should fail for: {slug}");
        }
    }

    #[test]
    fn test_company_slug_url_encoding() {
        let slug = CompanySlug::new("shield ai").expect("valid slug");
        assert_eq!(slug.url_encoded(), "shield%20ai");
        assert_eq!(slug.to_string(), "shield ai");
    }

    #[test]
    fn test_company_slug_deserialize_validates() {
        let ok: Result<CompanySlug, _> = serde_json::from_str("\"stripe\"");
        assert!(ok.is_ok());

        let bad: Result<CompanySlug, _> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_job_line_with_and_without_location() {
        let job = JobRecord::new("Software Engineer", "https://x/1")
            .with_location(Some("Austin, TX".to_string()));
        assert_eq!(job.job_line("Stripe"), "Stripe --- Software Engineer (Austin, TX)");

        let job = JobRecord::new("Software Engineer", "https://x/1");
        assert_eq!(job.job_line("Stripe"), "Stripe --- Software Engineer");
    }

    #[test]
    fn test_blank_location_is_absent() {
        let job = JobRecord::new("Backend Developer", "https://x/2").with_location(Some("  ".into()));
        assert_eq!(job.location, None);
    }
}
