//! Roster definition types.
//!
//! This module defines the data structures for tier files loaded from TOML.

use crate::error::{Result, RosterError};
use jobwatch_core::CompanySlug;
use serde::{Deserialize, Serialize};

/// One roster file: a named tier and its ordered companies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierFile {
    /// Tier metadata
    pub tier: TierMetadata,

    /// Companies in run order
    #[serde(default)]
    pub companies: Vec<CompanyEntry>,
}

/// Tier metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMetadata {
    /// Display name (e.g. "Tier 1A")
    pub name: String,
}

/// Static descriptor for a company on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntry {
    /// Display name
    pub name: String,

    /// Slug used to build vendor URLs
    pub formatted_name: CompanySlug,

    /// Configured scraper; `None` means the company is skipped
    #[serde(default)]
    pub scraper: Option<ScraperConfig>,

    /// Whether the scraper output has been checked by hand
    #[serde(default)]
    pub manually_verified: bool,
}

impl CompanyEntry {
    /// Validate the entry for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RosterError::ValidationError {
                name: self.formatted_name.to_string(),
                reason: "company name cannot be empty".to_string(),
            });
        }

        if let Some(scraper) = &self.scraper {
            scraper.validate(&self.name)?;
        }

        Ok(())
    }
}

/// How an adapter is called: with the company's slug, or with nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallingConvention {
    /// Multi-tenant vendor addressed by the company slug
    SlugBased,
    /// Single-company endpoint hardcoded in the adapter
    Bespoke,
}

/// Scraper configuration, tagged by platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "kebab-case")]
pub enum ScraperConfig {
    /// Lever hosted board (HTML)
    Lever,
    /// Greenhouse board API
    Greenhouse,
    /// Ashby posting API
    Ashby,
    /// Workday on `<tenant>.wd<N>.myworkdayjobs.com`
    Workday {
        /// Workday datacenter number (`wd5` -> 5)
        datacenter: u16,
        /// Career site path segment
        site: String,
        /// Tenant when it differs from the company slug
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tenant: Option<CompanySlug>,
    },
    /// Workday on `wd<N>.myworkdaysite.com/recruiting/<tenant>/<site>`
    WorkdaySite {
        /// Workday datacenter number
        datacenter: u16,
        /// Career site path segment
        site: String,
        /// Tenant when it differs from the company slug
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tenant: Option<CompanySlug>,
    },
    /// SmartRecruiters postings API
    #[serde(rename = "smartrecruiters")]
    SmartRecruiters,
    /// Jobvite hosted board (HTML)
    Jobvite,
    /// Netflix careers API
    Netflix,
    /// Spotify careers API
    Spotify,
    /// Uber careers API
    Uber,
    /// iCIMS (not implemented)
    Icims,
    /// SAP SuccessFactors (not implemented)
    #[serde(rename = "successfactors")]
    SuccessFactors,
    /// NC2 (not implemented)
    #[serde(rename = "nc2")]
    Nc2,
    /// Avature (not implemented)
    Avature,
    /// Meta careers (not implemented)
    Meta,
    /// Google careers (not implemented)
    Google,
    /// Wiz careers (not implemented)
    Wiz,
    /// Apple careers (not implemented)
    Apple,
    /// Amazon careers (not implemented)
    Amazon,
    /// Microsoft careers (not implemented)
    Microsoft,
    /// `HubSpot` careers (not implemented)
    #[serde(rename = "hubspot")]
    HubSpot,
    /// Deloitte careers (not implemented)
    Deloitte,
    /// Qualcomm careers (not implemented)
    Qualcomm,
    /// `LinkedIn` careers (not implemented)
    #[serde(rename = "linkedin")]
    LinkedIn,
    /// Peloton careers (not implemented)
    Peloton,
    /// Atlassian careers (not implemented)
    Atlassian,
    /// `GitHub` careers (not implemented)
    #[serde(rename = "github")]
    GitHub,
}

impl ScraperConfig {
    /// Vendor display name, used in log markers.
    #[must_use]
    pub fn vendor_name(&self) -> &'static str {
        match self {
            Self::Lever => "Lever",
            Self::Greenhouse => "Greenhouse",
            Self::Ashby => "Ashby",
            Self::Workday { .. } => "Workday",
            Self::WorkdaySite { .. } => "Workday Site",
            Self::SmartRecruiters => "SmartRecruiters",
            Self::Jobvite => "Jobvite",
            Self::Netflix => "Netflix",
            Self::Spotify => "Spotify",
            Self::Uber => "Uber",
            Self::Icims => "iCIMS",
            Self::SuccessFactors => "SuccessFactors",
            Self::Nc2 => "NC2",
            Self::Avature => "Avature",
            Self::Meta => "Meta",
            Self::Google => "Google",
            Self::Wiz => "Wiz",
            Self::Apple => "Apple",
            Self::Amazon => "Amazon",
            Self::Microsoft => "Microsoft",
            Self::HubSpot => "HubSpot",
            Self::Deloitte => "Deloitte",
            Self::Qualcomm => "Qualcomm",
            Self::LinkedIn => "LinkedIn",
            Self::Peloton => "Peloton",
            Self::Atlassian => "Atlassian",
            Self::GitHub => "GitHub",
        }
    }

    /// Whether the platform needs the company slug.
    #[must_use]
    pub fn calling_convention(&self) -> CallingConvention {
        match self {
            Self::Lever
            | Self::Greenhouse
            | Self::Ashby
            | Self::Workday { .. }
            | Self::WorkdaySite { .. }
            | Self::SmartRecruiters
            | Self::Jobvite
            | Self::Icims
            | Self::SuccessFactors
            | Self::Nc2
            | Self::Avature => CallingConvention::SlugBased,
            _ => CallingConvention::Bespoke,
        }
    }

    /// Whether a real adapter backs this platform.
    #[must_use]
    pub fn is_implemented(&self) -> bool {
        matches!(
            self,
            Self::Lever
                | Self::Greenhouse
                | Self::Ashby
                | Self::Workday { .. }
                | Self::WorkdaySite { .. }
                | Self::SmartRecruiters
                | Self::Jobvite
                | Self::Netflix
                | Self::Spotify
                | Self::Uber
        )
    }

    fn validate(&self, company: &str) -> Result<()> {
        match self {
            Self::Workday {
                datacenter, site, ..
            }
            | Self::WorkdaySite {
                datacenter, site, ..
            } => {
                if *datacenter == 0 || *datacenter > 99 {
                    return Err(RosterError::ValidationError {
                        name: company.to_string(),
                        reason: format!("workday datacenter must be 1-99, got {datacenter}"),
                    });
                }
                if site.trim().is_empty() || site.contains('/') {
                    return Err(RosterError::ValidationError {
                        name: company.to_string(),
                        reason: "workday site must be a single non-empty path segment"
                            .to_string(),
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl TierFile {
    /// Validate tier metadata. Company entries are validated individually.
    pub fn validate(&self) -> Result<()> {
        if self.tier.name.trim().is_empty() {
            return Err(RosterError::ValidationError {
                name: "<tier>".to_string(),
                reason: "tier name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(scraper: Option<ScraperConfig>) -> CompanyEntry {
        CompanyEntry {
            name: "NVIDIA".to_string(),
            formatted_name: CompanySlug::new("nvidia").expect("valid slug"),
            scraper,
            manually_verified: false,
        }
    }

    #[test]
    fn test_parse_tier_file() {
        let toml_str = r#"
[tier]
name = "Tier 1A"

[[companies]]
name = "Stripe"
formatted_name = "stripe"
manually_verified = true

[companies.scraper]
platform = "greenhouse"

[[companies]]
name = "NVIDIA"
formatted_name = "nvidia"

[companies.scraper]
platform = "workday"
datacenter = 5
site = "NVIDIAExternalCareerSite"

[[companies]]
name = "Shopify"
formatted_name = "shopify"
"#;

        let file: TierFile = toml::from_str(toml_str).expect("parse tier file");
        assert_eq!(file.tier.name, "Tier 1A");
        assert_eq!(file.companies.len(), 3);
        assert_eq!(file.companies[0].scraper, Some(ScraperConfig::Greenhouse));
        assert!(file.companies[0].manually_verified);
        assert!(!file.companies[1].manually_verified);
        assert!(matches!(
            file.companies[1].scraper,
            Some(ScraperConfig::Workday { datacenter: 5, .. })
        ));
        assert_eq!(file.companies[2].scraper, None);
    }

    #[test]
    fn test_renamed_platform_tags() {
        for (tag, expected) in [
            ("smartrecruiters", ScraperConfig::SmartRecruiters),
            ("successfactors", ScraperConfig::SuccessFactors),
            ("hubspot", ScraperConfig::HubSpot),
            ("linkedin", ScraperConfig::LinkedIn),
            ("github", ScraperConfig::GitHub),
            ("nc2", ScraperConfig::Nc2),
        ] {
            let parsed: ScraperConfig =
                toml::from_str(&format!("platform = \"{tag}\"")).expect("parse platform tag");
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let parsed: std::result::Result<ScraperConfig, _> =
            toml::from_str("platform = \"taleo\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_calling_convention() {
        assert_eq!(
            ScraperConfig::Greenhouse.calling_convention(),
            CallingConvention::SlugBased
        );
        assert_eq!(
            ScraperConfig::Icims.calling_convention(),
            CallingConvention::SlugBased
        );
        assert_eq!(
            ScraperConfig::Netflix.calling_convention(),
            CallingConvention::Bespoke
        );
        assert_eq!(
            ScraperConfig::Meta.calling_convention(),
            CallingConvention::Bespoke
        );
    }

    #[test]
    fn test_is_implemented() {
        assert!(ScraperConfig::Uber.is_implemented());
        assert!(!ScraperConfig::Avature.is_implemented());
        assert!(!ScraperConfig::Google.is_implemented());
    }

    #[test]
    fn test_workday_validation() {
        let valid = entry(Some(ScraperConfig::Workday {
            datacenter: 5,
            site: "NVIDIAExternalCareerSite".to_string(),
            tenant: None,
        }));
        assert!(valid.validate().is_ok());

        let bad_dc = entry(Some(ScraperConfig::Workday {
            datacenter: 0,
            site: "Site".to_string(),
            tenant: None,
        }));
        assert!(bad_dc.validate().is_err());

        let large_dc = entry(Some(ScraperConfig::Workday {
            datacenter: 300,
            site: "Site".to_string(),
            tenant: None,
        }));
        assert!(large_dc.validate().is_err());

        let bad_site = entry(Some(ScraperConfig::WorkdaySite {
            datacenter: 3,
            site: "a/b".to_string(),
            tenant: None,
        }));
        assert!(bad_site.validate().is_err());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let mut company = entry(None);
        company.name = "  ".to_string();
        assert!(company.validate().is_err());
    }
}
