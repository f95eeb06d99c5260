//! Ordered in-memory roster with query support.

use crate::{
    definition::CompanyEntry,
    error::Result,
    loader::RosterLoader,
};
use tracing::info;

/// A named, ordered group of companies.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    /// Display name (e.g. "Tier 1A")
    pub name: String,
    /// Companies in run order
    pub companies: Vec<CompanyEntry>,
}

impl Tier {
    /// Companies marked as manually verified.
    pub fn verified(&self) -> impl Iterator<Item = &CompanyEntry> {
        self.companies.iter().filter(|c| c.manually_verified)
    }

    /// Companies not yet manually verified.
    pub fn unverified(&self) -> impl Iterator<Item = &CompanyEntry> {
        self.companies.iter().filter(|c| !c.manually_verified)
    }
}

/// The company roster: tiers in run order.
///
/// The roster is immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    tiers: Vec<Tier>,
}

impl Roster {
    /// Create a roster from already-built tiers.
    #[must_use]
    pub fn from_tiers(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// Create a roster and load all tiers from the given loader.
    ///
    /// # Errors
    /// Returns error if loading fails.
    pub fn load_from(loader: &RosterLoader) -> Result<Self> {
        let tiers = loader.load_all()?;
        let roster = Self { tiers };
        info!(
            tiers = roster.tiers.len(),
            companies = roster.count(),
            verified = roster.count_verified(),
            "roster ready"
        );
        Ok(roster)
    }

    /// All tiers in run order.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Every company across all tiers, in run order.
    pub fn companies(&self) -> impl Iterator<Item = &CompanyEntry> {
        self.tiers.iter().flat_map(|t| t.companies.iter())
    }

    /// Total number of companies.
    #[must_use]
    pub fn count(&self) -> usize {
        self.companies().count()
    }

    /// Number of manually verified companies.
    #[must_use]
    pub fn count_verified(&self) -> usize {
        self.companies().filter(|c| c.manually_verified).count()
    }

    /// Number of companies with no scraper configured.
    #[must_use]
    pub fn count_unconfigured(&self) -> usize {
        self.companies().filter(|c| c.scraper.is_none()).count()
    }
}
