//! Roster loading from TOML files.
//!
//! This module handles loading tier files from the `roster/` directory.
//! Files are read in file-name order so that tier order is stable.

use crate::{
    definition::{CompanyEntry, TierFile},
    error::{Result, RosterError},
    registry::Tier,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loader for tier files.
pub struct RosterLoader {
    /// Directory containing tier TOML files
    roster_dir: PathBuf,
}

impl RosterLoader {
    /// Create a new loader with the given roster directory.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist.
    pub fn new(roster_dir: impl Into<PathBuf>) -> Result<Self> {
        let roster_dir = roster_dir.into();

        if !roster_dir.is_dir() {
            return Err(RosterError::DirectoryNotFound {
                path: roster_dir.display().to_string(),
            });
        }

        Ok(Self { roster_dir })
    }

    /// Create a loader using the default roster directory.
    ///
    /// Looks for `roster/` relative to the workspace root.
    ///
    /// # Errors
    /// Returns error if the default directory doesn't exist.
    pub fn with_default_dir() -> Result<Self> {
        // Find workspace root by looking for Cargo.toml with [workspace]
        let mut current_dir = std::env::current_dir()?;

        loop {
            let cargo_toml = current_dir.join("Cargo.toml");
            if cargo_toml.exists() {
                if let Ok(contents) = std::fs::read_to_string(&cargo_toml) {
                    if contents.contains("[workspace]") {
                        return Self::new(current_dir.join("roster"));
                    }
                }
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        // Fallback: try relative path
        Self::new(PathBuf::from("roster"))
    }

    /// Directory this loader reads from.
    #[must_use]
    pub fn roster_dir(&self) -> &Path {
        &self.roster_dir
    }

    /// Load every tier file in the roster directory, in file-name order.
    ///
    /// Unreadable or invalid files, and invalid entries inside a valid
    /// file, are logged as warnings and skipped.
    ///
    /// # Errors
    /// Returns error if the directory can't be read.
    pub fn load_all(&self) -> Result<Vec<Tier>> {
        let mut paths = Vec::new();
        Self::collect_toml_files(&self.roster_dir, &mut paths)?;
        paths.sort();

        let mut tiers = Vec::new();
        for path in paths {
            match Self::load_from_path(&path) {
                Ok(file) => {
                    if let Err(e) = file.validate() {
                        warn!(path = %path.display(), error = %e, "skipping invalid tier file");
                        continue;
                    }
                    tiers.push(Self::into_tier(file, &path));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load tier file");
                }
            }
        }

        info!(
            tiers = tiers.len(),
            companies = tiers.iter().map(|t| t.companies.len()).sum::<usize>(),
            dir = %self.roster_dir.display(),
            "loaded roster"
        );

        Ok(tiers)
    }

    fn into_tier(file: TierFile, path: &Path) -> Tier {
        let companies: Vec<CompanyEntry> = file
            .companies
            .into_iter()
            .filter(|company| match company.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        company = %company.name,
                        error = %e,
                        "skipping invalid company entry"
                    );
                    false
                }
            })
            .collect();

        debug!(tier = %file.tier.name, companies = companies.len(), "loaded tier");

        Tier {
            name: file.tier.name,
            companies,
        }
    }

    /// Recursively collect TOML files.
    fn collect_toml_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::collect_toml_files(&path, paths)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }

        Ok(())
    }

    /// Load a tier file from a specific path.
    fn load_from_path(path: &Path) -> Result<TierFile> {
        let contents = std::fs::read_to_string(path).map_err(|e| RosterError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        toml::from_str(&contents).map_err(|e| RosterError::ParseError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tier(dir: &Path, file_name: &str, tier_name: &str, companies: &[(&str, &str)]) {
        let mut content = format!("[tier]\nname = \"{tier_name}\"\n");
        for (name, platform) in companies {
            content.push_str(&format!(
                "\n[[companies]]\nname = \"{name}\"\nformatted_name = \"{}\"\n\n[companies.scraper]\nplatform = \"{platform}\"\n",
                name.to_lowercase()
            ));
        }
        std::fs::write(dir.join(file_name), content).expect("write tier file");
    }

    #[test]
    fn test_loader_new_with_existing_dir() {
        let temp_dir = TempDir::new().expect("create temp dir");
        assert!(RosterLoader::new(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_loader_new_with_nonexistent_dir() {
        let loader = RosterLoader::new("/nonexistent/path/to/roster");
        assert!(matches!(loader, Err(RosterError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_load_all_in_file_name_order() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_tier(temp_dir.path(), "20-tier-2a.toml", "Tier 2A", &[("Reddit", "greenhouse")]);
        write_tier(
            temp_dir.path(),
            "10-tier-1a.toml",
            "Tier 1A",
            &[("Stripe", "greenhouse"), ("Netflix", "netflix")],
        );

        let loader = RosterLoader::new(temp_dir.path()).expect("create loader");
        let tiers = loader.load_all().expect("load roster");

        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].name, "Tier 1A");
        assert_eq!(tiers[0].companies[0].name, "Stripe");
        assert_eq!(tiers[0].companies[1].name, "Netflix");
        assert_eq!(tiers[1].name, "Tier 2A");
    }

    #[test]
    fn test_load_all_skips_invalid_files() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_tier(temp_dir.path(), "a.toml", "Tier A", &[("Stripe", "greenhouse")]);
        std::fs::write(temp_dir.path().join("b.toml"), "invalid toml content [[[")
            .expect("write invalid file");
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("write txt");

        let loader = RosterLoader::new(temp_dir.path()).expect("create loader");
        let tiers = loader.load_all().expect("load roster");

        assert_eq!(tiers.len(), 1);
    }

    #[test]
    fn test_load_all_skips_invalid_entries() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let content = r#"
[tier]
name = "Tier 1A"

[[companies]]
name = "NVIDIA"
formatted_name = "nvidia"

[companies.scraper]
platform = "workday"
datacenter = 0
site = "NVIDIAExternalCareerSite"

[[companies]]
name = "Stripe"
formatted_name = "stripe"

[companies.scraper]
platform = "greenhouse"
"#;
        std::fs::write(temp_dir.path().join("tier.toml"), content).expect("write tier");

        let loader = RosterLoader::new(temp_dir.path()).expect("create loader");
        let tiers = loader.load_all().expect("load roster");

        assert_eq!(tiers[0].companies.len(), 1);
        assert_eq!(tiers[0].companies[0].name, "Stripe");
    }

    #[test]
    fn test_out_of_range_datacenter_keeps_rest_of_tier() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let content = r#"
[tier]
name = "Tier 1A"

[[companies]]
name = "NVIDIA"
formatted_name = "nvidia"

[companies.scraper]
platform = "workday"
datacenter = 300
site = "NVIDIAExternalCareerSite"

[[companies]]
name = "Stripe"
formatted_name = "stripe"

[companies.scraper]
platform = "greenhouse"
"#;
        std::fs::write(temp_dir.path().join("tier.toml"), content).expect("write tier");

        let loader = RosterLoader::new(temp_dir.path()).expect("create loader");
        let tiers = loader.load_all().expect("load roster");

        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].companies.len(), 1);
        assert_eq!(tiers[0].companies[0].name, "Stripe");
    }

    #[test]
    fn test_nested_directories_are_walked() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let nested = temp_dir.path().join("extra");
        std::fs::create_dir_all(&nested).expect("create nested dir");
        write_tier(&nested, "tier.toml", "Nested", &[("Lyft", "greenhouse")]);

        let loader = RosterLoader::new(temp_dir.path()).expect("create loader");
        let tiers = loader.load_all().expect("load roster");

        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].name, "Nested");
    }
}
