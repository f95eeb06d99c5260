//! Example: Load and display the company roster from the roster directory.

use jobwatch_roster::{Roster, RosterLoader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading roster from roster/...\n");

    let loader = match RosterLoader::with_default_dir() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nMake sure you're running this from the workspace root!");
            return Err(Box::new(e));
        }
    };

    let roster = Roster::load_from(&loader)?;

    for tier in roster.tiers() {
        println!("{} ({} companies)", tier.name, tier.companies.len());
        for company in &tier.companies {
            let scraper = company
                .scraper
                .as_ref()
                .map_or("<none>", |s| s.vendor_name());
            let marker = match &company.scraper {
                Some(s) if !s.is_implemented() => " [not implemented]",
                _ => "",
            };
            let verified = if company.manually_verified { "✓" } else { " " };
            println!(
                "  {verified} {} ({}) -> {scraper}{marker}",
                company.name, company.formatted_name
            );
        }
        println!();
    }

    println!(
        "{} companies, {} verified, {} without a scraper",
        roster.count(),
        roster.count_verified(),
        roster.count_unconfigured()
    );

    Ok(())
}
