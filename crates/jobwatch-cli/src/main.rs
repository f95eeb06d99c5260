//! `jobwatch` binary: production runs, manual-test runs and roster inspection.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobwatch_core::AppConfig;
use jobwatch_roster::{Roster, RosterLoader};
use jobwatch_scanner::{Orchestrator, RunMode};
use jobwatch_store::StoreLayout;
use report::ConsoleReporter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "jobwatch")]
#[command(version)]
#[command(about = "Scrape company job boards for new matching openings")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape verified companies, filter, and save new jobs
    Run,

    /// Scrape unverified companies with no filter and no file output
    ManualTest,

    /// Show the loaded roster
    Roster,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_with_env(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.general.log_level);

    let result = match cli.command {
        Command::Run => scrape(config, RunMode::Production).await,
        Command::ManualTest => scrape(config, RunMode::ManualTest).await,
        Command::Roster => show_roster(&config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "run aborted");
            eprintln!("\nUnexpected error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_roster(config: &AppConfig) -> Result<Roster> {
    let loader = match &config.paths.roster_dir {
        Some(dir) => RosterLoader::new(dir),
        None => RosterLoader::with_default_dir(),
    }
    .context("failed to locate roster directory")?;
    Roster::load_from(&loader).context("failed to load roster")
}

async fn scrape(config: AppConfig, mode: RunMode) -> Result<ExitCode> {
    let started = Instant::now();
    let out: Box<dyn Write> = if config.output.console {
        Box::new(std::io::stdout())
    } else {
        Box::new(std::io::sink())
    };
    let mut reporter = ConsoleReporter::new(out, mode);
    reporter.banner(
        &config.filters.include_keywords,
        &config.filters.exclude_keywords,
    );

    info!(version = env!("CARGO_PKG_VERSION"), ?mode, "starting jobwatch");
    let roster = load_roster(&config)?;
    let store = StoreLayout::new(config.data_dir().context("failed to resolve data directory")?);
    let orchestrator = Orchestrator::new(config, roster, store)?;

    let outcome = tokio::select! {
        report = orchestrator.run(mode, &mut reporter) => Some(report),
        _ = tokio::signal::ctrl_c() => None,
    };
    let Some(report) = outcome else {
        reporter.interrupted();
        return Ok(ExitCode::FAILURE);
    };

    reporter.finished(&report?, started.elapsed());
    Ok(ExitCode::SUCCESS)
}

fn show_roster(config: &AppConfig) -> Result<ExitCode> {
    let roster = load_roster(config)?;
    for tier in roster.tiers() {
        println!(
            "{}: {} companies ({} verified, {} unverified)",
            tier.name,
            tier.companies.len(),
            tier.verified().count(),
            tier.unverified().count()
        );
        for company in &tier.companies {
            let platform = company
                .scraper
                .as_ref()
                .map_or("unconfigured", |s| s.vendor_name());
            let mark = if company.manually_verified { "x" } else { " " };
            println!("  [{mark}] {} ({platform})", company.name);
        }
    }
    println!(
        "\nTotal: {} companies, {} verified, {} without a scraper",
        roster.count(),
        roster.count_verified(),
        roster.count_unconfigured()
    );
    Ok(ExitCode::SUCCESS)
}
