//! Multi-run lifecycle of the data directory.

use jobwatch_core::JobRecord;
use jobwatch_store::{RunSummary, StoreLayout};
use tempfile::TempDir;

#[test]
fn test_two_runs_accumulate_urls_and_companies() {
    let tmp = TempDir::new().expect("create temp dir");
    let layout = StoreLayout::new(tmp.path().join("data"));

    // First run: nothing known yet.
    let seen = layout.seen_urls().load().expect("load");
    assert!(seen.is_empty());
    let new_companies = layout
        .known_companies()
        .new_names(["Stripe", "Uber"])
        .expect("diff companies");
    assert_eq!(new_companies.len(), 2);

    let mut summary = RunSummary::new();
    summary.record(
        "Stripe",
        vec![JobRecord::new("Backend Engineer", "https://boards.greenhouse.io/stripe/1")],
    );
    layout.seen_urls().save(&summary.urls()).expect("save urls");
    layout
        .known_companies()
        .record(&new_companies)
        .expect("record companies");
    layout
        .result_logs()
        .write_summary(&summary)
        .expect("write summary");

    // Second run sees the first run's state.
    let seen = layout.seen_urls().load().expect("reload");
    assert!(seen.contains("https://boards.greenhouse.io/stripe/1"));
    let new_companies = layout
        .known_companies()
        .new_names(["Stripe", "Uber", "Netflix"])
        .expect("diff companies");
    assert_eq!(new_companies, vec!["Netflix".to_string()]);

    layout
        .seen_urls()
        .save(&["https://boards.greenhouse.io/stripe/2"])
        .expect("save urls");
    let seen = layout.seen_urls().load().expect("reload");
    assert_eq!(seen.len(), 2);
}
