//! `catalog` maintenance command handlers.

use std::collections::BTreeMap;

use bbcat_core::AppConfig;
use bbcat_fitment::{normalize_applicators, RollerCounts};
use clap::Subcommand;

use crate::inputs;

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Fold applicator label variants through the configured alias table
    NormalizeApplicators {
        /// Print the report without rewriting the catalog
        #[arg(long)]
        dry_run: bool,
    },
}

/// Normalize applicator labels across the catalog.
///
/// # Errors
///
/// Returns an error if the fitment config or the catalog cannot be loaded,
/// or the catalog cannot be written.
pub(crate) fn run_normalize_applicators(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;
    let catalog = inputs::load_catalog(config)?;

    let (normalized, report) = normalize_applicators(
        &catalog,
        &fitment.applicator_aliases,
        &fitment.bottle_category,
    );

    println!("records: {}", report.records);
    println!("labels changed: {}", report.changed);
    println!("labels cleared: {}", report.cleared);
    print_histogram("BEFORE", &report.before);
    print_histogram("AFTER", &report.after);

    println!();
    println!("{:<24}{:<10}{:<12}TOTAL", "ROLLER", "BUNDLES", "STANDALONE");
    print_rollers("Plastic Roller", report.plastic_rollers);
    print_rollers("Metal Roller", report.metal_rollers);
    if report.missing_standalone_metal_roller() {
        println!();
        println!("flag: no standalone metal roller component; metal rollers ship only as bottle bundles");
    }

    if dry_run {
        println!();
        println!(
            "dry-run: would rewrite {} ({} records touched)",
            config.catalog_path.display(),
            report.touched()
        );
        return Ok(());
    }

    if report.touched() == 0 {
        println!();
        println!("nothing to normalize; catalog left unchanged");
        return Ok(());
    }

    inputs::save_catalog(config, &normalized)?;
    println!();
    println!(
        "wrote {} normalized records to {}",
        report.records,
        config.catalog_path.display()
    );
    Ok(())
}

fn print_rollers(label: &str, counts: RollerCounts) {
    println!(
        "{label:<24}{:<10}{:<12}{}",
        counts.bundles,
        counts.standalone,
        counts.total()
    );
}

/// Labels sorted by descending count, ties by label.
fn print_histogram(title: &str, histogram: &BTreeMap<String, usize>) {
    let mut rows: Vec<(&String, &usize)> = histogram.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("{title:<36}RECORDS");
    for (label, count) in rows {
        println!("{label:<36}{count}");
    }
}
