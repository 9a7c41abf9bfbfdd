//! `fitment` command handlers: rebuilding the matrix and inspecting one
//! bottle's result.

use bbcat_core::{AppConfig, FitmentStatus, ProductRecord};
use bbcat_fitment::{build_matrix, MatrixSummary};
use clap::Subcommand;

use crate::inputs;

/// Sub-commands available under `fitment`.
#[derive(Debug, Subcommand)]
pub enum FitmentCommands {
    /// Rebuild components / fitmentStatus / catalogGaps for every bottle
    Build {
        /// Compute and print the summary without rewriting the catalog
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the fitment currently recorded for one bottle
    Show {
        /// Website SKU of the bottle
        #[arg(long)]
        sku: String,
    },
}

/// Rebuild the fitment matrix and rewrite the catalog.
///
/// The rules workbook, fitment config, and catalog are all loaded before
/// anything is computed; the catalog is written once, after the whole
/// matrix is built.
///
/// # Errors
///
/// Returns an error if any input cannot be loaded or the catalog cannot be
/// written. Per-bottle problems are statuses, not errors.
pub(crate) fn run_fitment_build(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;
    let extraction = inputs::load_rules(config, &fitment)?;
    let catalog = inputs::load_catalog(config)?;

    let (built, summary) = build_matrix(&catalog, &extraction.rules, &fitment);
    print_summary(&summary);

    if dry_run {
        println!(
            "dry-run: would rewrite {} with fitment for {} bottles",
            config.catalog_path.display(),
            summary.bottles
        );
        return Ok(());
    }

    inputs::save_catalog(config, &built)?;
    println!(
        "wrote fitment for {} bottles to {}",
        summary.bottles,
        config.catalog_path.display()
    );
    Ok(())
}

/// Print the fitment recorded on one bottle of the current catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the SKU is not a
/// bottle in it.
pub(crate) fn run_fitment_show(config: &AppConfig, sku: &str) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;
    let catalog = inputs::load_catalog(config)?;

    let record = catalog
        .get(sku)
        .ok_or_else(|| anyhow::anyhow!("sku '{sku}' not found in catalog"))?;
    if record.category() != fitment.bottle_category {
        anyhow::bail!(
            "sku '{sku}' is a '{}' record, not a '{}'",
            record.category(),
            fitment.bottle_category
        );
    }

    print_bottle(record);
    Ok(())
}

fn print_bottle(record: &ProductRecord) {
    println!(
        "Bottle: {} \u{2014} {}",
        record.website_sku(),
        record.item_name().unwrap_or("\u{2014}")
    );
    println!("Thread: {}", record.thread().unwrap_or("\u{2014}"));

    let Some(fields) = record.fitment() else {
        println!("no fitment recorded; run `fitment build` first");
        return;
    };
    println!("Status: {}", fields.fitment_status);

    if let Some(components) = &fields.components {
        println!();
        println!("{:<24}{:<32}PRICE", "CATEGORY", "SKU");
        for (category, summaries) in components.iter() {
            for component in summaries {
                let price = &component.web_price_1pc;
                let price = match price.as_f64() {
                    Some(p) => format!("{p:.2}"),
                    None => price.as_str().unwrap_or("\u{2014}").to_string(),
                };
                println!(
                    "{:<24}{:<32}{}",
                    category.label(),
                    component.website_sku,
                    price
                );
            }
        }
    }

    if !fields.catalog_gaps.is_empty() {
        let gaps: Vec<&str> = fields.catalog_gaps.iter().map(|c| c.label()).collect();
        println!();
        println!("Gaps: {}", gaps.join(", "));
    }
}

fn print_summary(summary: &MatrixSummary) {
    println!("bottles: {}", summary.bottles);
    println!(
        "rule source: {} by rule code, {} by thread default",
        summary.via_rule_code, summary.via_thread_default
    );

    println!();
    println!("{:<24}BOTTLES", "STATUS");
    for status in FitmentStatus::ALL {
        println!("{:<24}{}", status.as_str(), summary.count(status));
    }

    if !summary.gaps_by_category.is_empty() {
        println!();
        println!("{:<24}BOTTLES", "GAP CATEGORY");
        for (category, count) in &summary.gaps_by_category {
            println!("{:<24}{count}", category.label());
        }
    }

    println!();
    println!("{:<24}COMPONENTS", "CATEGORY");
    for (category, count) in &summary.components_by_category {
        println!("{:<24}{count}", category.label());
    }
}

#[cfg(test)]
#[path = "fitment_test.rs"]
mod tests;
