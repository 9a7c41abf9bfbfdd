//! `classify` command handler.

use bbcat_core::AppConfig;
use bbcat_fitment::classify_inventory;

use crate::inputs;

/// Classify every component record of the catalog and print the census.
///
/// # Errors
///
/// Returns an error if the fitment config or the catalog cannot be loaded.
pub(crate) fn run_classify(config: &AppConfig) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;
    let catalog = inputs::load_catalog(config)?;

    let census = classify_inventory(&catalog, &fitment);

    println!("{:<24}RECORDS", "CATEGORY");
    for (category, count) in &census.by_category {
        println!("{:<24}{count}", category.label());
    }
    println!("{:<24}{}", "(unclassified)", census.unclassified);
    println!();
    println!("{} component records", census.components);

    if !census.unverified_roll_on_caps.is_empty() {
        println!();
        println!(
            "{} roll-on caps at {} rejected (SKU not verified):",
            census.unverified_roll_on_caps.len(),
            fitment.roll_on_cap_exception.thread
        );
        for sku in &census.unverified_roll_on_caps {
            println!("  {sku}");
        }
    }

    Ok(())
}
