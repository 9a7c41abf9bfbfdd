//! `rules` command handler.

use bbcat_core::AppConfig;

use crate::inputs;

/// Print every rule extracted from the rules workbook, then the headers
/// that mapped to no category.
///
/// # Errors
///
/// Returns an error if the fitment config or the rules workbook cannot be
/// loaded.
pub(crate) fn run_rules(config: &AppConfig) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;
    let extraction = inputs::load_rules(config, &fitment)?;

    if extraction.rules.is_empty() {
        println!("no rules found in {}", config.rules_path.display());
    } else {
        println!("{:<24}{:<28}CATEGORIES", "SHEET", "KEY");
        for rule in &extraction.rules {
            let categories: Vec<&str> = rule.compatible.iter().map(|c| c.label()).collect();
            let categories = if categories.is_empty() {
                "\u{2014}".to_string()
            } else {
                categories.join(", ")
            };
            println!("{:<24}{:<28}{categories}", rule.sheet_name, rule.key());
        }
    }

    println!();
    println!(
        "{} rules ({} rows skipped, {} keys repeated)",
        extraction.rules.len(),
        extraction.skipped_rows,
        extraction.replaced_rules
    );

    if !extraction.unmapped_headers.is_empty() {
        println!();
        println!("{:<24}{:<8}UNMAPPED HEADER", "SHEET", "COLUMN");
        for header in &extraction.unmapped_headers {
            println!("{:<24}{:<8}{}", header.sheet_name, header.column, header.text);
        }
    }

    Ok(())
}
