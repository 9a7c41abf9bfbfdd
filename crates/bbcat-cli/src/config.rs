//! `config` command handlers.

use bbcat_core::AppConfig;
use clap::Subcommand;

use crate::inputs;

/// Sub-commands available under `config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Load and validate the fitment config, then print its table sizes
    Check,
}

/// Validate the fitment config the current settings resolve to.
///
/// # Errors
///
/// Returns an error if the config cannot be read, parsed, or validated.
pub(crate) fn run_config_check(config: &AppConfig) -> anyhow::Result<()> {
    let fitment = inputs::load_fitment_config(config)?;

    let source = config
        .fitment_config_path
        .as_ref()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
    println!("fitment config: {source} (ok)");
    println!("environment: {}", config.env);
    println!();
    println!("{:<28}{}", "header synonyms", fitment.header_synonyms.len());
    println!("{:<28}{}", "thread defaults", fitment.thread_defaults.len());
    println!("{:<28}{}", "bottle categories", fitment.bottle_categories.len());
    println!("{:<28}{}", "applicator aliases", fitment.applicator_aliases.len());
    println!(
        "{:<28}{} (thread {})",
        "verified roll-on caps",
        fitment.roll_on_cap_exception.verified_skus.len(),
        fitment.roll_on_cap_exception.thread
    );
    println!("{:<28}{}", "bottle category", fitment.bottle_category);

    Ok(())
}
