//! Loading the three pass inputs with file-level context on failure.
//!
//! Every handler loads everything it needs through these before computing
//! anything, so a bad file aborts the run before the catalog is touched.

use anyhow::Context;
use bbcat_core::{AppConfig, Catalog, FitmentConfig};
use bbcat_fitment::{extract_rules, RuleExtraction};

pub(crate) fn load_fitment_config(config: &AppConfig) -> anyhow::Result<FitmentConfig> {
    let fitment = bbcat_core::resolve_fitment_config(config).with_context(|| {
        match &config.fitment_config_path {
            Some(path) => format!("failed to load fitment config {}", path.display()),
            None => "built-in fitment config is invalid".to_string(),
        }
    })?;
    Ok(fitment)
}

pub(crate) fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    bbcat_store::load_catalog(&config.catalog_path)
        .with_context(|| format!("failed to load catalog {}", config.catalog_path.display()))
}

/// Loads the rules workbook and extracts its rules.
pub(crate) fn load_rules(
    config: &AppConfig,
    fitment: &FitmentConfig,
) -> anyhow::Result<RuleExtraction> {
    let workbook = bbcat_store::load_rules_workbook(&config.rules_path).with_context(|| {
        format!(
            "failed to load rules workbook {}",
            config.rules_path.display()
        )
    })?;
    Ok(extract_rules(&workbook, fitment))
}

/// Rewrites the catalog file, honoring the configured backup setting.
pub(crate) fn save_catalog(config: &AppConfig, catalog: &Catalog) -> anyhow::Result<()> {
    bbcat_store::save_catalog(&config.catalog_path, catalog, config.backup_catalog)
        .with_context(|| format!("failed to write catalog {}", config.catalog_path.display()))
}
