use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::{ComponentCategory, HeaderTarget};
use crate::ConfigError;

/// The fitment config shipped with the workspace, used when no override
/// path is configured.
pub const BUILTIN_FITMENT_CONFIG: &str = include_str!("../../../config/fitment.yaml");

/// Every lookup table the fitment passes read. Loaded once per run and
/// passed by reference into the pure functions of `bbcat-fitment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitmentConfig {
    /// Folded (lowercase, trimmed) header text to what it maps to.
    pub header_synonyms: BTreeMap<String, HeaderTarget>,
    pub roll_on_cap_exception: RollOnCapException,
    /// Thread size to the default compatible categories, in gap-reporting
    /// order.
    pub thread_defaults: BTreeMap<String, Vec<ComponentCategory>>,
    #[serde(default)]
    pub bottle_categories: BTreeSet<String>,
    #[serde(default = "default_bottle_category")]
    pub bottle_category: String,
    #[serde(default)]
    pub rule_row_skip_prefixes: Vec<String>,
    #[serde(default)]
    pub applicator_aliases: BTreeMap<String, Option<String>>,
}

fn default_bottle_category() -> String {
    "Glass Bottle".to_string()
}

/// Roll-on outer caps at `thread` are accepted only when their SKU is in
/// `verified_skus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOnCapException {
    pub thread: String,
    #[serde(default)]
    pub verified_skus: BTreeSet<String>,
}

impl RollOnCapException {
    /// Whether a roll-on-cap candidate with this SKU and (trimmed) thread is
    /// a real outer lid.
    #[must_use]
    pub fn admits(&self, sku: &str, thread: &str) -> bool {
        thread != self.thread || self.verified_skus.contains(sku)
    }
}

impl FitmentConfig {
    /// The configuration embedded at build time from `config/fitment.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only if the embedded document is itself invalid.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_fitment_config(BUILTIN_FITMENT_CONFIG)
    }

    /// Looks up what a rules-sheet column header folds to.
    #[must_use]
    pub fn header_target(&self, header: &str) -> Option<HeaderTarget> {
        self.header_synonyms.get(&fold_header(header)).copied()
    }

    #[must_use]
    pub fn thread_default(&self, thread: &str) -> Option<&[ComponentCategory]> {
        self.thread_defaults.get(thread.trim()).map(Vec::as_slice)
    }

    /// Whether records of this category are excluded from the component
    /// inventory.
    #[must_use]
    pub fn is_bottle_category(&self, category: &str) -> bool {
        self.bottle_categories.contains(category)
    }
}

/// Lowercases and trims header text the way synonym keys are stored.
#[must_use]
pub fn fold_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Load and validate the fitment configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fitment_config(path: &Path) -> Result<FitmentConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FitmentConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_fitment_config(&content)
}

/// Parse, fold, and validate a fitment configuration document.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_fitment_config(content: &str) -> Result<FitmentConfig, ConfigError> {
    let raw: FitmentConfig =
        serde_yaml::from_str(content).map_err(ConfigError::FitmentConfigParse)?;

    let config = fold_config(raw)?;
    validate_fitment_config(&config)?;

    Ok(config)
}

fn fold_config(raw: FitmentConfig) -> Result<FitmentConfig, ConfigError> {
    let mut header_synonyms = BTreeMap::new();
    for (header, target) in raw.header_synonyms {
        let folded = fold_header(&header);
        if header_synonyms.insert(folded.clone(), target).is_some() {
            return Err(ConfigError::Validation(format!(
                "duplicate header synonym after folding: '{folded}'"
            )));
        }
    }

    let mut thread_defaults = BTreeMap::new();
    for (thread, categories) in raw.thread_defaults {
        let trimmed = thread.trim().to_string();
        if thread_defaults.insert(trimmed.clone(), categories).is_some() {
            return Err(ConfigError::Validation(format!(
                "duplicate thread default: '{trimmed}'"
            )));
        }
    }

    Ok(FitmentConfig {
        header_synonyms,
        roll_on_cap_exception: RollOnCapException {
            thread: raw.roll_on_cap_exception.thread.trim().to_string(),
            verified_skus: raw.roll_on_cap_exception.verified_skus,
        },
        thread_defaults,
        bottle_categories: raw.bottle_categories,
        bottle_category: raw.bottle_category.trim().to_string(),
        rule_row_skip_prefixes: raw
            .rule_row_skip_prefixes
            .iter()
            .map(|p| p.trim().to_lowercase())
            .collect(),
        applicator_aliases: raw.applicator_aliases,
    })
}

fn validate_fitment_config(config: &FitmentConfig) -> Result<(), ConfigError> {
    if config.header_synonyms.keys().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "header synonym must be non-empty".to_string(),
        ));
    }

    if config.roll_on_cap_exception.thread.is_empty() {
        return Err(ConfigError::Validation(
            "roll_on_cap_exception.thread must be non-empty".to_string(),
        ));
    }

    for (thread, categories) in &config.thread_defaults {
        if thread.is_empty() {
            return Err(ConfigError::Validation(
                "thread default key must be non-empty".to_string(),
            ));
        }
        if categories.is_empty() {
            return Err(ConfigError::Validation(format!(
                "thread default '{thread}' has no categories"
            )));
        }
        let unique: BTreeSet<_> = categories.iter().collect();
        if unique.len() != categories.len() {
            return Err(ConfigError::Validation(format!(
                "thread default '{thread}' lists a category twice"
            )));
        }
    }

    if config.bottle_category.is_empty() {
        return Err(ConfigError::Validation(
            "bottle_category must be non-empty".to_string(),
        ));
    }

    if config.rule_row_skip_prefixes.iter().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "rule_row_skip_prefixes entries must be non-empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "fitment_config_test.rs"]
mod tests;
