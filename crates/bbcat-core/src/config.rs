use crate::app_config::{AppConfig, Environment};
use crate::fitment_config::{load_fitment_config, FitmentConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the process environment only.
///
/// No `.env` file is read; the caller owns environment setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve the fitment lookup tables for a run: the configured YAML file
/// when one is set, otherwise the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or validated.
pub fn resolve_fitment_config(config: &AppConfig) -> Result<FitmentConfig, ConfigError> {
    match &config.fitment_config_path {
        Some(path) => load_fitment_config(path),
        None => FitmentConfig::builtin(),
    }
}

/// Build application configuration from an env-var lookup.
///
/// Tests pass a `HashMap` lookup instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{raw}'"),
            }),
            Err(_) => Ok(default),
        }
    };

    let env = parse_environment(&or_default("BBCAT_ENV", "development"))?;

    let log_level = or_default("BBCAT_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("BBCAT_CATALOG_PATH", "./data/catalog.json"));
    let rules_path = PathBuf::from(or_default(
        "BBCAT_RULES_PATH",
        "./data/fitment_rules.json",
    ));
    let fitment_config_path = lookup("BBCAT_FITMENT_CONFIG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let backup_catalog = parse_bool("BBCAT_BACKUP_CATALOG", true)?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        rules_path,
        fitment_config_path,
        backup_catalog,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BBCAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
