use std::path::{Path, PathBuf};

use bbcat_core::{AppConfig, Environment};

use super::*;

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        catalog_path: PathBuf::from("./data/catalog.json"),
        rules_path: PathBuf::from("./data/fitment_rules.json"),
        fitment_config_path: None,
        backup_catalog: true,
    }
}

#[test]
fn parses_fitment_build_command() {
    let cli = Cli::try_parse_from(["bbcat", "fitment", "build"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Fitment {
            command: FitmentCommands::Build { dry_run: false }
        }
    ));
}

#[test]
fn parses_fitment_build_dry_run() {
    let cli = Cli::try_parse_from(["bbcat", "fitment", "build", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Fitment {
            command: FitmentCommands::Build { dry_run: true }
        }
    ));
}

#[test]
fn parses_fitment_show_with_sku() {
    let cli = Cli::try_parse_from([
        "bbcat",
        "fitment",
        "show",
        "--sku",
        "GBCylAmb9MtlRollBlkDot",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Fitment {
            command: FitmentCommands::Show { ref sku }
        } if sku == "GBCylAmb9MtlRollBlkDot"
    ));
}

#[test]
fn fitment_show_requires_sku() {
    assert!(Cli::try_parse_from(["bbcat", "fitment", "show"]).is_err());
}

#[test]
fn parses_rules_and_classify_commands() {
    let rules = Cli::try_parse_from(["bbcat", "rules"]).unwrap();
    assert!(matches!(rules.command, Commands::Rules));

    let classify = Cli::try_parse_from(["bbcat", "classify"]).unwrap();
    assert!(matches!(classify.command, Commands::Classify));
}

#[test]
fn parses_catalog_normalize_applicators() {
    let cli = Cli::try_parse_from(["bbcat", "catalog", "normalize-applicators", "--dry-run"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Catalog {
            command: CatalogCommands::NormalizeApplicators { dry_run: true }
        }
    ));
}

#[test]
fn parses_config_check() {
    let cli = Cli::try_parse_from(["bbcat", "config", "check"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            command: ConfigCommands::Check
        }
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["bbcat"]).is_err());
}

#[test]
fn global_path_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "bbcat",
        "fitment",
        "build",
        "--catalog",
        "/tmp/catalog.json",
        "--rules",
        "/tmp/rules.yaml",
    ])
    .unwrap();
    assert_eq!(cli.catalog.as_deref(), Some(Path::new("/tmp/catalog.json")));
    assert_eq!(cli.rules.as_deref(), Some(Path::new("/tmp/rules.yaml")));
    assert!(cli.config.is_none());
}

#[test]
fn overrides_replace_only_the_given_paths() {
    let cli = Cli::try_parse_from([
        "bbcat",
        "--config",
        "/etc/bbcat/fitment.yaml",
        "classify",
    ])
    .unwrap();
    let mut config = app_config();
    cli.apply_overrides(&mut config);

    assert_eq!(config.catalog_path, PathBuf::from("./data/catalog.json"));
    assert_eq!(config.rules_path, PathBuf::from("./data/fitment_rules.json"));
    assert_eq!(
        config.fitment_config_path.as_deref(),
        Some(Path::new("/etc/bbcat/fitment.yaml"))
    );
}

#[test]
fn no_flags_leave_config_untouched() {
    let cli = Cli::try_parse_from(["bbcat", "rules"]).unwrap();
    let mut config = app_config();
    cli.apply_overrides(&mut config);
    assert_eq!(config.catalog_path, app_config().catalog_path);
    assert!(config.fitment_config_path.is_none());
    assert!(config.backup_catalog);
}
