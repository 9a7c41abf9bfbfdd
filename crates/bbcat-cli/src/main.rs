mod catalog;
mod classify;
mod config;
mod fitment;
mod inputs;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogCommands;
use crate::config::ConfigCommands;
use crate::fitment::FitmentCommands;

#[derive(Debug, Parser)]
#[command(name = "bbcat")]
#[command(about = "Bottle catalog fitment tooling")]
struct Cli {
    /// JSON catalog to read and rewrite (overrides `BBCAT_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Fitment-rules workbook export (overrides `BBCAT_RULES_PATH`)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Fitment config YAML (overrides `BBCAT_FITMENT_CONFIG_PATH`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Applies per-invocation path flags on top of the env config.
    fn apply_overrides(&self, config: &mut bbcat_core::AppConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path.clone_from(path);
        }
        if let Some(path) = &self.rules {
            config.rules_path.clone_from(path);
        }
        if let Some(path) = &self.config {
            config.fitment_config_path = Some(path.clone());
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build or inspect the fitment matrix
    Fitment {
        #[command(subcommand)]
        command: FitmentCommands,
    },
    /// List the rules extracted from the rules workbook
    Rules,
    /// Classify the component inventory and print per-category counts
    Classify,
    /// Catalog maintenance passes
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Inspect the fitment configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = bbcat_core::load_app_config()?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        env = %config.env,
        catalog = %config.catalog_path.display(),
        rules = %config.rules_path.display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Fitment { command } => match command {
            FitmentCommands::Build { dry_run } => fitment::run_fitment_build(&config, dry_run),
            FitmentCommands::Show { sku } => fitment::run_fitment_show(&config, &sku),
        },
        Commands::Rules => rules::run_rules(&config),
        Commands::Classify => classify::run_classify(&config),
        Commands::Catalog { command } => match command {
            CatalogCommands::NormalizeApplicators { dry_run } => {
                catalog::run_normalize_applicators(&config, dry_run)
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Check => config::run_config_check(&config),
        },
    }
}

#[cfg(test)]
mod tests;
