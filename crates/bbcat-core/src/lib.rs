pub mod app_config;
pub mod catalog;
pub mod category;
pub mod config;
pub mod fitment_config;
pub mod products;
pub mod workbook;

pub use app_config::{AppConfig, Environment};
pub use catalog::Catalog;
pub use category::{ComponentCategory, HeaderTarget};
pub use config::{load_app_config, load_app_config_from_env, resolve_fitment_config};
pub use fitment_config::{
    fold_header, load_fitment_config, parse_fitment_config, FitmentConfig, RollOnCapException,
};
pub use products::{ComponentMap, ComponentSummary, FitmentFields, FitmentStatus, ProductRecord};
pub use workbook::{RulesWorkbook, Sheet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown component category: {0}")]
    UnknownCategory(String),

    #[error("unknown header target: {0}")]
    UnknownHeaderTarget(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read fitment config {path}: {source}")]
    FitmentConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fitment config: {0}")]
    FitmentConfigParse(#[from] serde_yaml::Error),

    #[error("fitment config validation failed: {0}")]
    Validation(String),
}
