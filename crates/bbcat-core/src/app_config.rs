use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// JSON catalog; read and rewritten in place by every pass.
    pub catalog_path: PathBuf,
    /// Fitment-rules workbook export (`.json`, `.yaml`, `.yml`).
    pub rules_path: PathBuf,
    /// YAML lookup tables; `None` means the built-in defaults.
    pub fitment_config_path: Option<PathBuf>,
    /// Copy the previous catalog to `<file>.bak` before a rewrite.
    pub backup_catalog: bool,
}
