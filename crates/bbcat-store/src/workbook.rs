//! Loading the fitment-rules workbook export.

use std::path::Path;

use bbcat_core::RulesWorkbook;

use crate::error::StoreError;

/// Load a rules workbook exported as JSON or YAML, chosen by extension.
///
/// # Errors
///
/// Returns [`StoreError::UnsupportedFormat`] for other extensions,
/// [`StoreError::Io`] if the file cannot be read, and a parse error if the
/// content does not match the workbook shape.
pub fn load_rules_workbook(path: &Path) -> Result<RulesWorkbook, StoreError> {
    let format = WorkbookFormat::from_path(path).ok_or_else(|| StoreError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let workbook = parse_rules_workbook(&content, format).map_err(|e| match e {
        ParseFailure::Json(source) => StoreError::Parse {
            path: path.display().to_string(),
            source,
        },
        ParseFailure::Yaml(source) => StoreError::YamlParse {
            path: path.display().to_string(),
            source,
        },
    })?;

    tracing::debug!(
        path = %path.display(),
        sheets = workbook.sheets.len(),
        "rules workbook loaded"
    );
    Ok(workbook)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkbookFormat {
    Json,
    Yaml,
}

impl WorkbookFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(WorkbookFormat::Json),
            "yaml" | "yml" => Some(WorkbookFormat::Yaml),
            _ => None,
        }
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

fn parse_rules_workbook(content: &str, format: WorkbookFormat) -> Result<RulesWorkbook, ParseFailure> {
    match format {
        WorkbookFormat::Json => serde_json::from_str(content).map_err(ParseFailure::Json),
        WorkbookFormat::Yaml => serde_yaml::from_str(content).map_err(ParseFailure::Yaml),
    }
}
