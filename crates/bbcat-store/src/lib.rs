//! File-backed Catalog Store: the JSON record set every batch pass reads and
//! rewrites, plus the rules workbook it is reconciled against.

pub mod catalog;
pub mod error;
pub mod workbook;

pub use catalog::{backup_path, load_catalog, render_catalog, save_catalog};
pub use error::StoreError;
pub use workbook::load_rules_workbook;
