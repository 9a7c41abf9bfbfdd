//! Reading and rewriting the JSON catalog file.
//!
//! A rewrite never leaves a half-written catalog behind: the new content is
//! written to a temp file beside the target, synced, then renamed over it.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use bbcat_core::{Catalog, ProductRecord};

use crate::error::StoreError;

/// Load every record of a JSON-array catalog.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be opened and
/// [`StoreError::Parse`] if it is not a JSON array of product records.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let records: Vec<ProductRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    let catalog = Catalog::from_records(records);
    if !catalog.duplicate_skus().is_empty() {
        tracing::warn!(
            path = %path.display(),
            duplicates = catalog.duplicate_skus().len(),
            first = %catalog.duplicate_skus()[0],
            "catalog contains repeated website SKUs; lookups use the first occurrence"
        );
    }
    tracing::debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Serialize the catalog the way it is stored on disk: a pretty-printed
/// JSON array with a trailing newline.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if a record cannot be serialized.
pub fn render_catalog(catalog: &Catalog) -> Result<Vec<u8>, StoreError> {
    let mut bytes = serde_json::to_vec_pretty(catalog.records())?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Replace the catalog at `path` with `catalog`.
///
/// With `backup`, an existing file is first copied to `<file>.bak`.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization, the backup copy, the temp-file
/// write, or the final rename fails. The original file is untouched in
/// every failure case.
pub fn save_catalog(path: &Path, catalog: &Catalog, backup: bool) -> Result<(), StoreError> {
    let bytes = render_catalog(catalog)?;

    if backup && path.exists() {
        let backup_path = backup_path(path);
        std::fs::copy(path, &backup_path).map_err(|e| StoreError::io(&backup_path, e))?;
        tracing::debug!(backup = %backup_path.display(), "previous catalog backed up");
    }

    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), records = catalog.len(), "catalog written");
    Ok(())
}

/// `<dir>/<file>.bak` for `<dir>/<file>`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "catalog.json".into());
    name.push(".bak");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| StoreError::io(&parent, e))?;

    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("catalog"),
        std::process::id()
    ));

    let written = File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp, path));

    if let Err(e) = written {
        std::fs::remove_file(&tmp).ok();
        return Err(StoreError::io(path, e));
    }

    if let Ok(dir) = File::open(&parent) {
        dir.sync_all().ok();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/data/catalog.json")),
            PathBuf::from("/data/catalog.json.bak")
        );
    }

    #[test]
    fn render_catalog_ends_with_newline() {
        let catalog = Catalog::from_records(vec![ProductRecord::new("GB1", "Glass Bottle")]);
        let bytes = render_catalog(&catalog).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        assert!(bytes.starts_with(b"[\n  {"));
    }
}
