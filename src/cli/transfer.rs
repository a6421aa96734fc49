//! CSV transfer commands: export and import.

use super::output_error;
use crate::device::ShareTarget;
use crate::services::RecordStore;
use crate::storage::PersistencePort;
use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// MIME type offered to the share target.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Returns the export file name for a moment in time.
#[must_use]
pub fn export_file_name(at: chrono::DateTime<chrono::Utc>) -> String {
    format!("placebook-{}.csv", at.format("%Y%m%dT%H%M%S%.3fZ"))
}

/// Exports all records to a CSV file in `export_dir` and shares it.
///
/// Returns the written path, or `None` when there is nothing to export.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written, or the
/// share target fails.
pub fn cmd_export<P: PersistencePort>(
    store: &RecordStore<P>,
    export_dir: &Path,
    share: &dyn ShareTarget,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    let Some(csv) = store.export_csv()? else {
        writeln!(out, "Nothing to export.").map_err(output_error)?;
        return Ok(None);
    };

    std::fs::create_dir_all(export_dir).map_err(|e| Error::OperationFailed {
        operation: "create_export_dir".to_string(),
        cause: format!("{}: {e}", export_dir.display()),
    })?;

    let path = export_dir.join(export_file_name(chrono::Utc::now()));
    std::fs::write(&path, csv).map_err(|e| Error::OperationFailed {
        operation: "write_export".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    info!(path = %path.display(), count = store.len(), "Exported records");

    writeln!(out, "Exported {} record(s) to {}", store.len(), path.display())
        .map_err(output_error)?;
    share.share(&path, CSV_MIME_TYPE)?;

    Ok(Some(path))
}

/// Appends the valid rows of a CSV file to the store.
///
/// Returns the number of records added.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the store cannot be
/// written.
pub fn cmd_import<P: PersistencePort>(
    store: &mut RecordStore<P>,
    path: &Path,
    out: &mut dyn Write,
) -> Result<usize> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_import".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    let added = store.import_csv(&text)?;
    info!(path = %path.display(), added, "Imported records");

    writeln!(out, "Imported {added} record(s) from {}", path.display()).map_err(output_error)?;
    Ok(added)
}
