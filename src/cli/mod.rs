//! CLI command implementations.
//!
//! The `placebook` binary parses arguments and hands off to the functions
//! here. Commands write their human-facing output to a caller-supplied
//! writer so they can be exercised without a terminal.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add` | Create a record |
//! | `edit` | Replace fields of an existing record |
//! | `remove` | Delete a record |
//! | `list` | List all records |
//! | `show` | Show one record |
//! | `export` | Write all records to a CSV file and share it |
//! | `import` | Append records from a CSV file |
//!
//! # Example Usage
//!
//! ```bash
//! placebook add "Alice" --lat 51.5 --lon -0.12 --mobile 555-0100
//! placebook list --format json
//! placebook export
//! placebook import ~/Downloads/contacts.csv
//! ```

mod records;
mod transfer;

pub use records::{RecordInput, cmd_add, cmd_edit, cmd_list, cmd_remove, cmd_show};
pub use transfer::{CSV_MIME_TYPE, cmd_export, cmd_import, export_file_name};

use crate::config::PlacebookConfig;
use crate::io::CsvCodec;
use crate::models::RecordId;
use crate::services::RecordStore;
use crate::storage::{FilesystemPort, PersistencePort};
use crate::{Error, Result};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default).
    #[default]
    Table,
    /// JSON.
    Json,
}

impl OutputFormat {
    /// Parses output format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Opens the filesystem-backed store described by `config`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_store(config: &PlacebookConfig) -> Result<RecordStore<FilesystemPort>> {
    let port = FilesystemPort::with_create(&config.data_dir)?;
    Ok(RecordStore::load_with_codec(
        port,
        CsvCodec::new(config.csv_dialect),
    ))
}

/// Resolves a full id or a unique id prefix to a stored record id.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if nothing matches and
/// [`Error::InvalidInput`] if the prefix matches more than one record.
pub fn resolve_id<P: PersistencePort>(store: &RecordStore<P>, query: &str) -> Result<RecordId> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("record id is empty".to_string()));
    }

    let exact = RecordId::new(query);
    if store.get(&exact).is_some() {
        return Ok(exact);
    }

    let mut matches = store
        .list()
        .iter()
        .filter(|record| record.id.as_str().starts_with(query));

    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id.clone()),
        (Some(_), Some(_)) => Err(Error::InvalidInput(format!(
            "id prefix '{query}' matches more than one record"
        ))),
        (None, _) => Err(Error::NotFound(query.to_string())),
    }
}

/// Maps a failed write to the output stream.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn output_error(e: std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}
