//! # Placebook
//!
//! A personal contact and location book.
//!
//! Placebook keeps a flat, ordered list of records (a name, a location
//! reference, optional contact fields and an optional photo reference),
//! persists the whole list through a pluggable key/blob port and exchanges
//! it with the outside world as CSV.
//!
//! ## Features
//!
//! - Strongly exception-safe record lifecycle (create, update, delete)
//! - Pluggable persistence ports (in-memory, filesystem)
//! - CSV export/import in the legacy quote-wrapped dialect or RFC 4180
//! - Device capability ports for location, photos and sharing
//!
//! ## Example
//!
//! ```rust
//! use placebook::{MemoryPort, RecordFields, RecordStore};
//!
//! let mut store = RecordStore::load(MemoryPort::new());
//! let record = store
//!     .create(RecordFields::new("Alice", "https://maps.example/x"))
//!     .unwrap();
//! assert_eq!(store.list().len(), 1);
//! assert!(store.export_csv().unwrap().unwrap().contains("\"Alice\""));
//! store.delete(&record.id).unwrap();
//! assert!(store.is_empty());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod device;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::PlacebookConfig;
pub use io::{CsvCodec, CsvDialect};
pub use models::{Record, RecordFields, RecordId};
pub use services::RecordStore;
pub use storage::{FilesystemPort, MemoryPort, PersistencePort};

/// Error type for placebook operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | `name` or `location` is blank on create/update |
/// | `NotFound` | Update references an id that is not in the store |
/// | `Persistence` | The persistence port fails to read or write |
/// | `InvalidInput` | Unknown config values, malformed CLI arguments |
/// | `OperationFailed` | Host-side I/O (config, export and import files) |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required record field is missing.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists with the given id.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The persistence port failed.
    ///
    /// Raised when:
    /// - The backing file cannot be written or renamed
    /// - The collection cannot be serialized
    /// - A key is rejected by the port
    #[error("persistence '{operation}' failed: {cause}")]
    Persistence {
        /// The storage operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A host-side operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for placebook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current UTC time as an RFC 3339 string.
///
/// Used for `createdAt` stamps and export file names.
#[must_use]
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
