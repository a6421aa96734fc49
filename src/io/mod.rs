//! CSV import/export.
//!
//! # Architecture
//!
//! - **Dialects** ([`formats`]) turn records into CSV text and back
//! - **Validation** ([`validation`]) decides which parsed rows are kept
//! - **Codec** ([`CsvCodec`]) picks a dialect at runtime
//!
//! The codec is pure: it never touches storage. [`crate::RecordStore`] calls
//! it for `export_csv` and `import_csv`.
//!
//! # Format
//!
//! ```text
//! Name,Location,Mobile,Email,Address,Description
//! "Alice","https://maps.example/x","555-0100","","",""
//! ```
//!
//! `id`, `createdAt` and `imageUri` are not carried through CSV.

pub mod codec;
pub mod formats;
pub mod validation;

pub use codec::{CsvCodec, parse, serialize};
pub use formats::{CsvDialect, HEADER};
pub use validation::{ValidationIssue, validate};
