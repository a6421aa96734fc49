//! Business logic services.
//!
//! [`RecordStore`] owns the record lifecycle and delegates CSV work to
//! [`crate::io::CsvCodec`].

mod record_store;

pub use record_store::{RECORDS_KEY, RecordStore};
