//! Data models for placebook.
//!
//! The record is the only entity; everything else in the crate moves
//! records between memory, the persistence port and CSV text.

mod record;

pub use record::{Record, RecordFields, RecordId};
