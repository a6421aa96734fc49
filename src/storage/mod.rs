//! Storage layer abstraction.
//!
//! Records are persisted as one text blob under a fixed key through a
//! [`PersistencePort`]. Two ports ship with the crate:
//! - **Memory**: an in-process map, for embedding hosts and tests
//! - **Filesystem**: one JSON file per key under a data directory

pub mod persistence;
pub mod traits;

pub use persistence::{FilesystemPort, MemoryPort};
pub use traits::PersistencePort;
