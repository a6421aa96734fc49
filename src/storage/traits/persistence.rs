//! Persistence port trait.

use crate::Result;

/// Key/blob storage supplied by the host.
///
/// The port is a single shared mutable slot per key. [`crate::RecordStore`]
/// is its only writer and always replaces the whole blob.
pub trait PersistencePort {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persistence`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persistence`] if the write does not complete.
    /// A failed write must leave the previous blob readable.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
