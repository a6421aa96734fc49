//! Filesystem-based persistence port.
//!
//! Stores each key as a JSON text file (`<key>.json`) under a base
//! directory.
//!
//! # Security
//!
//! - **Path traversal**: keys are validated so they cannot escape the base directory
//! - **File size limits**: oversized files are refused on read
//!
//! # Atomicity
//!
//! Writes go to a sibling `<key>.json.tmp` file which is then renamed over
//! the target, so readers see either the old or the new blob.

use crate::storage::traits::PersistencePort;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum blob file size (16MB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Filesystem-based persistence port.
#[derive(Debug, Clone)]
pub struct FilesystemPort {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FilesystemPort {
    /// Creates a new filesystem port.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a new filesystem port with checked directory creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).map_err(|e| Error::Persistence {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self { base_path })
    }

    /// Returns the path of the file holding `key`.
    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_safe_key(key) {
            return Err(Error::Persistence {
                operation: "resolve_key".to_string(),
                cause: format!("key contains invalid characters: {key}"),
            });
        }

        Ok(self.base_path.join(format!("{key}.json")))
    }

    /// Checks that a key is usable as a file stem.
    fn is_safe_key(key: &str) -> bool {
        // Only alphanumeric, dash, underscore
        !key.is_empty()
            && key.len() <= 255
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl PersistencePort for FilesystemPort {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::Persistence {
            operation: "read_file_metadata".to_string(),
            cause: e.to_string(),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::Persistence {
                operation: "read_blob".to_string(),
                cause: format!(
                    "file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                    path.display()
                ),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| Error::Persistence {
            operation: "read_blob".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;

        fs::create_dir_all(&self.base_path).map_err(|e| Error::Persistence {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(|e| Error::Persistence {
            operation: "write_blob".to_string(),
            cause: e.to_string(),
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::Persistence {
                operation: "commit_blob".to_string(),
                cause: e.to_string(),
            }
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Wrote blob");
        Ok(())
    }
}
