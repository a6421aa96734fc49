//! Device capability ports.
//!
//! The store never talks to hardware. Hosts implement these traits (GPS,
//! camera, share sheet) and use the helpers here to fill `location` and
//! `image_uri` before calling [`crate::RecordStore::create`] or
//! [`crate::RecordStore::update`].
//!
//! The crate ships simple implementations used by the CLI host:
//! [`FixedLocation`], [`FilePhotoSource`] and [`PrintShare`].

use crate::models::RecordFields;
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, checking both values are in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if latitude is outside `-90..=90` or
    /// longitude outside `-180..=180`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidInput(format!(
                "latitude out of range: {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidInput(format!(
                "longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns a maps search URL pointing at this position.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Source of the device's current position.
pub trait LocationSource {
    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is unavailable or permission was denied.
    fn current_position(&self) -> Result<Coordinates>;

    /// Returns a location reference suitable for [`RecordFields::location`].
    ///
    /// # Errors
    ///
    /// Returns an error if the position is unavailable.
    fn location_reference(&self) -> Result<String> {
        Ok(self.current_position()?.maps_url())
    }
}

/// Source of photos (camera, gallery).
pub trait PhotoSource {
    /// Captures or picks a photo and returns an opaque reference to it.
    ///
    /// Returns `Ok(None)` when the user cancels.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture fails.
    fn capture(&self) -> Result<Option<String>>;
}

/// Share sheet or equivalent.
pub trait ShareTarget {
    /// Offers the file at `path` to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if sharing is unavailable.
    fn share(&self, path: &Path, mime_type: &str) -> Result<()>;
}

/// Sets `fields.location` from the source's current position.
///
/// # Errors
///
/// Propagates the source's error; `fields` is consumed either way.
pub fn fill_location(fields: RecordFields, source: &dyn LocationSource) -> Result<RecordFields> {
    let location = source.location_reference()?;
    tracing::debug!(%location, "Filled location from device");
    Ok(RecordFields { location, ..fields })
}

/// Sets `fields.image_uri` from a photo capture.
///
/// A cancelled capture keeps the existing image reference.
///
/// # Errors
///
/// Propagates the source's error.
pub fn attach_photo(fields: RecordFields, source: &dyn PhotoSource) -> Result<RecordFields> {
    match source.capture()? {
        Some(image_uri) => Ok(RecordFields { image_uri, ..fields }),
        None => Ok(fields),
    }
}

/// Location source that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationSource for FixedLocation {
    fn current_position(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Photo source backed by an existing image file.
#[derive(Debug, Clone)]
pub struct FilePhotoSource {
    path: PathBuf,
}

impl FilePhotoSource {
    /// Creates a source for the image at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhotoSource for FilePhotoSource {
    fn capture(&self) -> Result<Option<String>> {
        let absolute = self.path.canonicalize().map_err(|e| Error::OperationFailed {
            operation: "resolve_photo".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;

        if !absolute.is_file() {
            return Err(Error::InvalidInput(format!(
                "photo is not a file: {}",
                absolute.display()
            )));
        }

        Ok(Some(format!("file://{}", absolute.display())))
    }
}

/// Share target that reports the file on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintShare;

impl ShareTarget for PrintShare {
    #[allow(clippy::print_stdout)]
    fn share(&self, path: &Path, mime_type: &str) -> Result<()> {
        println!("Ready to share ({mime_type}): {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct DeniedLocation;

    impl LocationSource for DeniedLocation {
        fn current_position(&self) -> Result<Coordinates> {
            Err(Error::OperationFailed {
                operation: "locate".to_string(),
                cause: "permission denied".to_string(),
            })
        }
    }

    struct CancelledCamera;

    impl PhotoSource for CancelledCamera {
        fn capture(&self) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_coordinates_range_checks() {
        assert!(Coordinates::new(51.5, -0.12).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.1).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_maps_url() {
        let coords = Coordinates::new(51.5, -0.125).unwrap();
        assert_eq!(
            coords.maps_url(),
            "https://www.google.com/maps/search/?api=1&query=51.5,-0.125"
        );
        assert_eq!(coords.to_string(), "51.5,-0.125");
    }

    #[test]
    fn test_fill_location() {
        let source = FixedLocation(Coordinates::new(1.0, 2.0).unwrap());
        let fields = fill_location(RecordFields::new("Alice", ""), &source).unwrap();
        assert_eq!(
            fields.location,
            "https://www.google.com/maps/search/?api=1&query=1,2"
        );
        assert_eq!(fields.name, "Alice");
    }

    #[test]
    fn test_fill_location_propagates_denial() {
        let result = fill_location(RecordFields::new("Alice", ""), &DeniedLocation);
        assert!(result.is_err());
    }

    #[test]
    fn test_attach_photo_cancel_keeps_existing() {
        let fields = RecordFields::new("A", "B").with_image_uri("old");
        let fields = attach_photo(fields, &CancelledCamera).unwrap();
        assert_eq!(fields.image_uri, "old");
    }

    #[test]
    fn test_file_photo_source() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("me.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        let fields = attach_photo(RecordFields::new("A", "B"), &FilePhotoSource::new(&photo)).unwrap();
        assert!(fields.image_uri.starts_with("file://"));
        assert!(fields.image_uri.ends_with("me.jpg"));
    }

    #[test]
    fn test_file_photo_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FilePhotoSource::new(dir.path().join("missing.jpg"));
        assert!(source.capture().is_err());
    }

    #[test]
    fn test_file_photo_source_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let source = FilePhotoSource::new(dir.path());
        assert!(source.capture().is_err());
    }
}
