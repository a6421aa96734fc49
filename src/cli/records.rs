//! Record lifecycle commands: add, edit, remove, list, show.

use super::{OutputFormat, output_error, resolve_id};
use crate::device::{Coordinates, FilePhotoSource, FixedLocation, attach_photo, fill_location};
use crate::models::{Record, RecordFields};
use crate::services::RecordStore;
use crate::storage::PersistencePort;
use crate::{Error, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Field values supplied on the command line.
///
/// `None` leaves a field untouched on edit and empty on add.
#[derive(Debug, Clone, Default)]
pub struct RecordInput {
    /// Display name.
    pub name: Option<String>,
    /// Location reference given directly.
    pub location: Option<String>,
    /// Coordinates turned into a maps URL. Wins over `location`.
    pub coordinates: Option<Coordinates>,
    /// Mobile number.
    pub mobile: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Image file to attach.
    pub photo: Option<PathBuf>,
}

impl RecordInput {
    /// Overlays the supplied values on `base`, resolving device inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the photo file cannot be resolved.
    pub fn apply(self, base: RecordFields) -> Result<RecordFields> {
        let mut fields = base;

        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(location) = self.location {
            fields.location = location;
        }
        if let Some(mobile) = self.mobile {
            fields.mobile = mobile;
        }
        if let Some(email) = self.email {
            fields.email = email;
        }
        if let Some(address) = self.address {
            fields.address = address;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }

        if let Some(coordinates) = self.coordinates {
            fields = fill_location(fields, &FixedLocation(coordinates))?;
        }
        if let Some(photo) = self.photo {
            fields = attach_photo(fields, &FilePhotoSource::new(photo))?;
        }

        Ok(fields)
    }
}

/// Creates a record from command-line input.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a blank name or location, or a
/// persistence error if the store cannot be written.
pub fn cmd_add<P: PersistencePort>(
    store: &mut RecordStore<P>,
    input: RecordInput,
    out: &mut dyn Write,
) -> Result<Record> {
    let fields = input.apply(RecordFields::default())?;
    let record = store.create(fields)?;
    info!(id = %record.id, "Added record");

    writeln!(out, "Added {} ({})", record.name, record.id).map_err(output_error)?;
    Ok(record)
}

/// Replaces the supplied fields of an existing record.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `id` matches nothing, or the store's
/// validation/persistence errors.
pub fn cmd_edit<P: PersistencePort>(
    store: &mut RecordStore<P>,
    id: &str,
    input: RecordInput,
    out: &mut dyn Write,
) -> Result<Record> {
    let id = resolve_id(store, id)?;
    let current = store
        .get(&id)
        .map(Record::fields)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    let record = store.update(&id, input.apply(current)?)?;
    info!(id = %record.id, "Updated record");

    writeln!(out, "Updated {} ({})", record.name, record.id).map_err(output_error)?;
    Ok(record)
}

/// Removes a record.
///
/// Returns whether a record was removed. An unknown id is reported, not
/// treated as an error.
///
/// # Errors
///
/// Returns an error for an ambiguous id prefix or a persistence failure.
pub fn cmd_remove<P: PersistencePort>(
    store: &mut RecordStore<P>,
    id: &str,
    out: &mut dyn Write,
) -> Result<bool> {
    let id = match resolve_id(store, id) {
        Ok(id) => id,
        Err(Error::NotFound(query)) => {
            writeln!(out, "No record matches {query}").map_err(output_error)?;
            return Ok(false);
        },
        Err(e) => return Err(e),
    };

    let removed = store.delete(&id)?;
    if removed {
        info!(%id, "Removed record");
        writeln!(out, "Removed {id}").map_err(output_error)?;
    }
    Ok(removed)
}

/// Lists all records in insertion order.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn cmd_list<P: PersistencePort>(
    store: &RecordStore<P>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(store.list(), out),
        OutputFormat::Table => {
            if store.is_empty() {
                writeln!(out, "No records.").map_err(output_error)?;
                return Ok(());
            }

            writeln!(out, "{:<36}  {:<24}  LOCATION", "ID", "NAME").map_err(output_error)?;
            for record in store.list() {
                writeln!(
                    out,
                    "{:<36}  {:<24}  {}",
                    record.id,
                    truncate(&record.name, 24),
                    record.location
                )
                .map_err(output_error)?;
            }
            writeln!(out, "\n{} record(s)", store.len()).map_err(output_error)
        },
    }
}

/// Shows one record in full.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `id` matches nothing.
pub fn cmd_show<P: PersistencePort>(
    store: &RecordStore<P>,
    id: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let id = resolve_id(store, id)?;
    let record = store
        .get(&id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    match format {
        OutputFormat::Json => write_json(record, out),
        OutputFormat::Table => {
            let rows = [
                ("ID", record.id.as_str()),
                ("Name", record.name.as_str()),
                ("Location", record.location.as_str()),
                ("Mobile", record.mobile.as_str()),
                ("Email", record.email.as_str()),
                ("Address", record.address.as_str()),
                ("Description", record.description.as_str()),
                ("Image", record.image_uri.as_str()),
                ("Created", record.created_at.as_str()),
            ];
            for (label, value) in rows.iter().filter(|(_, v)| !v.is_empty()) {
                writeln!(out, "{label:<12} {value}").map_err(output_error)?;
            }
            Ok(())
        },
    }
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, out: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: "render_json".to_string(),
        cause: e.to_string(),
    })?;
    writeln!(out, "{json}").map_err(output_error)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPort;
    use tempfile::TempDir;

    fn input(name: &str, location: &str) -> RecordInput {
        RecordInput {
            name: Some(name.to_string()),
            location: Some(location.to_string()),
            ..RecordInput::default()
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let mut store = RecordStore::load(MemoryPort::new());
        let mut buf = Vec::new();

        let record = cmd_add(&mut store, input("Alice", "Home"), &mut buf).unwrap();
        assert!(output(buf).contains(&format!("Added Alice ({})", record.id)));

        let mut buf = Vec::new();
        cmd_list(&store, OutputFormat::Table, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Alice"));
        assert!(text.contains("1 record(s)"));
    }

    #[test]
    fn test_add_with_coordinates() {
        let mut store = RecordStore::load(MemoryPort::new());
        let input = RecordInput {
            name: Some("Cafe".to_string()),
            coordinates: Some(Coordinates::new(10.0, 20.5).unwrap()),
            ..RecordInput::default()
        };

        let record = cmd_add(&mut store, input, &mut Vec::new()).unwrap();
        assert_eq!(
            record.location,
            "https://www.google.com/maps/search/?api=1&query=10,20.5"
        );
    }

    #[test]
    fn test_add_with_photo() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("cafe.png");
        std::fs::write(&photo, b"png").unwrap();

        let mut store = RecordStore::load(MemoryPort::new());
        let input = RecordInput {
            photo: Some(photo),
            ..input("Cafe", "Corner")
        };

        let record = cmd_add(&mut store, input, &mut Vec::new()).unwrap();
        assert!(record.image_uri.ends_with("cafe.png"));
    }

    #[test]
    fn test_add_without_location_fails() {
        let mut store = RecordStore::load(MemoryPort::new());
        let input = RecordInput {
            name: Some("Alice".to_string()),
            ..RecordInput::default()
        };

        let err = cmd_add(&mut store, input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let mut store = RecordStore::load(MemoryPort::new());
        let original = cmd_add(
            &mut store,
            RecordInput {
                mobile: Some("555".to_string()),
                ..input("Alice", "Home")
            },
            &mut Vec::new(),
        )
        .unwrap();

        let edit = RecordInput {
            name: Some("Alice B.".to_string()),
            ..RecordInput::default()
        };
        let updated = cmd_edit(&mut store, &original.id.to_string(), edit, &mut Vec::new()).unwrap();

        assert_eq!(updated.name, "Alice B.");
        assert_eq!(updated.location, "Home");
        assert_eq!(updated.mobile, "555");
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut store = RecordStore::load(MemoryPort::new());
        let err = cmd_edit(&mut store, "missing", RecordInput::default(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_remove() {
        let mut store = RecordStore::load(MemoryPort::new());
        let record = cmd_add(&mut store, input("Alice", "Home"), &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        assert!(cmd_remove(&mut store, record.id.as_str(), &mut buf).unwrap());
        assert!(output(buf).starts_with("Removed"));
        assert!(store.is_empty());

        let mut buf = Vec::new();
        assert!(!cmd_remove(&mut store, record.id.as_str(), &mut buf).unwrap());
        assert!(output(buf).starts_with("No record matches"));
    }

    #[test]
    fn test_list_empty() {
        let store = RecordStore::load(MemoryPort::new());
        let mut buf = Vec::new();
        cmd_list(&store, OutputFormat::Table, &mut buf).unwrap();
        assert_eq!(output(buf), "No records.\n");
    }

    #[test]
    fn test_list_json() {
        let mut store = RecordStore::load(MemoryPort::new());
        cmd_add(&mut store, input("Alice", "Home"), &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        cmd_list(&store, OutputFormat::Json, &mut buf).unwrap();
        let parsed: Vec<Record> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.as_slice(), store.list());
    }

    #[test]
    fn test_show_skips_empty_fields() {
        let mut store = RecordStore::load(MemoryPort::new());
        let record = cmd_add(&mut store, input("Alice", "Home"), &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        cmd_show(&store, record.id.as_str(), OutputFormat::Table, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Name         Alice"));
        assert!(!text.contains("Mobile"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
