//! Record store.
//!
//! Owns the ordered record collection and keeps it identical to the copy
//! persisted through a [`PersistencePort`]. Every mutation builds the next
//! collection, writes it in full, and only then replaces the in-memory
//! list, so a failed write leaves the store exactly as it was.

use crate::io::validation::has_required_values;
use crate::io::{CsvCodec, validate};
use crate::models::{Record, RecordFields, RecordId};
use crate::storage::PersistencePort;
use crate::{Error, Result, current_timestamp};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Port key holding the serialized collection.
pub const RECORDS_KEY: &str = "records";

/// The record collection and its persisted copy.
///
/// # Lifecycle
///
/// 1. [`RecordStore::load`] once at startup
/// 2. Any number of `create` / `update` / `delete` / `import_csv` calls
///
/// Mutations take `&mut self`, so calls are serialized by the borrow checker.
#[derive(Debug)]
pub struct RecordStore<P> {
    port: P,
    records: Vec<Record>,
    codec: CsvCodec,
}

impl<P: PersistencePort> RecordStore<P> {
    /// Loads the collection from `port` using the legacy CSV dialect.
    ///
    /// Never fails: absent, unreadable or corrupted data yields an empty
    /// store.
    #[must_use]
    pub fn load(port: P) -> Self {
        Self::load_with_codec(port, CsvCodec::default())
    }

    /// Loads the collection from `port` with an explicit CSV codec.
    #[must_use]
    pub fn load_with_codec(port: P, codec: CsvCodec) -> Self {
        let records = read_collection(&port);
        debug!(count = records.len(), dialect = %codec.dialect(), "Loaded record store");
        Self {
            port,
            records,
            codec,
        }
    }

    /// Returns the current records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record with the given id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the underlying persistence port.
    #[must_use]
    pub const fn port(&self) -> &P {
        &self.port
    }

    /// Returns the CSV codec used for export and import.
    #[must_use]
    pub const fn codec(&self) -> CsvCodec {
        self.codec
    }

    /// Creates a record with a fresh id and creation time.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `name` or `location` is blank
    /// - [`Error::Persistence`] if the write fails; the store is unchanged
    pub fn create(&mut self, fields: RecordFields) -> Result<Record> {
        validate(&fields)?;

        let id = fresh_id(|id| self.get(id).is_some());
        let record = Record::from_fields(id, fields, current_timestamp());

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;

        debug!(id = %record.id, "Created record");
        Ok(record)
    }

    /// Replaces the editable fields of an existing record.
    ///
    /// The record keeps its id, creation time and position.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `name` or `location` is blank
    /// - [`Error::NotFound`] if no record has `id`
    /// - [`Error::Persistence`] if the write fails; the store is unchanged
    pub fn update(&mut self, id: &RecordId, fields: RecordFields) -> Result<Record> {
        validate(&fields)?;

        let index = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let updated = self.records[index].with_fields(fields);
        let mut next = self.records.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        debug!(id = %id, "Updated record");
        Ok(updated)
    }

    /// Removes the record with `id`.
    ///
    /// Returns `Ok(false)` without writing when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the write fails; the store is unchanged.
    pub fn delete(&mut self, id: &RecordId) -> Result<bool> {
        if self.get(id).is_none() {
            debug!(id = %id, "Delete of unknown record ignored");
            return Ok(false);
        }

        let next = self
            .records
            .iter()
            .filter(|r| &r.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        debug!(id = %id, "Deleted record");
        Ok(true)
    }

    /// Serializes the collection to CSV text.
    ///
    /// Returns `Ok(None)` when the store is empty so the host can warn
    /// instead of producing an empty file.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard CSV writer fails.
    pub fn export_csv(&self) -> Result<Option<String>> {
        self.codec.serialize(&self.records)
    }

    /// Appends every valid row of `text` as a new record.
    ///
    /// Imported records get fresh ids, the current time as `created_at`
    /// and no image. Existing records are never merged or deduplicated.
    /// Returns the number of records added; zero means nothing was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the write fails; the store is unchanged.
    pub fn import_csv(&mut self, text: &str) -> Result<usize> {
        let parsed = self.codec.parse(text);
        if parsed.is_empty() {
            info!("CSV import found no valid rows");
            return Ok(0);
        }

        let count = parsed.len();
        let mut next = self.records.clone();
        let mut taken: HashSet<RecordId> = next.iter().map(|r| r.id.clone()).collect();

        for mut fields in parsed {
            fields.image_uri.clear();
            let id = fresh_id(|id| taken.contains(id));
            taken.insert(id.clone());
            next.push(Record::from_fields(id, fields, current_timestamp()));
        }

        self.commit(next)?;

        info!(count, total = self.records.len(), "Imported records from CSV");
        Ok(count)
    }

    /// Persists `next` and makes it the current collection.
    fn commit(&mut self, next: Vec<Record>) -> Result<()> {
        let blob = serde_json::to_string(&next).map_err(|e| Error::Persistence {
            operation: "serialize_records".to_string(),
            cause: e.to_string(),
        })?;

        self.port.set(RECORDS_KEY, &blob).map_err(|e| {
            warn!(error = %e, "Failed to persist records");
            match e {
                Error::Persistence { .. } => e,
                other => Error::Persistence {
                    operation: "write_records".to_string(),
                    cause: other.to_string(),
                },
            }
        })?;

        self.records = next;
        Ok(())
    }
}

/// Reads the persisted collection, degrading to empty on any failure.
fn read_collection<P: PersistencePort>(port: &P) -> Vec<Record> {
    let blob = match port.get(RECORDS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Could not read stored records, starting empty");
            return Vec::new();
        },
    };

    let records: Vec<Record> = match serde_json::from_str(&blob) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Stored records are corrupted, starting empty");
            return Vec::new();
        },
    };

    if let Err(problem) = check_collection(&records) {
        warn!(%problem, "Stored records are inconsistent, starting empty");
        return Vec::new();
    }

    records
}

/// Checks that ids are unique and every record has a name and location.
fn check_collection(records: &[Record]) -> std::result::Result<(), String> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            return Err(format!("duplicate id {}", record.id));
        }
        if !has_required_values(&record.fields()) {
            return Err(format!("record {} has no name or location", record.id));
        }
    }
    Ok(())
}

/// Generates an id for which `is_taken` returns false.
fn fresh_id(is_taken: impl Fn(&RecordId) -> bool) -> RecordId {
    loop {
        let id = RecordId::generate();
        if !is_taken(&id) {
            return id;
        }
    }
}
