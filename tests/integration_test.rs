//! Integration tests for placebook.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use placebook::io::CsvDialect;
use placebook::{
    CsvCodec, Error, FilesystemPort, MemoryPort, PersistencePort, RecordFields, RecordId,
    RecordStore,
};
use tempfile::TempDir;

#[test]
fn test_error_types() {
    let err = Error::InvalidInput("test message".to_string());
    let display = format!("{err}");
    assert!(display.contains("invalid input"));
    assert!(display.contains("test message"));

    let err = Error::OperationFailed {
        operation: "read_import".to_string(),
        cause: "file not found".to_string(),
    };
    let display = format!("{err}");
    assert!(display.contains("read_import"));
    assert!(display.contains("file not found"));

    let err = Error::NotFound("abc".to_string());
    assert!(format!("{err}").contains("abc"));
}

#[test]
fn test_record_lifecycle_scenario() {
    let mut store = RecordStore::load(MemoryPort::new());
    assert!(store.is_empty());

    let alice = store
        .create(RecordFields::new("Alice", "https://maps.example/a").with_mobile("555-0100"))
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0], alice);

    let updated = store
        .update(
            &alice.id,
            RecordFields::new("Alice B.", "https://maps.example/a").with_mobile("555-0100"),
        )
        .unwrap();
    assert_eq!(updated.name, "Alice B.");
    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.created_at, alice.created_at);
    assert_eq!(store.len(), 1);

    assert!(store.delete(&alice.id).unwrap());
    assert!(store.is_empty());
    assert!(store.export_csv().unwrap().is_none());
}

#[test]
fn test_validation_leaves_store_unchanged() {
    let mut store = RecordStore::load(MemoryPort::new());
    let kept = store.create(RecordFields::new("Kept", "Here")).unwrap();

    let err = store.create(RecordFields::new("  ", "Somewhere")).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = store
        .update(&kept.id, RecordFields::new("Kept", ""))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = store
        .update(&RecordId::new("missing"), RecordFields::new("A", "B"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    assert_eq!(store.list(), [kept]);
}

#[test]
fn test_delete_unknown_is_noop() {
    let mut store = RecordStore::load(MemoryPort::new());
    store.create(RecordFields::new("A", "B")).unwrap();

    assert!(!store.delete(&RecordId::new("nope")).unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_filesystem_store_survives_reload() {
    let dir = TempDir::new().unwrap();

    let created = {
        let mut store = RecordStore::load(FilesystemPort::with_create(dir.path()).unwrap());
        store.create(RecordFields::new("Alice", "Home")).unwrap();
        store.create(RecordFields::new("Bob", "Work")).unwrap();
        store.list().to_vec()
    };

    let reloaded = RecordStore::load(FilesystemPort::new(dir.path()));
    assert_eq!(reloaded.list(), created.as_slice());
}

#[test]
fn test_corrupted_blob_loads_empty() {
    let dir = TempDir::new().unwrap();
    let mut port = FilesystemPort::with_create(dir.path()).unwrap();
    port.set(placebook::services::RECORDS_KEY, "{not json").unwrap();

    let mut store = RecordStore::load(port);
    assert!(store.is_empty());

    store.create(RecordFields::new("Fresh", "Start")).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_import_discards_invalid_rows() {
    let text = "Name,Location,Mobile,Email,Address,Description\n\
                \"A\",\"B\",\"\",\"\",\"\",\"\"\n\
                \"A\",\"\",\"\",\"\",\"\",\"\"";

    let mut store = RecordStore::load(MemoryPort::new());
    assert_eq!(store.import_csv(text).unwrap(), 1);
    assert_eq!(store.list()[0].name, "A");
    assert_eq!(store.list()[0].location, "B");
}

#[test]
fn test_export_import_between_stores() {
    let mut source = RecordStore::load(MemoryPort::new());
    let original = source
        .create(RecordFields::new("Alice", "Home").with_image_uri("file:///a.jpg"))
        .unwrap();
    source.create(RecordFields::new("Bob", "Work")).unwrap();

    let csv = source.export_csv().unwrap().unwrap();
    let mut target = RecordStore::load(MemoryPort::new());
    assert_eq!(target.import_csv(&csv).unwrap(), 2);

    let imported = &target.list()[0];
    assert_eq!(imported.name, "Alice");
    assert_ne!(imported.id, original.id);
    assert!(imported.image_uri.is_empty());
}

#[test]
fn test_standard_dialect_keeps_quotes_and_commas() {
    let codec = CsvCodec::new(CsvDialect::Standard);
    let mut store = RecordStore::load_with_codec(MemoryPort::new(), codec);
    store
        .create(
            RecordFields::new("The \"Corner\" Cafe", "12 High St, Town")
                .with_description("line one\nline two"),
        )
        .unwrap();

    let csv = store.export_csv().unwrap().unwrap();
    let mut target = RecordStore::load_with_codec(MemoryPort::new(), codec);
    target.import_csv(&csv).unwrap();

    let record = &target.list()[0];
    assert_eq!(record.name, "The \"Corner\" Cafe");
    assert_eq!(record.location, "12 High St, Town");
    assert_eq!(record.description, "line one\nline two");
}
