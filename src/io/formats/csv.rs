//! Standard (RFC 4180) CSV dialect.
//!
//! Uses the `csv` crate for quoting, so embedded quotes, commas and line
//! breaks round-trip losslessly. Header and column order match the legacy
//! dialect.

use super::{HEADER, columns, fields_from_values};
use crate::io::validation::has_required_values;
use crate::models::{Record, RecordFields};
use crate::{Error, Result};

/// Serializes records to RFC 4180 CSV text.
///
/// Every data field is quoted. Returns `Ok(None)` for an empty slice.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn serialize(records: &[Record]) -> Result<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false) // Header is written unquoted below
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer
            .write_record(columns(record))
            .map_err(|e| Error::OperationFailed {
                operation: "write_csv".to_string(),
                cause: e.to_string(),
            })?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::OperationFailed {
        operation: "flush_csv".to_string(),
        cause: e.to_string(),
    })?;
    let body = String::from_utf8(bytes).map_err(|e| Error::OperationFailed {
        operation: "encode_csv".to_string(),
        cause: e.to_string(),
    })?;

    let body = body.strip_suffix('\n').unwrap_or(&body);
    Ok(Some(format!("{}\n{body}", HEADER.join(","))))
}

/// Parses RFC 4180 CSV text into field sets.
///
/// The first record is treated as a header. Rows that fail to parse or
/// have an empty name or location are skipped individually.
#[must_use]
pub fn parse(text: &str) -> Vec<RecordFields> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow short and long rows
        .from_reader(text.as_bytes());

    let mut parsed = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!(row = index + 1, error = %e, "Skipping unreadable CSV row");
                continue;
            },
        };

        let fields = fields_from_values(row.iter());
        if has_required_values(&fields) {
            parsed.push(fields);
        } else {
            tracing::debug!(row = index + 1, "Discarding CSV row without name or location");
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn record(fields: RecordFields) -> Record {
        Record::from_fields(RecordId::generate(), fields, "2024-01-01T00:00:00.000Z")
    }

    #[test]
    fn test_serialize_empty() {
        assert!(serialize(&[]).unwrap().is_none());
    }

    #[test]
    fn test_serialize_matches_legacy_for_plain_values() {
        let records = [
            record(RecordFields::new("Alice", "Home").with_email("a@example.com")),
            record(RecordFields::new("Bob", "Work")),
        ];

        let standard = serialize(&records).unwrap().unwrap();
        let legacy = super::super::legacy::serialize(&records).unwrap();
        assert_eq!(standard, legacy);
    }

    #[test]
    fn test_serialize_escapes_quotes() {
        let records = [record(RecordFields::new(r#"Al "the pal""#, "Home"))];
        let csv = serialize(&records).unwrap().unwrap();
        assert!(csv.contains(r#""Al ""the pal""""#));
    }

    #[test]
    fn test_roundtrip_with_special_characters() {
        let records = [
            record(
                RecordFields::new(r#"Al "the pal""#, "Home, sweet home")
                    .with_description("line one\nline two"),
            ),
            record(RecordFields::new("Bob", "Cafe")),
        ];

        let parsed = parse(&serialize(&records).unwrap().unwrap());

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, r#"Al "the pal""#);
        assert_eq!(parsed[0].location, "Home, sweet home");
        assert_eq!(parsed[0].description, "line one\nline two");
        assert_eq!(parsed[1], RecordFields::new("Bob", "Cafe"));
    }

    #[test]
    fn test_parse_short_rows_and_invalid_rows() {
        let text = "Name,Location\nA,B\n\"C\",\"\"\n ,D\nE,F,555";
        let parsed = parse(text);

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], RecordFields::new("A", "B"));
        assert_eq!(parsed[1], RecordFields::new(" ", "D"));
        assert_eq!(parsed[2], RecordFields::new("E", "F").with_mobile("555"));
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse("Name,Location,Mobile,Email,Address,Description").is_empty());
        assert!(parse("").is_empty());
    }
}
