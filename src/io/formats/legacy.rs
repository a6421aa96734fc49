//! Legacy CSV dialect.
//!
//! Export wraps every field in double quotes and does nothing else: an
//! embedded `"` or line break is written as-is. Import reads each line with
//! a small tokenizer that accepts a quoted value (up to the next quote, no
//! unescaping) or a bare value (up to the next comma).
//!
//! A field containing `"` does not survive a round trip. Use
//! [`super::CsvDialect::Standard`] when that matters.

use super::{FIELD_COUNT, HEADER, columns, fields_from_values};
use crate::io::validation::has_required_values;
use crate::models::{Record, RecordFields};

/// Serializes records to legacy CSV text.
///
/// Returns `None` for an empty slice so callers can skip producing an
/// empty file.
#[must_use]
pub fn serialize(records: &[Record]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(records.iter().map(row));

    Some(lines.join("\n"))
}

fn row(record: &Record) -> String {
    columns(record)
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses legacy CSV text into field sets.
///
/// The first line is always treated as a header and dropped. Blank lines
/// are skipped, and rows with an empty name or location are discarded.
#[must_use]
pub fn parse(text: &str) -> Vec<RecordFields> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = fields_from_values(tokenize(line));
            if has_required_values(&fields) {
                Some(fields)
            } else {
                tracing::debug!(line, "Discarding CSV row without name or location");
                None
            }
        })
        .collect()
}

/// Splits one line into at most [`FIELD_COUNT`] values.
fn tokenize(line: &str) -> Vec<&str> {
    let mut values = Vec::with_capacity(FIELD_COUNT);
    let mut rest = line;

    while values.len() < FIELD_COUNT {
        if let Some(quoted) = rest.trim_start().strip_prefix('"') {
            let (value, after) = quoted.split_once('"').unwrap_or((quoted, ""));
            values.push(value);

            // Anything between the closing quote and the next comma is dropped.
            match after.split_once(',') {
                Some((_, next)) => rest = next,
                None => break,
            }
        } else {
            match rest.split_once(',') {
                Some((value, next)) => {
                    values.push(value);
                    rest = next;
                },
                None => {
                    values.push(rest);
                    break;
                },
            }
        }
    }

    values
}
