//! CSV dialects for import/export.
//!
//! Both dialects share the header, column order and row validity rule.
//! They differ only in how field values are quoted.

pub mod csv;
pub mod legacy;

use crate::models::{Record, RecordFields};
use crate::{Error, Result};
use std::str::FromStr;

/// Header row written on export. Ignored on import.
pub const HEADER: [&str; 6] = ["Name", "Location", "Mobile", "Email", "Address", "Description"];

/// Number of columns carried through CSV.
pub const FIELD_COUNT: usize = HEADER.len();

/// Supported CSV dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CsvDialect {
    /// Every field wrapped in double quotes with no escaping.
    ///
    /// Embedded `"` characters are written verbatim and cannot be
    /// recovered on import. This is the format older exports use.
    #[default]
    Legacy,
    /// RFC 4180 quoting: embedded quotes are doubled, and commas and line
    /// breaks survive inside quoted fields.
    Standard,
}

impl CsvDialect {
    /// Returns all available dialects.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Legacy, Self::Standard]
    }

    /// Returns the configuration name of this dialect.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Standard => "standard",
        }
    }
}

impl FromStr for CsvDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "quoted" => Ok(Self::Legacy),
            "standard" | "rfc4180" | "rfc-4180" => Ok(Self::Standard),
            _ => Err(Error::InvalidInput(format!("Unknown CSV dialect: {s}"))),
        }
    }
}

impl std::fmt::Display for CsvDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the exported columns of a record, in header order.
///
/// `id`, `created_at` and `image_uri` are not carried through CSV.
pub(crate) fn columns(record: &Record) -> [&str; FIELD_COUNT] {
    [
        &record.name,
        &record.location,
        &record.mobile,
        &record.email,
        &record.address,
        &record.description,
    ]
}

/// Maps positional values to a field set. Missing positions default to empty.
pub(crate) fn fields_from_values<I, S>(values: I) -> RecordFields
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut slots: [String; FIELD_COUNT] = Default::default();
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = value.into();
    }
    let [name, location, mobile, email, address, description] = slots;

    RecordFields {
        name,
        location,
        mobile,
        email,
        address,
        description,
        image_uri: String::new(),
    }
}
