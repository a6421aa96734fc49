//! CSV codec between the record collection and CSV text.

use super::formats::{CsvDialect, csv, legacy};
use crate::Result;
use crate::models::{Record, RecordFields};

/// Serializes records to CSV text in the legacy dialect.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn serialize(records: &[Record]) -> Option<String> {
    legacy::serialize(records)
}

/// Parses legacy CSV text into the ordered list of valid field sets.
#[must_use]
pub fn parse(text: &str) -> Vec<RecordFields> {
    legacy::parse(text)
}

/// CSV serializer/parser bound to a dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvCodec {
    dialect: CsvDialect,
}

impl CsvCodec {
    /// Creates a codec for the given dialect.
    #[must_use]
    pub const fn new(dialect: CsvDialect) -> Self {
        Self { dialect }
    }

    /// Returns the dialect this codec reads and writes.
    #[must_use]
    pub const fn dialect(&self) -> CsvDialect {
        self.dialect
    }

    /// Serializes records to CSV text.
    ///
    /// Returns `Ok(None)` for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard dialect's writer fails. The legacy
    /// dialect never fails.
    pub fn serialize(&self, records: &[Record]) -> Result<Option<String>> {
        match self.dialect {
            CsvDialect::Legacy => Ok(legacy::serialize(records)),
            CsvDialect::Standard => csv::serialize(records),
        }
    }

    /// Parses CSV text, dropping invalid rows one by one.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<RecordFields> {
        match self.dialect {
            CsvDialect::Legacy => legacy::parse(text),
            CsvDialect::Standard => csv::parse(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    #[test]
    fn test_default_codec_is_legacy() {
        assert_eq!(CsvCodec::default().dialect(), CsvDialect::Legacy);
    }

    #[test]
    fn test_codecs_agree_on_plain_data() {
        let records = [Record::from_fields(
            RecordId::generate(),
            RecordFields::new("Alice", "Home").with_mobile("555"),
            "t",
        )];

        for dialect in CsvDialect::all() {
            let codec = CsvCodec::new(*dialect);
            let text = codec.serialize(&records).unwrap().unwrap();
            assert_eq!(text, serialize(&records).unwrap());
            assert_eq!(codec.parse(&text), parse(&text));
        }
    }

    #[test]
    fn test_empty_signal_for_every_dialect() {
        for dialect in CsvDialect::all() {
            assert!(CsvCodec::new(*dialect).serialize(&[]).unwrap().is_none());
        }
    }
}
