//! Input loading: read the delimited table into ordered records.
//!
//! The header row defines the field set; every data row is normalised
//! against it. Short rows get empty strings for the missing cells so later
//! stages never see an absent value, and cells beyond the header width are
//! dropped. Parsing is strict about the encoding (a non-UTF-8 byte aborts
//! the load) but tolerant about ragged row lengths, matching how ad-hoc
//! shipping exports tend to look.

use crate::error::Track2PdfError;
use std::path::Path;
use tracing::debug;

/// One row of the input table: field name → value, in column order.
///
/// Lookups are linear scans; rows in this domain have a handful of columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from `(name, value)` pairs, keeping their order.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { fields: pairs }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an existing field or append a new one at the end.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Iterate fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Load all records from a CSV file.
///
/// Returns the rows in file order; the result may be empty (header-only
/// file) — the caller decides whether that is an error.
///
/// # Errors
/// * [`Track2PdfError::InputNotFound`] if `path` does not exist
/// * [`Track2PdfError::InputParseFailed`] if the file is not parseable CSV
pub fn load_records(path: &Path) -> Result<Vec<Record>, Track2PdfError> {
    if !path.exists() {
        return Err(Track2PdfError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let parse_err = |source: csv::Error| Track2PdfError::InputParseFailed {
        path: path.to_path_buf(),
        source,
    };

    // flexible: ragged rows are normalised against the header below rather
    // than rejected.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(parse_err)?;

    let headers = reader.headers().map_err(parse_err)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(parse_err)?;
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), row.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(Record { fields });
    }

    debug!(
        "Loaded {} records × {} columns from {}",
        records.len(),
        headers.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp csv");
        f.write_all(contents.as_bytes()).expect("write csv");
        f
    }

    #[test]
    fn loads_rows_in_order_with_header_keys() {
        let f = write_csv("tracking_number,carrier\nTRK-001,UPS\nTRK-002,DHL\n");
        let records = load_records(f.path()).expect("load");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("tracking_number"), Some("TRK-001"));
        assert_eq!(records[0].get("carrier"), Some("UPS"));
        assert_eq!(records[1].get("tracking_number"), Some("TRK-002"));
    }

    #[test]
    fn preserves_column_order() {
        let f = write_csv("b,a,c\n1,2,3\n");
        let records = load_records(f.path()).expect("load");
        let names: Vec<&str> = records[0].iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn short_rows_get_empty_strings() {
        let f = write_csv("tracking_number,carrier,weight\nTRK-001,UPS\n");
        let records = load_records(f.path()).expect("load");
        assert_eq!(records[0].get("weight"), Some(""));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let f = write_csv("tracking_number\nTRK-001,stray,cells\n");
        let records = load_records(f.path()).expect("load");
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("tracking_number"), Some("TRK-001"));
    }

    #[test]
    fn header_only_file_yields_empty_vec() {
        let f = write_csv("tracking_number,carrier\n");
        let records = load_records(f.path()).expect("load");
        assert!(records.is_empty());
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let err = load_records(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Track2PdfError::InputNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_parse_failed() {
        let mut f = tempfile::NamedTempFile::new().expect("temp csv");
        f.write_all(b"tracking_number\n\xff\xfe\n").expect("write csv");
        let result = load_records(f.path());
        match result {
            Err(Track2PdfError::InputParseFailed { .. }) => {}
            other => panic!("expected InputParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn record_set_overwrites_or_appends() {
        let mut r = Record::from_pairs(vec![("a".into(), "1".into())]);
        r.set("a", "2");
        r.set("b", "3");
        assert_eq!(r.get("a"), Some("2"));
        assert_eq!(r.get("b"), Some("3"));
        assert_eq!(r.len(), 2);
    }
}
