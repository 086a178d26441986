//! CSV parsing into header-keyed rows.
//!
//! The first record is the header row; every following record becomes a
//! [`RawRow`] pairing each header with its cell value. Short records are
//! padded with empty values so downstream lookup is total.

use crate::error::{Error, Result};

/// One data row, keyed by the sheet's raw (un-normalised) headers.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
  columns: Vec<(String, String)>,
}

impl RawRow {
  /// Build a row from header/value pairs — used by tests and callers
  /// that source rows from something other than CSV bytes.
  pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      columns: pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }

  /// Iterate `(header, value)` pairs in sheet order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

/// Parse uploaded bytes into an ordered sequence of rows.
///
/// Fails with [`Error::NoHeader`] for an empty upload and
/// [`Error::NoRows`] for a header-only one; cell-level defects are not
/// errors here — they surface later as skip diagnostics.
pub fn parse_sheet(bytes: &[u8]) -> Result<Vec<RawRow>> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .from_reader(bytes);

  let headers: Vec<String> =
    reader.headers()?.iter().map(str::to_string).collect();
  if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
    return Err(Error::NoHeader);
  }

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record?;
    let columns = headers
      .iter()
      .enumerate()
      .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
      .collect();
    rows.push(RawRow { columns });
  }

  if rows.is_empty() {
    return Err(Error::NoRows);
  }
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_header_keyed_rows() {
    let bytes = b"Email,First Name\na@example.com,Ada\nb@example.com,Grace\n";
    let rows = parse_sheet(bytes).unwrap();
    assert_eq!(rows.len(), 2);

    let first: Vec<_> = rows[0].iter().collect();
    assert_eq!(first, vec![("Email", "a@example.com"), ("First Name", "Ada")]);
  }

  #[test]
  fn short_records_pad_with_empty_values() {
    let bytes = b"Email,Phone\na@example.com\n";
    let rows = parse_sheet(bytes).unwrap();
    let cols: Vec<_> = rows[0].iter().collect();
    assert_eq!(cols, vec![("Email", "a@example.com"), ("Phone", "")]);
  }

  #[test]
  fn empty_upload_is_no_header() {
    assert!(matches!(parse_sheet(b""), Err(Error::NoHeader)));
  }

  #[test]
  fn header_only_upload_is_no_rows() {
    assert!(matches!(parse_sheet(b"Email,Name\n"), Err(Error::NoRows)));
  }
}
