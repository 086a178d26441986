//! Tabular-file front end for the roster import.
//!
//! Turns uploaded spreadsheet bytes into
//! [`NormalizedRow`](rollcall_core::import::NormalizedRow)s:
//!
//!   raw bytes
//!     └─ parse::parse_sheet()      → Vec<RawRow>   (header-keyed values)
//!          └─ normalize::normalize_row() → NormalizedRow
//!
//! Header matching is case- and whitespace-insensitive and accepts
//! common synonyms ("E-mail", "Email Address", ...). Nothing in here
//! talks to a store; the import pipeline lives in `rollcall-core`.

pub mod error;
pub mod normalize;
pub mod parse;

pub use error::{Error, Result};
pub use normalize::{normalize_row, to_boolean};
pub use parse::{RawRow, parse_sheet};

use rollcall_core::import::NormalizedRow;

/// Parse and normalise a whole upload in one go.
pub fn read_sheet(bytes: &[u8]) -> Result<Vec<NormalizedRow>> {
  let raw = parse_sheet(bytes)?;
  Ok(raw.iter().map(normalize_row).collect())
}
