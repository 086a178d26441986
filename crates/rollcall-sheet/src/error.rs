//! Error types for `rollcall-sheet`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed sheet: {0}")]
  Malformed(#[from] csv::Error),

  #[error("sheet has no header row")]
  NoHeader,

  #[error("no rows found in sheet")]
  NoRows,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
