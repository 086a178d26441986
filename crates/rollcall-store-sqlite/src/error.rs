//! Error type for `rollcall-store-sqlite`.

use rollcall_core::student::StudentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to mutate a student that does not exist.
  #[error("student not found: {0}")]
  StudentNotFound(StudentId),

  #[error("staff user already exists for email: {0}")]
  StaffEmailTaken(String),

  /// The caller handed `upsert_students` more ops than one atomic
  /// commit may carry.
  #[error("upsert batch of {0} ops exceeds the per-commit maximum")]
  BatchTooLarge(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
