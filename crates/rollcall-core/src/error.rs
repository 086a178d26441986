//! Error types for `rollcall-core`.

use thiserror::Error;

use crate::student::StudentId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("student not found: {0}")]
  StudentNotFound(StudentId),

  #[error("staff user already exists for email: {0}")]
  StaffEmailTaken(String),

  #[error("upsert batch of {0} ops exceeds the maximum of {max}", max = crate::import::MAX_BATCH)]
  BatchTooLarge(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
