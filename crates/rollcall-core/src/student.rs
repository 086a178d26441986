//! Student records and their deterministic identity keys.
//!
//! A student's id is derived from its email address, not generated: the
//! trimmed, lower-cased email is URL-safe encoded and used as the record
//! key. Re-importing the same person therefore always targets the same
//! record, which is what makes the spreadsheet import idempotent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Identity key ────────────────────────────────────────────────────────────

/// Lower-case and trim an email address. This is the canonical form used
/// both for the stored `email` field and for key derivation.
pub fn normalize_email(raw: &str) -> String {
  raw.trim().to_lowercase()
}

/// The deterministic record key for a student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
  /// Derive the key from a raw email value. Returns `None` if the email
  /// is empty after normalisation — such rows cannot be keyed.
  pub fn from_email(raw: &str) -> Option<Self> {
    let email = normalize_email(raw);
    if email.is_empty() {
      return None;
    }
    Some(Self(urlencoding::encode(&email).into_owned()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Accept an opaque id as it arrives from a URL path. No re-encoding is
/// applied; lookups with a non-derived id simply miss.
impl From<String> for StudentId {
  fn from(s: String) -> Self {
    Self(s)
  }
}

impl fmt::Display for StudentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A prospective-student roster record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub id: StudentId,
  pub email: String,
  #[serde(rename = "firstName")]
  pub first_name: String,
  #[serde(rename = "lastName")]
  pub last_name: String,
  pub enrolled: bool,
  pub phone: String,
  pub notes: String,
  /// Set by [`CallStatusUpdate::Called`]; cleared as a unit with the two
  /// fields below by [`CallStatusUpdate::Cleared`].
  pub called_today: bool,
  pub last_called_at: Option<DateTime<Utc>>,
  pub called_by_user_id: Option<Uuid>,
  /// Assigned by the store on first insert and never touched again.
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  /// Bumped by the store on every write.
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

/// One merge-style write against a student record.
///
/// The six roster fields overwrite whatever is stored; the engagement
/// fields (`called_*`) and `created_at` are preserved on update.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentUpsert {
  pub id: StudentId,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub enrolled: bool,
  pub phone: String,
  pub notes: String,
}

/// The call-status mutation. Unlike the import upsert this is a full
/// overwrite of the three `called_*` fields, so toggling discards any
/// prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatusUpdate {
  /// `called_today = true`, `last_called_at = now`, `called_by_user_id = by`.
  Called { by: Uuid },
  /// All three fields back to `false` / `None` / `None`.
  Cleared,
}
