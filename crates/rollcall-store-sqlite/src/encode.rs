//! Column encoding helpers and raw row carriers.
//!
//! SQLite rows come back as plain strings/integers; the `Raw*` structs
//! hold them exactly as fetched so decoding (and its errors) happens
//! outside the connection closure.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use rollcall_core::{
  engagement::ViewEvent,
  staff::StaffUser,
  student::{Student, StudentId},
};

use crate::error::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub struct RawStudent {
  pub student_id: String,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub enrolled: bool,
  pub phone: String,
  pub notes: String,
  pub called_today: bool,
  pub last_called_at: Option<String>,
  pub called_by_user_id: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawStudent {
  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id: StudentId::from(self.student_id),
      email: self.email,
      first_name: self.first_name,
      last_name: self.last_name,
      enrolled: self.enrolled,
      phone: self.phone,
      notes: self.notes,
      called_today: self.called_today,
      last_called_at: self.last_called_at.as_deref().map(decode_dt).transpose()?,
      called_by_user_id: self
        .called_by_user_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub struct RawViewEvent {
  pub view_id: String,
  pub student_id: String,
  pub user_id: String,
  pub viewed_at: String,
}

impl RawViewEvent {
  pub fn into_event(self) -> Result<ViewEvent> {
    Ok(ViewEvent {
      view_id: Uuid::parse_str(&self.view_id)?,
      student_id: StudentId::from(self.student_id),
      user_id: Uuid::parse_str(&self.user_id)?,
      viewed_at: decode_dt(&self.viewed_at)?,
    })
  }
}

pub struct RawStaff {
  pub staff_id: String,
  pub email: String,
  pub name: String,
  pub password_hash: String,
  pub active: bool,
  pub created_at: String,
}

impl RawStaff {
  pub fn into_user(self) -> Result<StaffUser> {
    Ok(StaffUser {
      id: Uuid::parse_str(&self.staff_id)?,
      email: self.email,
      name: self.name,
      password_hash: self.password_hash,
      active: self.active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
