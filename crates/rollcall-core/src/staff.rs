//! Staff users and the public identity projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The public projection of a staff member, safe to embed in responses.
/// Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
  pub id: Uuid,
  pub email: String,
  pub name: String,
}

/// A full staff record as the store holds it. `password_hash` is an
/// argon2 PHC string and stays inside the auth path.
#[derive(Debug, Clone)]
pub struct StaffUser {
  pub id: Uuid,
  pub email: String,
  pub name: String,
  pub password_hash: String,
  pub active: bool,
  pub created_at: DateTime<Utc>,
}

impl StaffUser {
  pub fn identity(&self) -> StaffIdentity {
    StaffIdentity {
      id: self.id,
      email: self.email.clone(),
      name: self.name.clone(),
    }
  }
}

/// Input for creating a staff user. `active` starts true; id and
/// timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewStaffUser {
  pub email: String,
  pub name: String,
  pub password_hash: String,
}
