//! Handlers for `/api/users` endpoints.

use axum::Json;

use rollcall_core::{staff::StaffIdentity, store::RosterStore};

use crate::auth::Identity;

/// `GET /api/users/me` — the authenticated requester's public identity.
pub async fn me<S>(Identity(staff): Identity) -> Json<StaffIdentity>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(staff)
}
