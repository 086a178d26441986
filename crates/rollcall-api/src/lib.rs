//! JSON REST API for the rollcall roster backend.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rollcall_core::store::RosterStore`]. Every route requires an
//! authenticated staff identity (HTTP Basic against the staff records);
//! TLS and deployment concerns are the caller's responsibility.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/api/dashboard/students` | optional `?enrolled=`; default not-enrolled |
//! | `GET`   | `/api/dashboard/students/{id}` | records a view event for the requester |
//! | `PATCH` | `/api/dashboard/students/{id}/status` | body `{"called_today": bool}` |
//! | `POST`  | `/api/File/students/import` | multipart, field `file`, ≤ 10 MB |
//! | `GET`   | `/api/users/me` | echo the authenticated identity |

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;


use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, patch, post},
};
use rollcall_core::store::RosterStore;
use serde::Deserialize;

/// Uploads larger than this are rejected before parsing.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLLCALL_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RosterStore> {
  pub store: Arc<S>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Roster
    .route("/api/dashboard/students", get(handlers::roster::list::<S>))
    .route(
      "/api/dashboard/students/{id}",
      get(handlers::roster::get_one::<S>),
    )
    .route(
      "/api/dashboard/students/{id}/status",
      patch(handlers::roster::update_status::<S>),
    )
    // Import (mounted under /api/File as the frontend expects)
    .route(
      "/api/File/students/import",
      post(handlers::import::upload::<S>)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
    // Staff
    .route("/api/users/me", get(handlers::staff::me::<S>))
    .with_state(state)
}
