//! Handlers for the `/api/dashboard/students` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rollcall_core::{
  roster::{self, StudentWithViewers},
  store::RosterStore,
  student::{CallStatusUpdate, StudentId},
};

use crate::{AppState, auth::Identity, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// `"true"`/`"1"` select enrolled students; anything else — including
  /// the parameter being absent — selects the not-yet-enrolled default.
  pub enrolled: Option<String>,
}

fn enrolled_filter(params: &ListParams) -> bool {
  matches!(params.enrolled.as_deref(), Some("true") | Some("1"))
}

/// `GET /api/dashboard/students[?enrolled=true|1|false|0]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _identity: Identity,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StudentWithViewers>>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students =
    roster::list_with_engagement(state.store.as_ref(), enrolled_filter(&params))
      .await
      .map_err(ApiError::store)?;
  Ok(Json(students))
}

// ─── Get one (view-on-read) ──────────────────────────────────────────────────

/// `GET /api/dashboard/students/{id}`
///
/// Every successful fetch records a view event for the requester; the
/// returned `viewers` history includes it.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Identity(staff): Identity,
  Path(id): Path<String>,
) -> Result<Json<StudentWithViewers>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let student = roster::fetch_recording_view(
    state.store.as_ref(),
    StudentId::from(id.clone()),
    staff.id,
  )
  .await
  .map_err(ApiError::store)?
  .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;

  Ok(Json(student))
}

// ─── Call status ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub called_today: Option<bool>,
}

/// Response mirrors exactly the three overwritten fields.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub id: StudentId,
  pub called_today: bool,
  pub last_called_at: Option<DateTime<Utc>>,
  pub called_by_user_id: Option<Uuid>,
}

/// `PATCH /api/dashboard/students/{id}/status` — body `{"called_today": bool}`.
pub async fn update_status<S>(
  State(state): State<AppState<S>>,
  Identity(staff): Identity,
  Path(id): Path<String>,
  Json(body): Json<StatusBody>,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let called_today = body.called_today.ok_or_else(|| {
    ApiError::BadRequest("called_today boolean is required in body".to_string())
  })?;

  let id = StudentId::from(id);
  // Distinguish 404 from a store failure before mutating.
  state
    .store
    .get_student(id.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;

  let update = if called_today {
    CallStatusUpdate::Called { by: staff.id }
  } else {
    CallStatusUpdate::Cleared
  };

  let student = state
    .store
    .set_call_status(id, update)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(StatusResponse {
    id: student.id,
    called_today: student.called_today,
    last_called_at: student.last_called_at,
    called_by_user_id: student.called_by_user_id,
  }))
}
