//! Handler for the spreadsheet import upload.

use axum::{
  Json,
  extract::{Multipart, State},
};
use bytes::Bytes;
use serde::Serialize;

use rollcall_core::{import, import::ImportSummary, store::RosterStore};

use crate::{AppState, auth::Identity, error::ApiError};

#[derive(Debug, Serialize)]
pub struct ImportResponse {
  pub message: String,
  pub summary: ImportSummary,
}

/// `POST /api/File/students/import` — multipart upload, file under the
/// fixed field name `file`, at most
/// [`MAX_UPLOAD_BYTES`](crate::MAX_UPLOAD_BYTES).
///
/// Row-level defects become skip diagnostics in the summary. A store
/// failure mid-run returns 500 with no summary; batches committed
/// before the failure remain durable, and re-uploading the same file is
/// safe because the upserts are idempotent.
pub async fn upload<S>(
  State(state): State<AppState<S>>,
  _identity: Identity,
  mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let bytes = file_field(&mut multipart).await?.ok_or_else(|| {
    ApiError::BadRequest(
      "missing file field \"file\" (multipart/form-data)".to_string(),
    )
  })?;

  if bytes.is_empty() {
    return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
  }

  let rows = rollcall_sheet::read_sheet(&bytes)?;
  let summary = import::run_import(state.store.as_ref(), &rows)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(ImportResponse {
    message: "Import completed".to_string(),
    summary,
  }))
}

/// Pull the bytes of the `file` field, if present.
async fn file_field(multipart: &mut Multipart) -> Result<Option<Bytes>, ApiError> {
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
  {
    if field.name() == Some("file") {
      let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable upload: {e}")))?;
      return Ok(Some(bytes));
    }
  }
  Ok(None)
}
