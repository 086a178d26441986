//! HTTP Basic-auth extractor resolving the requesting staff identity.
//!
//! The username is the staff email; the password is verified against the
//! argon2 PHC hash on the stored record. Handlers receive the verified
//! [`StaffIdentity`] and thread it into every operation that records
//! provenance (view events, `called_by_user_id`).

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;

use rollcall_core::{
  staff::StaffIdentity, store::RosterStore, student::normalize_email,
};

use crate::{AppState, error::ApiError};

/// The verified requester. Present in a handler's signature means the
/// request carried valid staff credentials.
pub struct Identity(pub StaffIdentity);

/// Produce an argon2 PHC string for a new staff password.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)?
      .to_string(),
  )
}

/// Verify credentials from headers against the staff records.
pub async fn verify_auth<S>(
  headers: &HeaderMap,
  store: &S,
) -> Result<StaffIdentity, ApiError>
where
  S: RosterStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let user = store
    .find_staff_by_email(normalize_email(email))
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::Unauthorized)?;

  if !user.active {
    return Err(ApiError::Unauthorized);
  }

  let parsed_hash =
    PasswordHash::new(&user.password_hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(user.identity())
}

impl<S> FromRequestParts<AppState<S>> for Identity
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let identity = verify_auth(&parts.headers, state.store.as_ref()).await?;
    Ok(Identity(identity))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::http::{Request, header};
  use rollcall_core::staff::NewStaffUser;
  use rollcall_store_sqlite::SqliteStore;

  use super::*;

  async fn make_state(password: &str) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .add_staff(NewStaffUser {
        email: "staff@example.com".to_string(),
        name: "Staff".to_string(),
        password_hash: hash_password(password).unwrap(),
      })
      .await
      .unwrap();
    AppState { store: Arc::new(store) }
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<SqliteStore>,
  ) -> Result<Identity, ApiError> {
    let (mut parts, _) = req.into_parts();
    Identity::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[tokio::test]
  async fn correct_credentials_resolve_the_identity() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("staff@example.com", "secret"))
      .body(axum::body::Body::empty())
      .unwrap();

    let Identity(identity) = extract(req, &state).await.unwrap();
    assert_eq!(identity.email, "staff@example.com");
    assert_eq!(identity.name, "Staff");
  }

  #[tokio::test]
  async fn email_is_matched_case_insensitively() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic(" Staff@Example.COM ", "secret"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(extract(req, &state).await.is_ok());
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("staff@example.com", "wrong"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn unknown_email() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("other@example.com", "secret"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = make_state("secret").await;
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = make_state("secret").await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }
}
