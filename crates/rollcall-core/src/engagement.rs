//! View events and read-time viewer enrichment.
//!
//! View events are append-only: every successful student fetch records
//! one, and nothing ever mutates or deletes them. They reference students
//! and staff by id only — deleting either side leaves the event behind,
//! which is why enrichment has to tolerate missing identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  staff::StaffIdentity,
  store::RosterStore,
  student::StudentId,
};

// ─── Records ─────────────────────────────────────────────────────────────────

/// One staff member opening one student record at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
  pub view_id: Uuid,
  pub student_id: StudentId,
  pub user_id: Uuid,
  pub viewed_at: DateTime<Utc>,
}

/// Input for recording a view. `view_id` and `viewed_at` are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewViewEvent {
  pub student_id: StudentId,
  pub user_id: Uuid,
}

// ─── Enriched view ───────────────────────────────────────────────────────────

/// The acting identity attached to a view event after enrichment.
///
/// Serialises as `{id, email, name}` when the staff lookup hit, or as a
/// bare `{id}` when the user has since been deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewerIdentity {
  Known(StaffIdentity),
  Unknown { id: Uuid },
}

/// A view event with its actor resolved — the `viewers` array entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
  pub viewed_at: DateTime<Utc>,
  pub user: ViewerIdentity,
}

/// Resolve the acting identity of each event with a second lookup against
/// the staff records.
///
/// A missed lookup degrades the entry to [`ViewerIdentity::Unknown`] —
/// enrichment never drops an event for a failed join. Events keep the
/// order they arrive in (the store returns them most-recent-first). Each
/// event triggers one independent lookup; per-student view counts keep
/// that cost bounded.
pub async fn enrich_views<S>(
  store: &S,
  events: Vec<ViewEvent>,
) -> Result<Vec<Viewer>, S::Error>
where
  S: RosterStore,
{
  let mut viewers = Vec::with_capacity(events.len());
  for event in events {
    let user = match store.get_staff(event.user_id).await? {
      Some(identity) => ViewerIdentity::Known(identity),
      None => ViewerIdentity::Unknown { id: event.user_id },
    };
    viewers.push(Viewer { viewed_at: event.viewed_at, user });
  }
  Ok(viewers)
}
