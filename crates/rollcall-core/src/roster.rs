//! The roster read model: students enriched with their engagement
//! history at read time.
//!
//! This is a read-time join, not a materialised view — listing costs
//! one view query plus one staff lookup per event, linear in
//! (students × average views per student).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  engagement::{NewViewEvent, Viewer, enrich_views},
  store::RosterStore,
  student::{Student, StudentId},
};

/// A student with its enriched `viewers` array — the listing and fetch
/// response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentWithViewers {
  #[serde(flatten)]
  pub student: Student,
  pub viewers: Vec<Viewer>,
}

/// List students by enrollment state, newest first, each with its full
/// engagement history attached.
pub async fn list_with_engagement<S>(
  store: &S,
  enrolled: bool,
) -> Result<Vec<StudentWithViewers>, S::Error>
where
  S: RosterStore,
{
  let students = store.list_students(enrolled).await?;

  let mut out = Vec::with_capacity(students.len());
  for student in students {
    let events = store.views_for_student(student.id.clone()).await?;
    let viewers = enrich_views(store, events).await?;
    out.push(StudentWithViewers { student, viewers });
  }
  Ok(out)
}

/// Fetch one student and record that `requester` viewed it.
///
/// Every successful fetch is itself a mutation: a new view event is
/// appended before the history is read back, so the returned `viewers`
/// list always includes the fetch being served. Returns `None` (and
/// records nothing) if the id does not resolve.
pub async fn fetch_recording_view<S>(
  store: &S,
  id: StudentId,
  requester: Uuid,
) -> Result<Option<StudentWithViewers>, S::Error>
where
  S: RosterStore,
{
  let Some(student) = store.get_student(id.clone()).await? else {
    return Ok(None);
  };

  store
    .record_view(NewViewEvent { student_id: id.clone(), user_id: requester })
    .await?;

  let events = store.views_for_student(id).await?;
  let viewers = enrich_views(store, events).await?;
  Ok(Some(StudentWithViewers { student, viewers }))
}
