//! Integration tests for `SqliteStore` against an in-memory database.

use rollcall_core::{
  engagement::NewViewEvent,
  import::MAX_BATCH,
  staff::NewStaffUser,
  store::RosterStore,
  student::{CallStatusUpdate, StudentId, StudentUpsert},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn upsert(email: &str) -> StudentUpsert {
  StudentUpsert {
    id: StudentId::from_email(email).expect("keyable email"),
    email: email.to_string(),
    first_name: "Ada".to_string(),
    last_name: "Lovelace".to_string(),
    enrolled: false,
    phone: String::new(),
    notes: String::new(),
  }
}

async fn seed_staff(s: &SqliteStore, email: &str) -> rollcall_core::staff::StaffUser {
  s.add_staff(NewStaffUser {
    email: email.to_string(),
    name: "Staff Member".to_string(),
    password_hash: "$argon2id$v=19$test".to_string(),
  })
  .await
  .unwrap()
}

// ─── Upserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_creates_and_get_returns() {
  let s = store().await;
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();

  let student = s
    .get_student(StudentId::from_email("a@example.com").unwrap())
    .await
    .unwrap()
    .expect("student exists");

  assert_eq!(student.email, "a@example.com");
  assert_eq!(student.first_name, "Ada");
  assert!(!student.enrolled);
  assert!(!student.called_today);
  assert!(student.last_called_at.is_none());
  assert_eq!(student.created_at, student.updated_at);
}

#[tokio::test]
async fn get_student_missing_returns_none() {
  let s = store().await;
  let result = s
    .get_student(StudentId::from_email("ghost@example.com").unwrap())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn upsert_merge_preserves_created_at_and_engagement_fields() {
  let s = store().await;
  let id = StudentId::from_email("a@example.com").unwrap();

  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();
  let before = s.get_student(id.clone()).await.unwrap().unwrap();

  // Mark called so the engagement fields are populated.
  let staff = seed_staff(&s, "staff@example.com").await;
  s.set_call_status(id.clone(), CallStatusUpdate::Called { by: staff.id })
    .await
    .unwrap();

  // Re-import with changed roster fields.
  let mut second = upsert("a@example.com");
  second.first_name = "Augusta".to_string();
  second.enrolled = true;
  s.upsert_students(vec![second]).await.unwrap();

  let after = s.get_student(id).await.unwrap().unwrap();
  assert_eq!(after.first_name, "Augusta");
  assert!(after.enrolled);
  // Preserved across the merge:
  assert_eq!(after.created_at, before.created_at);
  assert!(after.called_today);
  assert!(after.last_called_at.is_some());
  assert_eq!(after.called_by_user_id, Some(staff.id));
  // Only updated_at moved.
  assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn repeated_upsert_does_not_duplicate() {
  let s = store().await;
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();

  let all = s.list_students(false).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn batch_is_atomic_within_one_call() {
  let s = store().await;
  s.upsert_students(vec![upsert("a@example.com"), upsert("b@example.com")])
    .await
    .unwrap();

  let all = s.list_students(false).await.unwrap();
  assert_eq!(all.len(), 2);
  // Both ops of the batch carry the same server-assigned timestamps.
  assert_eq!(all[0].created_at, all[1].created_at);
}

#[tokio::test]
async fn oversized_batch_is_rejected() {
  let s = store().await;
  let batch: Vec<StudentUpsert> = (0..MAX_BATCH + 1)
    .map(|i| upsert(&format!("s{i}@example.com")))
    .collect();

  let err = s.upsert_students(batch).await.unwrap_err();
  assert!(matches!(err, crate::Error::BatchTooLarge(n) if n == MAX_BATCH + 1));
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_filters_by_enrollment_and_orders_newest_first() {
  let s = store().await;

  s.upsert_students(vec![upsert("old@example.com")]).await.unwrap();
  s.upsert_students(vec![upsert("new@example.com")]).await.unwrap();
  let mut enrolled = upsert("enrolled@example.com");
  enrolled.enrolled = true;
  s.upsert_students(vec![enrolled]).await.unwrap();

  let not_enrolled = s.list_students(false).await.unwrap();
  assert_eq!(not_enrolled.len(), 2);
  assert_eq!(not_enrolled[0].email, "new@example.com");
  assert_eq!(not_enrolled[1].email, "old@example.com");

  let enrolled = s.list_students(true).await.unwrap();
  assert_eq!(enrolled.len(), 1);
  assert_eq!(enrolled[0].email, "enrolled@example.com");
}

// ─── Call status ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn call_status_round_trip_clears_all_three_fields() {
  let s = store().await;
  let id = StudentId::from_email("a@example.com").unwrap();
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();
  let staff = seed_staff(&s, "staff@example.com").await;

  let called = s
    .set_call_status(id.clone(), CallStatusUpdate::Called { by: staff.id })
    .await
    .unwrap();
  assert!(called.called_today);
  assert!(called.last_called_at.is_some());
  assert_eq!(called.called_by_user_id, Some(staff.id));

  let cleared = s.set_call_status(id, CallStatusUpdate::Cleared).await.unwrap();
  assert!(!cleared.called_today);
  assert!(cleared.last_called_at.is_none());
  assert!(cleared.called_by_user_id.is_none());
}

#[tokio::test]
async fn call_status_on_missing_student_errors() {
  let s = store().await;
  let err = s
    .set_call_status(
      StudentId::from_email("ghost@example.com").unwrap(),
      CallStatusUpdate::Cleared,
    )
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::StudentNotFound(_)));
}

// ─── View events ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn views_accumulate_and_return_newest_first() {
  let s = store().await;
  let id = StudentId::from_email("a@example.com").unwrap();
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();

  let first_user = Uuid::new_v4();
  let second_user = Uuid::new_v4();
  s.record_view(NewViewEvent { student_id: id.clone(), user_id: first_user })
    .await
    .unwrap();
  s.record_view(NewViewEvent { student_id: id.clone(), user_id: second_user })
    .await
    .unwrap();

  let views = s.views_for_student(id).await.unwrap();
  assert_eq!(views.len(), 2);
  assert_eq!(views[0].user_id, second_user);
  assert_eq!(views[1].user_id, first_user);
  assert!(views[0].viewed_at >= views[1].viewed_at);
}

#[tokio::test]
async fn repeat_views_by_the_same_user_are_all_retained() {
  let s = store().await;
  let id = StudentId::from_email("a@example.com").unwrap();
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();

  let user = Uuid::new_v4();
  for _ in 0..3 {
    s.record_view(NewViewEvent { student_id: id.clone(), user_id: user })
      .await
      .unwrap();
  }

  let views = s.views_for_student(id).await.unwrap();
  assert_eq!(views.len(), 3);
}

#[tokio::test]
async fn views_survive_with_unknown_user_ids() {
  // Weak reference: the event outlives any staff record.
  let s = store().await;
  let id = StudentId::from_email("a@example.com").unwrap();
  s.upsert_students(vec![upsert("a@example.com")]).await.unwrap();

  let ghost = Uuid::new_v4();
  s.record_view(NewViewEvent { student_id: id.clone(), user_id: ghost })
    .await
    .unwrap();

  let views = s.views_for_student(id).await.unwrap();
  assert_eq!(views.len(), 1);
  assert_eq!(views[0].user_id, ghost);
  assert!(s.get_staff(ghost).await.unwrap().is_none());
}

// ─── Staff ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_staff_and_find_by_email() {
  let s = store().await;
  let created = seed_staff(&s, "staff@example.com").await;

  let found = s
    .find_staff_by_email("staff@example.com".to_string())
    .await
    .unwrap()
    .expect("staff exists");
  assert_eq!(found.id, created.id);
  assert!(found.active);
  assert_eq!(found.password_hash, "$argon2id$v=19$test");

  let identity = s.get_staff(created.id).await.unwrap().expect("identity");
  assert_eq!(identity.email, "staff@example.com");
  assert_eq!(identity.name, "Staff Member");
}

#[tokio::test]
async fn duplicate_staff_email_is_rejected() {
  let s = store().await;
  seed_staff(&s, "staff@example.com").await;

  let err = s
    .add_staff(NewStaffUser {
      email: "staff@example.com".to_string(),
      name: "Other".to_string(),
      password_hash: "$argon2id$other".to_string(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::StaffEmailTaken(_)));
}
