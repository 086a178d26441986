//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `rollcall-store-sqlite`). Higher layers (`rollcall-api`) depend on
//! this abstraction, not on any concrete backend, and tests substitute an
//! in-memory fake.

use std::future::Future;

use uuid::Uuid;

use crate::{
  engagement::{NewViewEvent, ViewEvent},
  staff::{NewStaffUser, StaffIdentity, StaffUser},
  student::{CallStatusUpdate, Student, StudentId, StudentUpsert},
};

/// Abstraction over the document store backing the roster.
///
/// Consistency contract: `upsert_students` applies its batch atomically
/// (all-or-nothing for that one call); view-event writes are independent
/// appends; cross-request ordering is whatever the backend's write
/// ordering provides. No method retries — transient backend failures
/// surface as `Self::Error`.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Students ──────────────────────────────────────────────────────────

  /// Atomically apply a batch of merge-upserts (≤ [`MAX_BATCH`] ops).
  ///
  /// For each op: a missing record is created with a server-assigned
  /// `created_at`; an existing record keeps `created_at` and its
  /// engagement fields and has the six roster fields overwritten.
  /// `updated_at` is set on every write.
  ///
  /// [`MAX_BATCH`]: crate::import::MAX_BATCH
  fn upsert_students(
    &self,
    batch: Vec<StudentUpsert>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a student by key. Returns `None` if not found.
  fn get_student(
    &self,
    id: StudentId,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// List students with the given enrollment state, newest first
  /// (by `created_at`).
  fn list_students(
    &self,
    enrolled: bool,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Overwrite the three call-status fields as a unit and return the
  /// updated record. Errors if the student does not exist.
  fn set_call_status(
    &self,
    id: StudentId,
    update: CallStatusUpdate,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  // ── View events — append-only writes ──────────────────────────────────

  /// Record a view event. `view_id` and `viewed_at` are set by the store.
  fn record_view(
    &self,
    input: NewViewEvent,
  ) -> impl Future<Output = Result<ViewEvent, Self::Error>> + Send + '_;

  /// All view events for one student, most-recent-first.
  fn views_for_student(
    &self,
    id: StudentId,
  ) -> impl Future<Output = Result<Vec<ViewEvent>, Self::Error>> + Send + '_;

  // ── Staff ─────────────────────────────────────────────────────────────

  /// Public identity of a staff member. Returns `None` if unknown —
  /// callers degrade rather than fail (see
  /// [`enrich_views`](crate::engagement::enrich_views)).
  fn get_staff(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StaffIdentity>, Self::Error>> + Send + '_;

  /// Full staff record looked up by normalised email — the auth path.
  fn find_staff_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<StaffUser>, Self::Error>> + Send + '_;

  /// Create a staff user. Errors if the email is already taken.
  fn add_staff(
    &self,
    input: NewStaffUser,
  ) -> impl Future<Output = Result<StaffUser, Self::Error>> + Send + '_;
}
