//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rollcall_core::{
  engagement::{NewViewEvent, ViewEvent},
  import::MAX_BATCH,
  staff::{NewStaffUser, StaffIdentity, StaffUser},
  store::RosterStore,
  student::{CallStatusUpdate, Student, StudentId, StudentUpsert},
};

use crate::{
  Error, Result,
  encode::{RawStaff, RawStudent, RawViewEvent, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const STUDENT_COLUMNS: &str = "student_id, email, first_name, last_name, \
   enrolled, phone, notes, called_today, last_called_at, \
   called_by_user_id, created_at, updated_at";

fn student_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawStudent> {
  Ok(RawStudent {
    student_id: row.get(0)?,
    email: row.get(1)?,
    first_name: row.get(2)?,
    last_name: row.get(3)?,
    enrolled: row.get(4)?,
    phone: row.get(5)?,
    notes: row.get(6)?,
    called_today: row.get(7)?,
    last_called_at: row.get(8)?,
    called_by_user_id: row.get(9)?,
    created_at: row.get(10)?,
    updated_at: row.get(11)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn upsert_students(&self, batch: Vec<StudentUpsert>) -> Result<()> {
    if batch.len() > MAX_BATCH {
      return Err(Error::BatchTooLarge(batch.len()));
    }
    if batch.is_empty() {
      return Ok(());
    }

    // One server-assigned timestamp for the whole atomic unit.
    let now_str = encode_dt(Utc::now());
    let ops = batch.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO students (
               student_id, email, first_name, last_name,
               enrolled, phone, notes, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(student_id) DO UPDATE SET
               email      = excluded.email,
               first_name = excluded.first_name,
               last_name  = excluded.last_name,
               enrolled   = excluded.enrolled,
               phone      = excluded.phone,
               notes      = excluded.notes,
               updated_at = excluded.updated_at",
          )?;
          for op in &batch {
            stmt.execute(rusqlite::params![
              op.id.as_str(),
              op.email,
              op.first_name,
              op.last_name,
              op.enrolled,
              op.phone,
              op.notes,
              now_str,
              now_str,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(ops, "committed student upsert batch");
    Ok(())
  }

  async fn get_student(&self, id: StudentId) -> Result<Option<Student>> {
    let id_str = id.as_str().to_owned();

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1"
              ),
              rusqlite::params![id_str],
              student_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn list_students(&self, enrolled: bool) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STUDENT_COLUMNS} FROM students
           WHERE enrolled = ?1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![enrolled], student_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn set_call_status(
    &self,
    id: StudentId,
    update: CallStatusUpdate,
  ) -> Result<Student> {
    let id_str = id.as_str().to_owned();
    let now_str = encode_dt(Utc::now());

    let (called_today, last_called_at, called_by) = match update {
      CallStatusUpdate::Called { by } => {
        (true, Some(now_str.clone()), Some(encode_uuid(by)))
      }
      CallStatusUpdate::Cleared => (false, None, None),
    };

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE students SET
             called_today      = ?2,
             last_called_at    = ?3,
             called_by_user_id = ?4,
             updated_at        = ?5
           WHERE student_id = ?1",
          rusqlite::params![id_str, called_today, last_called_at, called_by, now_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1"
              ),
              rusqlite::params![id_str],
              student_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::StudentNotFound(id))?
      .into_student()
  }

  // ── View events — append-only writes ──────────────────────────────────────

  async fn record_view(&self, input: NewViewEvent) -> Result<ViewEvent> {
    let event = ViewEvent {
      view_id: Uuid::new_v4(),
      student_id: input.student_id,
      user_id: input.user_id,
      viewed_at: Utc::now(),
    };

    let view_id_str = encode_uuid(event.view_id);
    let student_id_str = event.student_id.as_str().to_owned();
    let user_id_str = encode_uuid(event.user_id);
    let at_str = encode_dt(event.viewed_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO views (view_id, student_id, user_id, viewed_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![view_id_str, student_id_str, user_id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn views_for_student(&self, id: StudentId) -> Result<Vec<ViewEvent>> {
    let id_str = id.as_str().to_owned();

    let raws: Vec<RawViewEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT view_id, student_id, user_id, viewed_at
           FROM views
           WHERE student_id = ?1
           ORDER BY viewed_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawViewEvent {
              view_id: row.get(0)?,
              student_id: row.get(1)?,
              user_id: row.get(2)?,
              viewed_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawViewEvent::into_event).collect()
  }

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn get_staff(&self, id: Uuid) -> Result<Option<StaffIdentity>> {
    let id_str = encode_uuid(id);

    let found: Option<(String, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT staff_id, email, name FROM staff WHERE staff_id = ?1",
              rusqlite::params![id_str],
              |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?,
        )
      })
      .await?;

    found
      .map(|(id, email, name)| {
        Ok(StaffIdentity { id: Uuid::parse_str(&id)?, email, name })
      })
      .transpose()
  }

  async fn find_staff_by_email(&self, email: String) -> Result<Option<StaffUser>> {
    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT staff_id, email, name, password_hash, active, created_at
               FROM staff WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(RawStaff {
                  staff_id: row.get(0)?,
                  email: row.get(1)?,
                  name: row.get(2)?,
                  password_hash: row.get(3)?,
                  active: row.get(4)?,
                  created_at: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStaff::into_user).transpose()
  }

  async fn add_staff(&self, input: NewStaffUser) -> Result<StaffUser> {
    if self.find_staff_by_email(input.email.clone()).await?.is_some() {
      return Err(Error::StaffEmailTaken(input.email));
    }

    let user = StaffUser {
      id: Uuid::new_v4(),
      email: input.email,
      name: input.name,
      password_hash: input.password_hash,
      active: true,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(user.id);
    let email = user.email.clone();
    let name = user.name.clone();
    let hash = user.password_hash.clone();
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO staff (staff_id, email, name, password_hash, active, created_at)
           VALUES (?1, ?2, ?3, ?4, 1, ?5)",
          rusqlite::params![id_str, email, name, hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }
}
