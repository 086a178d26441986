//! SQL schema for the rollcall SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS students (
    student_id        TEXT PRIMARY KEY,  -- URL-safe encoding of the normalised email
    email             TEXT NOT NULL,
    first_name        TEXT NOT NULL DEFAULT '',
    last_name         TEXT NOT NULL DEFAULT '',
    enrolled          INTEGER NOT NULL DEFAULT 0,
    phone             TEXT NOT NULL DEFAULT '',
    notes             TEXT NOT NULL DEFAULT '',
    called_today      INTEGER NOT NULL DEFAULT 0,
    last_called_at    TEXT,              -- ISO 8601 UTC or NULL
    called_by_user_id TEXT,              -- staff UUID or NULL
    created_at        TEXT NOT NULL,     -- set on first insert, never updated
    updated_at        TEXT NOT NULL
);

-- View events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- student_id and user_id are weak references: deleting either side
-- leaves the event behind, and reads degrade accordingly.
CREATE TABLE IF NOT EXISTS views (
    view_id    TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    user_id    TEXT NOT NULL,
    viewed_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS staff (
    staff_id      TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    password_hash TEXT NOT NULL,        -- argon2 PHC string
    active        INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS students_enrolled_idx ON students(enrolled);
CREATE INDEX IF NOT EXISTS students_created_idx  ON students(created_at);
CREATE INDEX IF NOT EXISTS views_student_idx     ON views(student_id);
CREATE INDEX IF NOT EXISTS views_viewed_idx      ON views(viewed_at);

PRAGMA user_version = 1;
";
