//! The spreadsheet import pipeline: normalized rows in, batched
//! idempotent upserts out, with a per-row outcome summary.
//!
//! Pipeline:
//!   NormalizedRow
//!     └─ key derivation (email → StudentId)
//!          ├─ no key → skip diagnostic, row never reaches a batch
//!          └─ key    → StudentUpsert, accumulated into bounded batches
//!               └─ sequential atomic commits via RosterStore

use serde::{Deserialize, Serialize};

use crate::{
  store::RosterStore,
  student::{StudentId, StudentUpsert, normalize_email},
};

/// Upper bound on the number of ops in one atomic commit.
pub const MAX_BATCH: usize = 500;

/// Offset added to a zero-based row index to report the spreadsheet row:
/// +1 for the header row, +1 for 1-based numbering.
pub const HEADER_ROW_OFFSET: usize = 2;

// ─── Row input ───────────────────────────────────────────────────────────────

/// A spreadsheet row after header-synonym resolution and boolean
/// coercion (see `rollcall-sheet`). All values are trimmed; `email` may
/// still be empty, which classifies the row as invalid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub enrolled: bool,
  pub phone: String,
  pub notes: String,
}

// ─── Outcome accumulation ────────────────────────────────────────────────────

/// Why a row was excluded from the import, with its 1-based sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
  pub row: usize,
  pub reason: String,
}

/// Per-request import outcome. Built up during the run and returned to
/// the caller; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
  #[serde(rename = "totalRows")]
  pub total_rows: usize,
  pub processed: usize,
  pub skipped: usize,
  pub errors: Vec<RowError>,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Run the import: convert each keyable row into a merge-upsert and
/// commit them in sequential atomic batches of at most [`MAX_BATCH`].
///
/// Rows without a resolvable email are counted as skipped with a
/// diagnostic; they never abort the run. A failed batch commit does
/// abort it: the error propagates, no summary is produced, and batches
/// committed before the failure stay durable. Operators should treat a
/// store error from this function as "partially applied, re-run the
/// file" — re-running is safe because the upserts are idempotent.
pub async fn run_import<S>(
  store: &S,
  rows: &[NormalizedRow],
) -> Result<ImportSummary, S::Error>
where
  S: RosterStore,
{
  let mut summary = ImportSummary {
    total_rows: rows.len(),
    ..Default::default()
  };

  let mut batch: Vec<StudentUpsert> = Vec::new();

  for (index, row) in rows.iter().enumerate() {
    let Some(id) = StudentId::from_email(&row.email) else {
      summary.skipped += 1;
      summary.errors.push(RowError {
        row: index + HEADER_ROW_OFFSET,
        reason: "Missing required email column".to_string(),
      });
      continue;
    };

    batch.push(StudentUpsert {
      id,
      email: normalize_email(&row.email),
      first_name: row.first_name.clone(),
      last_name: row.last_name.clone(),
      enrolled: row.enrolled,
      phone: row.phone.clone(),
      notes: row.notes.clone(),
    });
    summary.processed += 1;

    if batch.len() >= MAX_BATCH {
      commit(store, std::mem::take(&mut batch)).await?;
    }
  }

  if !batch.is_empty() {
    commit(store, batch).await?;
  }

  tracing::info!(
    total_rows = summary.total_rows,
    processed = summary.processed,
    skipped = summary.skipped,
    "import completed"
  );
  Ok(summary)
}

async fn commit<S>(store: &S, batch: Vec<StudentUpsert>) -> Result<(), S::Error>
where
  S: RosterStore,
{
  let ops = batch.len();
  store.upsert_students(batch).await?;
  tracing::debug!(ops, "committed upsert batch");
  Ok(())
}
