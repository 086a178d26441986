//! SQLite backend for the rollcall roster store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread pool without blocking the async runtime. Batch upserts commit
//! inside a single SQL transaction, which supplies the per-batch
//! atomicity the import pipeline relies on.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
