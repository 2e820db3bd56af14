//! Append-only prediction log.
//!
//! Every successful classification is appended as a [`PredictionRecord`].
//! Stores expose no update or delete operations and apply no retention.
//!
//! - [`sqlite::SqliteStore`] -- a `url_log` table in a SQLite database.
//! - [`jsonl::JsonlStore`] -- newline-delimited JSON, one record per line.
//! - [`memory::MemoryStore`] -- an in-process vector.

pub mod jsonl;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use urlguard_types::PredictionRecord;

/// Errors produced by prediction stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored row could not be turned back into a record.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// A lock was poisoned or a blocking task died.
    #[error("internal store error: {0}")]
    Internal(String),
}

/// Append-only persistence for prediction records.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Durably append one record.
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError>;

    /// Up to `limit` records, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Return the name of this store for logging.
    fn name(&self) -> &str;
}
