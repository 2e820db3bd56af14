//! SQLite prediction log.
//!
//! Records live in a single `url_log` table created on open. Timestamps are
//! stored as RFC 3339 text in UTC at nanosecond precision, so a record reads
//! back exactly as it was appended. The connection is guarded by a mutex
//! and every statement runs on the blocking thread pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use tracing::info;

use urlguard_types::{Label, PredictionRecord};

use super::{PredictionStore, StoreError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS url_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL,
        prediction TEXT NOT NULL,
        confidence REAL NOT NULL,
        timestamp TEXT NOT NULL
    );
";

/// Prediction log stored in SQLite.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self::with_connection(conn)?;
        info!(path = %path.display(), "sqlite prediction log opened");
        Ok(store)
    }

    /// A private, in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Internal("sqlite connection lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Internal(format!("sqlite task failed: {e}")))?
    }
}

fn row_to_record(
    url: String,
    prediction: String,
    confidence: f64,
    timestamp: String,
) -> Result<PredictionRecord, StoreError> {
    let label: Label = prediction
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("{e}")))?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp {timestamp:?}: {e}")))?
        .with_timezone(&Utc);
    Ok(PredictionRecord::at(url, label, confidence, timestamp))
}

#[async_trait]
impl PredictionStore for SqliteStore {
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let url = record.url.clone();
        let prediction = record.label.as_str();
        let confidence = record.confidence;
        let timestamp = record.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO url_log(url, prediction, confidence, timestamp) VALUES(?1, ?2, ?3, ?4)",
                params![url, prediction, confidence, timestamp],
            )?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT url, prediction, confidence, timestamp FROM url_log ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;

            let mut out = Vec::new();
            for row in rows {
                let (url, prediction, confidence, timestamp) = row?;
                out.push(row_to_record(url, prediction, confidence, timestamp)?);
            }
            Ok(out)
        })
        .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM url_log", [], |row| row.get(0))?;
            Ok(n.max(0) as u64)
        })
        .await
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
