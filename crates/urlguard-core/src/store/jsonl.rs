//! JSONL append-only prediction log.
//!
//! Each record is serialized as one JSON object followed by a newline.
//! Reading replays the file; lines that fail to parse are skipped with a
//! warning so a torn final write does not hide earlier records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use urlguard_types::PredictionRecord;

use super::{PredictionStore, StoreError};

/// Newline-delimited JSON prediction log.
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Create a store backed by the given file. The file is created on
    /// first append.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replay every valid record in file order.
    async fn load_all(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<PredictionRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "skipping invalid JSONL line");
                }
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl PredictionStore for JsonlStore {
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let records = self.load_all().await?;
        Ok(records.into_iter().rev().take(limit).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.load_all().await?.len() as u64)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}
