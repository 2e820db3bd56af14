//! In-process prediction store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use urlguard_types::PredictionRecord;

use super::{PredictionStore, StoreError};

/// Keeps records in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PredictionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PredictionStore for MemoryStore {
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlguard_types::Label;

    #[tokio::test]
    async fn recent_is_newest_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let rec = PredictionRecord::new(format!("http://site{i}"), Label::Benign, 0.1);
            store.append(&rec).await.unwrap();
        }

        assert_eq!(store.count().await.unwrap(), 5);
        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].url, "http://site4");
        assert_eq!(recent[1].url, "http://site3");
    }

    #[tokio::test]
    async fn empty_store() {
        let store = MemoryStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.recent(10).await.unwrap().is_empty());
        assert_eq!(store.name(), "memory");
    }
}
