//! In-memory record store and the insertion-ordered table it shares with the
//! file-backed store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordPredicate, RecordStore};
use crate::error::{CoreError, CoreResult};
use crate::record::AnalyzedRecord;

/// Records keyed by id, remembering insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordTable {
    order: Vec<String>,
    records: HashMap<String, AnalyzedRecord>,
}

impl RecordTable {
    /// Rebuild a table from a persisted sequence. Later duplicates are dropped.
    pub(crate) fn from_records(records: Vec<AnalyzedRecord>) -> Self {
        let mut table = Self::default();
        for record in records {
            if let Err(error) = table.insert(record) {
                tracing::warn!("skipping persisted record: {error}");
            }
        }
        table
    }

    pub(crate) fn get(&self, id: &str) -> Option<&AnalyzedRecord> {
        self.records.get(id)
    }

    pub(crate) fn insert(&mut self, record: AnalyzedRecord) -> CoreResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(CoreError::AlreadyExists(format!(
                "record {} already exists",
                record.id
            )));
        }
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &str) -> CoreResult<AnalyzedRecord> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| CoreError::NotFound(format!("record {id} not found")))?;
        self.order.retain(|existing| existing != id);
        Ok(record)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &AnalyzedRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub(crate) fn scan(&self, predicate: RecordPredicate<'_>) -> Vec<AnalyzedRecord> {
        self.iter().filter(|record| predicate(record)).cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: RwLock<RecordTable>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_by_hash(&self, hash: &str) -> CoreResult<Option<AnalyzedRecord>> {
        Ok(self.table.read().await.get(hash).cloned())
    }

    async fn insert(&self, record: AnalyzedRecord) -> CoreResult<()> {
        self.table.write().await.insert(record)
    }

    async fn delete(&self, hash: &str) -> CoreResult<()> {
        self.table.write().await.remove(hash).map(|_| ())
    }

    async fn scan(&self, predicate: RecordPredicate<'_>) -> CoreResult<Vec<AnalyzedRecord>> {
        Ok(self.table.read().await.scan(predicate))
    }

    async fn len(&self) -> CoreResult<usize> {
        Ok(self.table.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_record;
    use chrono::Utc;
    use std::sync::Arc;

    fn record(value: &str) -> AnalyzedRecord {
        build_record(value, Utc::now())
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = MemoryRecordStore::new();
        let original = record("hello world");
        store.insert(original.clone()).await.expect("insert");

        let loaded = store
            .find_by_hash(&original.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn missing_hash_returns_none() {
        let store = MemoryRecordStore::new();
        assert!(store.find_by_hash("deadbeef").await.expect("find").is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = MemoryRecordStore::new();
        store.insert(record("test")).await.expect("first insert");
        let err = store.insert(record("test")).await.expect_err("duplicate");
        assert!(matches!(err, CoreError::AlreadyExists(_)));
        assert_eq!(store.len().await.expect("len"), 1);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let store = MemoryRecordStore::new();
        let item = record("to-delete");
        store.insert(item.clone()).await.expect("insert");

        store.delete(&item.id).await.expect("delete");
        assert!(store.find_by_hash(&item.id).await.expect("find").is_none());

        let err = store.delete(&item.id).await.expect_err("second delete");
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn scan_preserves_insertion_order() {
        let store = MemoryRecordStore::new();
        for value in ["racecar", "hello", "a", "noon"] {
            store.insert(record(value)).await.expect("insert");
        }
        store
            .delete(&record("hello").id)
            .await
            .expect("delete");

        let all = store.scan(&|_| true).await.expect("scan");
        let values: Vec<&str> = all.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["racecar", "a", "noon"]);

        let short = store.scan(&|r| r.length() < 5).await.expect("scan");
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn table_from_records_drops_duplicates() {
        let table = RecordTable::from_records(vec![record("x"), record("y"), record("x")]);
        assert_eq!(table.len(), 2);
        let values: Vec<&str> = table.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn concurrent_inserts() {
        let store = Arc::new(MemoryRecordStore::new());
        let mut handles = vec![];

        for batch in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..10 {
                    store
                        .insert(record(&format!("batch-{batch}-item-{i}")))
                        .await
                        .expect("insert");
                }
            }));
        }
        for handle in handles {
            handle.await.expect("join");
        }

        assert_eq!(store.len().await.expect("len"), 100);
    }
}
