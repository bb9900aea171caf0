use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::memory::RecordTable;
use super::{RecordPredicate, RecordStore};
use crate::error::{CoreError, CoreResult};
use crate::record::AnalyzedRecord;

/// Record store persisted as a single pretty-printed JSON array.
///
/// The whole table is rewritten after every mutation; the in-memory table only
/// changes once the write has landed.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    table: RwLock<RecordTable>,
}

impl FileRecordStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: PathBuf) -> CoreResult<Self> {
        let records: Vec<AnalyzedRecord> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|error| {
                CoreError::Internal(format!(
                    "failed to parse record file {}: {error}",
                    path.display()
                ))
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                return Err(CoreError::Internal(format!(
                    "failed to read record file {}: {error}",
                    path.display()
                )))
            }
        };
        let table = RecordTable::from_records(records);
        tracing::info!(
            "opened record file {} ({} records)",
            path.display(),
            table.len()
        );
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    async fn ensure_parent_dir(path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| {
                    CoreError::Internal(format!(
                        "failed to create storage directory {}: {error}",
                        parent.display()
                    ))
                })?;
        }
        Ok(())
    }

    async fn persist(&self, records: &[&AnalyzedRecord]) -> CoreResult<()> {
        Self::ensure_parent_dir(&self.path).await?;
        let serialized = serde_json::to_vec_pretty(&records)
            .map_err(|error| CoreError::Internal(format!("storage serialize error: {error}")))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, serialized)
            .await
            .map_err(|error| {
                CoreError::Internal(format!(
                    "failed to write storage file {}: {error}",
                    tmp.display()
                ))
            })?;
        if let Err(error) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!("failed to remove {}: {cleanup}", tmp.display());
            }
            return Err(CoreError::Internal(format!(
                "failed to replace storage file {}: {error}",
                self.path.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn find_by_hash(&self, hash: &str) -> CoreResult<Option<AnalyzedRecord>> {
        Ok(self.table.read().await.get(hash).cloned())
    }

    async fn insert(&self, record: AnalyzedRecord) -> CoreResult<()> {
        let mut table = self.table.write().await;
        if table.get(&record.id).is_some() {
            return Err(CoreError::AlreadyExists(format!(
                "record {} already exists",
                record.id
            )));
        }
        let records: Vec<&AnalyzedRecord> =
            table.iter().chain(std::iter::once(&record)).collect();
        self.persist(&records).await?;
        table.insert(record)
    }

    async fn delete(&self, hash: &str) -> CoreResult<()> {
        let mut table = self.table.write().await;
        if table.get(hash).is_none() {
            return Err(CoreError::NotFound(format!("record {hash} not found")));
        }
        let records: Vec<&AnalyzedRecord> =
            table.iter().filter(|record| record.id != hash).collect();
        self.persist(&records).await?;
        table.remove(hash).map(|_| ())
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
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = tempdir().expect("tempdir");
        let store = FileRecordStore::open(dir.path().join("records.json"))
            .await
            .expect("open");
        assert_eq!(store.len().await.expect("len"), 0);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("records.json");
        let first = build_record("racecar", Utc::now());
        let second = build_record("hello world", Utc::now());

        {
            let store = FileRecordStore::open(path.clone()).await.expect("open");
            store.insert(first.clone()).await.expect("insert");
            store.insert(second.clone()).await.expect("insert");
        }

        let reopened = FileRecordStore::open(path).await.expect("reopen");
        let all = reopened.scan(&|_| true).await.expect("scan");
        assert_eq!(all, vec![first.clone(), second]);
        assert_eq!(
            reopened.find_by_hash(&first.id).await.expect("find"),
            Some(first)
        );
    }

    #[tokio::test]
    async fn delete_is_persisted() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        let item = build_record("test", Utc::now());

        let store = FileRecordStore::open(path.clone()).await.expect("open");
        store.insert(item.clone()).await.expect("insert");
        store.delete(&item.id).await.expect("delete");

        let reopened = FileRecordStore::open(path).await.expect("reopen");
        assert_eq!(reopened.len().await.expect("len"), 0);
    }

    #[tokio::test]
    async fn failed_replace_cleans_up_temp_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        let store = FileRecordStore::open(path.clone()).await.expect("open");

        // A non-empty directory at the target path makes the rename fail.
        std::fs::create_dir(&path).expect("mkdir");
        std::fs::write(path.join("occupied"), b"x").expect("write");

        let err = store
            .insert(build_record("test", Utc::now()))
            .await
            .expect_err("rename onto directory");
        assert!(matches!(err, CoreError::Internal(_)));
        assert!(!dir.path().join("records.json.tmp").exists());
        assert_eq!(store.len().await.expect("len"), 0);
    }

    #[tokio::test]
    async fn duplicate_insert_leaves_file_untouched() {
        let dir = tempdir().expect("tempdir");
        let store = FileRecordStore::open(dir.path().join("records.json"))
            .await
            .expect("open");
        store
            .insert(build_record("test", Utc::now()))
            .await
            .expect("insert");
        let err = store
            .insert(build_record("test", Utc::now()))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, CoreError::AlreadyExists(_)));
        assert_eq!(store.len().await.expect("len"), 1);
    }

    #[tokio::test]
    async fn corrupt_file_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        std::fs::write(&path, b"{ not json").expect("write");
        let err = FileRecordStore::open(path).await.expect_err("corrupt");
        match err {
            CoreError::Internal(_) => {}
            _ => panic!("expected internal error"),
        }
    }
}
