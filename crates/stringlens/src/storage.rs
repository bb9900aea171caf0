pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::record::AnalyzedRecord;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

/// Predicate handed to [`RecordStore::scan`].
pub type RecordPredicate<'a> = &'a (dyn Fn(&AnalyzedRecord) -> bool + Send + Sync);

/// Content-addressed persistence for analysed records.
///
/// Every operation is atomic with respect to the others. Records are returned
/// in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_hash(&self, hash: &str) -> CoreResult<Option<AnalyzedRecord>>;
    /// Fails with `AlreadyExists` when a record with the same id is stored.
    async fn insert(&self, record: AnalyzedRecord) -> CoreResult<()>;
    /// Fails with `NotFound` when no record has this id.
    async fn delete(&self, hash: &str) -> CoreResult<()>;
    async fn scan(&self, predicate: RecordPredicate<'_>) -> CoreResult<Vec<AnalyzedRecord>>;
    async fn len(&self) -> CoreResult<usize>;
}

pub type SharedRecordStore = Arc<dyn RecordStore>;
