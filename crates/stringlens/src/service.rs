//! Composition of analysis, interpretation and filtering over a record store.

use chrono::Utc;

use crate::analysis::{build_record, content_hash};
use crate::error::{CoreError, CoreResult};
use crate::filter::FilterSet;
use crate::query;
use crate::record::AnalyzedRecord;
use crate::storage::SharedRecordStore;

pub const UNPARSEABLE_QUERY: &str = "Unable to parse natural language query";
pub const CONFLICTING_QUERY: &str = "Query parsed but resulted in conflicting filters";

/// Records selected by a free-text query, with the filters it was read as.
#[derive(Debug, Clone)]
pub struct NaturalLanguageResult {
    pub filters: FilterSet,
    pub records: Vec<AnalyzedRecord>,
}

#[derive(Clone)]
pub struct StringService {
    store: SharedRecordStore,
}

impl StringService {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    /// Analyse and store a new value. Values are stored verbatim.
    pub async fn create(&self, value: &str) -> CoreResult<AnalyzedRecord> {
        if value.is_empty() {
            return Err(CoreError::InvalidInput("Value must not be empty".to_string()));
        }
        let record = build_record(value, Utc::now());
        self.store.insert(record.clone()).await.map_err(|error| match error {
            CoreError::AlreadyExists(_) => {
                CoreError::AlreadyExists("String already exists".to_string())
            }
            other => other,
        })?;
        tracing::info!(id = %record.id, length = record.length(), "stored string");
        Ok(record)
    }

    pub async fn get(&self, value: &str) -> CoreResult<AnalyzedRecord> {
        self.store
            .find_by_hash(&content_hash(value))
            .await?
            .ok_or_else(|| CoreError::NotFound("String not found".to_string()))
    }

    pub async fn delete(&self, value: &str) -> CoreResult<()> {
        let id = content_hash(value);
        self.store.delete(&id).await.map_err(|error| match error {
            CoreError::NotFound(_) => CoreError::NotFound("String not found".to_string()),
            other => other,
        })?;
        tracing::info!(id = %id, "deleted string");
        Ok(())
    }

    /// Stored records matching `filters`, in insertion order.
    pub async fn list(&self, filters: &FilterSet) -> CoreResult<Vec<AnalyzedRecord>> {
        self.store.scan(&|record| filters.matches(record)).await
    }

    /// Interpret `phrase` and list the records it selects.
    pub async fn search_natural_language(&self, phrase: &str) -> CoreResult<NaturalLanguageResult> {
        let filters = query::interpret(phrase);
        if filters.is_empty() {
            tracing::warn!(phrase, "natural language query not understood");
            return Err(CoreError::Unparseable(UNPARSEABLE_QUERY.to_string()));
        }
        if filters.has_conflicting_bounds() {
            return Err(CoreError::ConflictingFilters(CONFLICTING_QUERY.to_string()));
        }
        let records = self.list(&filters).await?;
        Ok(NaturalLanguageResult { filters, records })
    }
}
