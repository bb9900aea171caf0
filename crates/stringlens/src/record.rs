//! Stored record types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Derived properties of a stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StringProperties {
    /// Number of Unicode code points.
    pub length: usize,
    /// Case-insensitive reversal check; whitespace and punctuation count.
    pub is_palindrome: bool,
    /// Number of distinct code points, case-sensitive.
    pub unique_characters: usize,
    pub word_count: usize,
    /// Lowercase hex SHA-256 of the value. Equal to the record id.
    pub sha256_hash: String,
    /// Occurrences of each code point, keyed by the character itself.
    pub character_frequency_map: BTreeMap<String, usize>,
}

/// A content-addressed record. Immutable once stored; removal is the only
/// lifecycle change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzedRecord {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl AnalyzedRecord {
    pub fn length(&self) -> usize {
        self.properties.length
    }

    pub fn is_palindrome(&self) -> bool {
        self.properties.is_palindrome
    }

    pub fn word_count(&self) -> usize {
        self.properties.word_count
    }
}
