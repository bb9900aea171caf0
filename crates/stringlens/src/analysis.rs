//! Derived string properties.
//!
//! Everything here is pure and counts Unicode code points, never bytes, so a
//! value produces the same properties however it was encoded on the wire.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::record::{AnalyzedRecord, StringProperties};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Lowercase hex SHA-256 of `value`; the primary key of its record.
pub fn content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute every derived property of `value`.
pub fn analyze(value: &str) -> StringProperties {
    let mut character_frequency_map: BTreeMap<String, usize> = BTreeMap::new();
    for ch in value.chars() {
        *character_frequency_map.entry(ch.to_string()).or_insert(0) += 1;
    }

    StringProperties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: value.chars().collect::<HashSet<_>>().len(),
        word_count: word_count(value),
        sha256_hash: content_hash(value),
        character_frequency_map,
    }
}

/// Analyse `value` into a record stamped with `created_at`.
pub fn build_record(value: &str, created_at: DateTime<Utc>) -> AnalyzedRecord {
    let properties = analyze(value);
    AnalyzedRecord {
        id: properties.sha256_hash.clone(),
        value: value.to_string(),
        properties,
        created_at,
    }
}

fn is_palindrome(value: &str) -> bool {
    let folded: Vec<char> = value.to_lowercase().chars().collect();
    folded.iter().eq(folded.iter().rev())
}

fn word_count(value: &str) -> usize {
    WORD.find_iter(value).count()
}
