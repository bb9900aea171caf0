//! Structured filters over stored records.
//!
//! A [`FilterSet`] is produced either from query-string parameters
//! ([`FilterSet::from_params`]) or by the free-text interpreter
//! ([`crate::query::interpret`]). Both paths are applied by [`execute`].

mod params;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::record::AnalyzedRecord;

/// Typed constraints; absent keys impose nothing and present keys are ANDed.
///
/// Field order is the serialised key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Inclusive lower bound on length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Inclusive upper bound on length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub contains_character: Option<char>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        usize::from(self.is_palindrome.is_some())
            + usize::from(self.word_count.is_some())
            + usize::from(self.min_length.is_some())
            + usize::from(self.max_length.is_some())
            + usize::from(self.contains_character.is_some())
    }

    /// True when the length bounds exclude every possible record.
    pub fn has_conflicting_bounds(&self) -> bool {
        matches!((self.min_length, self.max_length), (Some(min), Some(max)) if min > max)
    }

    /// Whether `record` satisfies every present constraint.
    ///
    /// `contains_character` is a substring test against the stored value.
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        self.is_palindrome
            .map_or(true, |wanted| record.is_palindrome() == wanted)
            && self
                .word_count
                .map_or(true, |wanted| record.word_count() == wanted)
            && self.min_length.map_or(true, |min| record.length() >= min)
            && self.max_length.map_or(true, |max| record.length() <= max)
            && self
                .contains_character
                .map_or(true, |ch| record.value.contains(ch))
    }
}

/// Keep the records matching `filters`, preserving their relative order.
pub fn execute(filters: &FilterSet, records: Vec<AnalyzedRecord>) -> Vec<AnalyzedRecord> {
    records
        .into_iter()
        .filter(|record| filters.matches(record))
        .collect()
}
