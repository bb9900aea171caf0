//! Query-string parsing for the listing endpoint.

use std::collections::HashMap;

use super::FilterSet;
use crate::error::{CoreError, CoreResult};

pub const INVALID_PARAMS: &str = "Invalid query parameter values or types";

impl FilterSet {
    /// Build a filter set from raw query parameters.
    ///
    /// Unknown keys are ignored. Any recognised key with a malformed value
    /// rejects the whole request.
    pub fn from_params(params: &HashMap<String, String>) -> CoreResult<Self> {
        let mut filters = FilterSet::default();

        if let Some(raw) = params.get("is_palindrome") {
            filters.is_palindrome = Some(match raw.as_str() {
                "true" => true,
                "false" => false,
                _ => return Err(invalid("is_palindrome", raw)),
            });
        }
        if let Some(raw) = params.get("word_count") {
            filters.word_count = Some(parse_count("word_count", raw)?);
        }
        if let Some(raw) = params.get("min_length") {
            filters.min_length = Some(parse_count("min_length", raw)?);
        }
        if let Some(raw) = params.get("max_length") {
            filters.max_length = Some(parse_count("max_length", raw)?);
        }
        if let Some(raw) = params.get("contains_character") {
            let mut chars = raw.chars();
            filters.contains_character = match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => return Err(invalid("contains_character", raw)),
            };
        }

        Ok(filters)
    }
}

fn parse_count(key: &str, raw: &str) -> CoreResult<usize> {
    raw.trim().parse::<usize>().map_err(|_| invalid(key, raw))
}

fn invalid(key: &str, raw: &str) -> CoreError {
    tracing::warn!("rejected filter parameter {key}={raw:?}");
    CoreError::InvalidInput(INVALID_PARAMS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_every_key() {
        let filters = FilterSet::from_params(&params(&[
            ("is_palindrome", "true"),
            ("word_count", "1"),
            ("min_length", "5"),
            ("max_length", "20"),
            ("contains_character", "a"),
        ]))
        .expect("valid params");

        assert_eq!(
            filters,
            FilterSet {
                is_palindrome: Some(true),
                word_count: Some(1),
                min_length: Some(5),
                max_length: Some(20),
                contains_character: Some('a'),
            }
        );
    }

    #[test]
    fn no_params_is_empty() {
        let filters = FilterSet::from_params(&HashMap::new()).expect("valid");
        assert!(filters.is_empty());
    }

    #[test]
    fn unknown_keys_ignored() {
        let filters = FilterSet::from_params(&params(&[("page", "2"), ("is_palindrome", "false")]))
            .expect("valid");
        assert_eq!(filters.is_palindrome, Some(false));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn rejects_non_boolean_palindrome() {
        let err = FilterSet::from_params(&params(&[("is_palindrome", "invalid")]))
            .expect_err("invalid bool");
        assert_eq!(err, CoreError::InvalidInput(INVALID_PARAMS.to_string()));
    }

    #[test]
    fn rejects_non_numeric_and_negative_lengths() {
        assert!(FilterSet::from_params(&params(&[("min_length", "abc")])).is_err());
        assert!(FilterSet::from_params(&params(&[("max_length", "-1")])).is_err());
        assert!(FilterSet::from_params(&params(&[("word_count", "1.5")])).is_err());
    }

    #[test]
    fn contains_character_must_be_one_code_point() {
        assert!(FilterSet::from_params(&params(&[("contains_character", "abc")])).is_err());
        assert!(FilterSet::from_params(&params(&[("contains_character", "")])).is_err());

        let filters = FilterSet::from_params(&params(&[("contains_character", "ñ")]))
            .expect("multi-byte single char");
        assert_eq!(filters.contains_character, Some('ñ'));
    }
}
