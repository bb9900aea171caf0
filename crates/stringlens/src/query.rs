//! Free-text query interpretation.
//!
//! Maps phrases such as "single word palindromic strings longer than 3
//! characters" onto a [`FilterSet`] by pattern matching against a closed
//! table of phrase templates (see [`rules`]). No grammar or tokenizer is
//! involved, so negations are not understood: "strings that are not
//! palindromes" still yields `is_palindrome = true`.

pub mod rules;

use crate::filter::FilterSet;

use self::rules::RULE_TABLE;

/// The result of interpreting a phrase along with the rules that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub filters: FilterSet,
    /// `group/rule` names in table order.
    pub matched_rules: Vec<String>,
}

/// Translate `phrase` into filters. Never fails; an empty result means
/// nothing was recognised and callers should reject the query.
pub fn interpret(phrase: &str) -> FilterSet {
    explain(phrase).filters
}

/// Like [`interpret`], also reporting which rule fired in each group.
pub fn explain(phrase: &str) -> Interpretation {
    let normalized = normalize(phrase);
    let mut filters = FilterSet::default();
    let mut matched_rules = Vec::new();

    for group in RULE_TABLE.iter() {
        if let Some((rule, contribution)) = group.first_match(&normalized) {
            contribution.apply(&mut filters);
            matched_rules.push(format!("{}/{}", group.name, rule));
        }
    }

    tracing::debug!(phrase = %normalized, rules = ?matched_rules, "interpreted query");

    Interpretation {
        filters,
        matched_rules,
    }
}

fn normalize(phrase: &str) -> String {
    phrase.trim().to_ascii_lowercase()
}
