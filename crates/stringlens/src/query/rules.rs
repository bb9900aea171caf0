//! The interpreter's rule table.
//!
//! Rules are grouped by the filter key they produce. Within a group the rules
//! are listed in priority order and only the first one that fires contributes;
//! groups are independent of each other. Length bounds form two groups so a
//! phrase can carry both a lower and an upper bound.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::filter::FilterSet;

/// A single key/value produced by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    Palindrome(bool),
    WordCount(usize),
    MinLength(usize),
    MaxLength(usize),
    ContainsCharacter(char),
}

impl Contribution {
    pub fn apply(self, filters: &mut FilterSet) {
        match self {
            Contribution::Palindrome(value) => filters.is_palindrome = Some(value),
            Contribution::WordCount(value) => filters.word_count = Some(value),
            Contribution::MinLength(value) => filters.min_length = Some(value),
            Contribution::MaxLength(value) => filters.max_length = Some(value),
            Contribution::ContainsCharacter(value) => filters.contains_character = Some(value),
        }
    }
}

type Extractor = fn(&Captures<'_>) -> Option<Contribution>;

/// A pattern paired with the contribution it extracts. A rule fires only when
/// the pattern matches and the extractor yields a value.
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, extract: Extractor) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("rule patterns are valid"),
            extract,
        }
    }

    /// Try this rule against an already normalised phrase.
    pub fn fire(&self, phrase: &str) -> Option<Contribution> {
        self.pattern
            .captures(phrase)
            .and_then(|caps| (self.extract)(&caps))
    }
}

pub struct RuleGroup {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    /// First firing rule in priority order, with its name.
    pub fn first_match(&self, phrase: &str) -> Option<(&'static str, Contribution)> {
        self.rules
            .iter()
            .find_map(|rule| rule.fire(phrase).map(|contribution| (rule.name, contribution)))
    }
}

pub static RULE_TABLE: LazyLock<Vec<RuleGroup>> = LazyLock::new(build_table);

fn build_table() -> Vec<RuleGroup> {
    vec![
        RuleGroup {
            name: "is_palindrome",
            rules: vec![Rule::new("palindrome_stem", r"palindrom", |_| {
                Some(Contribution::Palindrome(true))
            })],
        },
        RuleGroup {
            name: "word_count",
            rules: vec![
                Rule::new("single_or_one_word", r"single word|one word", |_| {
                    Some(Contribution::WordCount(1))
                }),
                Rule::new("numeral_words", r"(\d+)\s+words?", |caps| {
                    number(caps).map(Contribution::WordCount)
                }),
                Rule::new(
                    "spelled_words",
                    r"\b(two|three|four|five)\s+words?",
                    |caps| spelled_number(caps).map(Contribution::WordCount),
                ),
            ],
        },
        RuleGroup {
            name: "min_length",
            rules: vec![
                Rule::new("longer_than", r"longer than (\d+)", |caps| {
                    number(caps).map(|n| Contribution::MinLength(n.saturating_add(1)))
                }),
                Rule::new("more_than_characters", r"more than (\d+) characters?", |caps| {
                    number(caps).map(|n| Contribution::MinLength(n.saturating_add(1)))
                }),
                Rule::new("at_least_characters", r"at least (\d+) characters?", |caps| {
                    number(caps).map(Contribution::MinLength)
                }),
            ],
        },
        RuleGroup {
            name: "max_length",
            rules: vec![
                Rule::new("shorter_than", r"shorter than (\d+)", |caps| {
                    number(caps).map(|n| Contribution::MaxLength(n.saturating_sub(1)))
                }),
                Rule::new("less_than_characters", r"less than (\d+) characters?", |caps| {
                    number(caps).map(|n| Contribution::MaxLength(n.saturating_sub(1)))
                }),
            ],
        },
        RuleGroup {
            name: "contains_character",
            rules: vec![
                Rule::new("containing_letter", r"containing.*letter ([a-z])", letter),
                Rule::new("contain_letter", r"contain.*letter ([a-z])", letter),
                Rule::new("with_letter", r"with.*letter ([a-z])", letter),
                Rule::new("have_letter", r"have.*letter ([a-z])", letter),
                Rule::new("the_letter", r"the letter ([a-z])", letter),
                Rule::new("letter", r"letter ([a-z])", letter),
                Rule::new("first_vowel", r"first vowel", |_| {
                    Some(Contribution::ContainsCharacter('a'))
                }),
                Rule::new("vowel_a", r"vowel a", |_| {
                    Some(Contribution::ContainsCharacter('a'))
                }),
            ],
        },
    ]
}

// Numerals too large for usize do not fire, letting lower-priority rules try.
fn number(caps: &Captures<'_>) -> Option<usize> {
    caps.get(1)?.as_str().parse().ok()
}

fn spelled_number(caps: &Captures<'_>) -> Option<usize> {
    match caps.get(1)?.as_str() {
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        _ => None,
    }
}

fn letter(caps: &Captures<'_>) -> Option<Contribution> {
    caps.get(1)?
        .as_str()
        .chars()
        .next()
        .map(Contribution::ContainsCharacter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> &'static RuleGroup {
        RULE_TABLE
            .iter()
            .find(|group| group.name == name)
            .expect("group exists")
    }

    #[test]
    fn table_covers_every_filter_key() {
        let names: Vec<&str> = RULE_TABLE.iter().map(|group| group.name).collect();
        assert_eq!(
            names,
            vec![
                "is_palindrome",
                "word_count",
                "min_length",
                "max_length",
                "contains_character"
            ]
        );
    }

    #[test]
    fn word_count_priority_order() {
        let order: Vec<&str> = group("word_count").rules.iter().map(|r| r.name).collect();
        assert_eq!(order, vec!["single_or_one_word", "numeral_words", "spelled_words"]);
    }

    #[test]
    fn contains_character_priority_order() {
        let order: Vec<&str> = group("contains_character")
            .rules
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            order,
            vec![
                "containing_letter",
                "contain_letter",
                "with_letter",
                "have_letter",
                "the_letter",
                "letter",
                "first_vowel",
                "vowel_a"
            ]
        );
    }

    #[test]
    fn overflowing_numeral_falls_through() {
        let phrase = "99999999999999999999999999 words or three words";
        assert_eq!(
            group("word_count").first_match(phrase),
            Some(("spelled_words", Contribution::WordCount(3)))
        );
    }

    #[test]
    fn length_adjustments() {
        assert_eq!(
            group("min_length").first_match("longer than 10"),
            Some(("longer_than", Contribution::MinLength(11)))
        );
        assert_eq!(
            group("min_length").first_match("at least 10 characters"),
            Some(("at_least_characters", Contribution::MinLength(10)))
        );
        assert_eq!(
            group("max_length").first_match("less than 10 characters"),
            Some(("less_than_characters", Contribution::MaxLength(9)))
        );
        assert_eq!(
            group("max_length").first_match("shorter than 0"),
            Some(("shorter_than", Contribution::MaxLength(0)))
        );
    }

    #[test]
    fn apply_sets_matching_key() {
        let mut filters = FilterSet::default();
        Contribution::ContainsCharacter('q').apply(&mut filters);
        Contribution::MaxLength(4).apply(&mut filters);
        assert_eq!(filters.contains_character, Some('q'));
        assert_eq!(filters.max_length, Some(4));
        assert_eq!(filters.len(), 2);
    }
}
