//! Language resources for the topic pipeline: the exclusion set and the lemmatizer.
//!
//! Built once at startup and shared read-only across requests (`Arc<LanguageResources>`).
//! Tests substitute small explicit stopword sets through `with_base_stopwords`.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::topics::lemmatizer::Lemmatizer;

/// Resume boilerplate that carries no signal about the candidate's role.
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "resume",
    "experience",
    "work",
    "job",
    "position",
    "role",
    "company",
    "skills",
    "responsibilities",
    "summary",
];

/// Calendar month names and their common abbreviations.
pub const MONTHS: &[&str] = &[
    "january", "jan", "february", "feb", "march", "mar", "april", "apr", "may", "june", "jun",
    "july", "jul", "august", "aug", "september", "sep", "october", "oct", "november", "nov",
    "december", "dec",
];

/// Geographic and administrative nouns that show up in address lines.
pub const LOCATION_TERMS: &[&str] = &[
    "province",
    "city",
    "state",
    "country",
    "region",
    "district",
    "area",
    "village",
    "municipality",
    "town",
    "location",
    "zipcode",
    "barangay",
];

/// Immutable handle over everything the normalizer needs to look up.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    excluded: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl LanguageResources {
    /// English resources: the NLTK English stopword list (which already carries the contraction
    /// fragments "don", "t", "ll", ...) plus the resume-specific exclusions.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_base_stopwords(stop_words)
    }

    /// Resources over a caller-supplied base stopword list.
    /// The domain, month and location sets are always added on top.
    pub fn with_base_stopwords<I, S>(base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded: HashSet<String> = base
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        for list in [DOMAIN_STOPWORDS, MONTHS, LOCATION_TERMS] {
            excluded.extend(list.iter().map(|w| w.to_string()));
        }

        Self {
            excluded,
            lemmatizer: Lemmatizer::english(),
        }
    }

    pub fn is_excluded(&self, token: &str) -> bool {
        self.excluded.contains(token)
    }

    pub fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_sets_always_excluded() {
        let resources = LanguageResources::with_base_stopwords(Vec::<String>::new());
        for word in DOMAIN_STOPWORDS.iter().chain(MONTHS).chain(LOCATION_TERMS) {
            assert!(resources.is_excluded(word), "{word} should be excluded");
        }
    }

    #[test]
    fn test_base_stopwords_are_lowercased_and_trimmed() {
        let resources = LanguageResources::with_base_stopwords([" The ", "AND", ""]);
        assert!(resources.is_excluded("the"));
        assert!(resources.is_excluded("and"));
        assert!(!resources.is_excluded(""));
    }

    #[test]
    fn test_english_contains_common_function_words() {
        let resources = LanguageResources::english();
        for word in ["the", "and", "of", "a"] {
            assert!(resources.is_excluded(word), "{word} should be a stopword");
        }
        assert!(!resources.is_excluded("python"));
    }

    #[test]
    fn test_twelve_months_covered() {
        let full_names = MONTHS.iter().filter(|m| m.len() > 3 || **m == "may").count();
        assert_eq!(full_names, 12);
    }

    #[test]
    fn test_excluded_count_counts_union_once() {
        let resources = LanguageResources::with_base_stopwords(["resume", "city"]);
        let expected = DOMAIN_STOPWORDS.len() + MONTHS.len() + LOCATION_TERMS.len();
        assert_eq!(resources.excluded_count(), expected);
    }

    #[test]
    fn test_english_keeps_role_vocabulary() {
        let resources = LanguageResources::english();
        for word in [
            "web",
            "computer",
            "system",
            "information",
            "research",
            "test",
            "group",
            "member",
            "problem",
            "value",
        ] {
            assert!(!resources.is_excluded(word), "{word} should survive");
        }
    }

    #[test]
    fn test_english_list_is_compact() {
        let resources = LanguageResources::english();
        let added = DOMAIN_STOPWORDS.len() + MONTHS.len() + LOCATION_TERMS.len();
        assert!(resources.excluded_count() < 200 + added);
        for fragment in ["don", "t", "ll", "ve", "wouldn"] {
            assert!(resources.is_excluded(fragment), "{fragment} should be a stopword");
        }
    }
}
