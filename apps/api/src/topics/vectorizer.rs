//! Bounded-vocabulary TF-IDF vectorizer.
//!
//! Algorithm:
//! 1. Analyze each chunk into terms of two or more word characters.
//! 2. Rank terms by total corpus count (descending, ties broken lexically) and keep the top
//!    `max_features`. Column indices follow lexical order of the kept terms.
//! 3. Cell = raw count × smoothed IDF, where idf = ln((1 + n) / (1 + df)) + 1.
//! 4. Each row is L2-normalized; an all-zero row stays zero.

use std::collections::{BTreeMap, HashMap};

use crate::topics::TopicError;

/// Vocabulary cap used by the topic endpoint.
pub const DEFAULT_MAX_FEATURES: usize = 2000;

/// Dense chunk × term matrix of TF-IDF weights.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTermMatrix {
    terms: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DocumentTermMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.terms.len()
    }

    /// No surviving terms: nothing to model.
    pub fn is_degenerate(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column labels; `terms()[j]` names column `j`.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[cfg(test)]
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }
}

/// Builds the TF-IDF matrix for `chunks`, keeping at most `max_features` columns.
pub fn vectorize<S: AsRef<str>>(
    chunks: &[S],
    max_features: usize,
) -> Result<DocumentTermMatrix, TopicError> {
    if max_features == 0 {
        return Err(TopicError::InvalidMaxFeatures(max_features));
    }

    let counts: Vec<HashMap<&str, u32>> = chunks
        .iter()
        .map(|chunk| {
            let mut doc = HashMap::new();
            for term in analyze(chunk.as_ref()) {
                *doc.entry(term).or_insert(0) += 1;
            }
            doc
        })
        .collect();

    // BTreeMap keeps the corpus tally in lexical order so the ranking below is deterministic.
    let mut corpus: BTreeMap<&str, (u64, u32)> = BTreeMap::new();
    for doc in &counts {
        for (&term, &count) in doc {
            let entry = corpus.entry(term).or_insert((0, 0));
            entry.0 += u64::from(count);
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<(&str, u64, u32)> = corpus
        .into_iter()
        .map(|(term, (total, df))| (term, total, df))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);
    ranked.sort_by(|a, b| a.0.cmp(b.0));

    let n_docs = counts.len() as f64;
    let idf: Vec<f64> = ranked
        .iter()
        .map(|&(_, _, df)| ((1.0 + n_docs) / (1.0 + f64::from(df))).ln() + 1.0)
        .collect();

    let rows = counts
        .iter()
        .map(|doc| {
            let mut row: Vec<f64> = ranked
                .iter()
                .zip(&idf)
                .map(|(&(term, _, _), &w)| doc.get(term).map_or(0.0, |&c| f64::from(c) * w))
                .collect();
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
            row
        })
        .collect();

    Ok(DocumentTermMatrix {
        terms: ranked.into_iter().map(|(term, _, _)| term.to_string()).collect(),
        rows,
    })
}

/// Splits on whitespace and keeps terms of at least two word characters.
fn analyze(chunk: &str) -> impl Iterator<Item = &str> {
    chunk.split_whitespace().filter(|term| {
        term.chars().count() >= 2 && term.chars().all(|c| c.is_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_corpus_is_degenerate() {
        let matrix = vectorize::<String>(&[], DEFAULT_MAX_FEATURES).unwrap();
        assert!(matrix.is_degenerate());
        assert_eq!(matrix.n_rows(), 0);
    }

    #[test]
    fn test_single_letter_terms_are_ignored() {
        let matrix = vectorize(&["b c e f g h j k"], DEFAULT_MAX_FEATURES).unwrap();
        assert!(matrix.is_degenerate());
        assert_eq!(matrix.n_rows(), 1);
    }

    #[test]
    fn test_zero_max_features_is_rejected() {
        let result = vectorize(&["rust python"], 0);
        assert!(matches!(result, Err(TopicError::InvalidMaxFeatures(0))));
    }

    #[test]
    fn test_columns_are_lexically_ordered() {
        let matrix = vectorize(&["zeta alpha mid", "alpha"], 10).unwrap();
        assert_eq!(matrix.terms(), ["alpha", "mid", "zeta"]);
        assert_eq!(matrix.column_of("mid"), Some(1));
        assert_eq!(matrix.column_of("absent"), None);
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let matrix = vectorize(&["rust rust python", "python sql"], 10).unwrap();
        for row in matrix.rows() {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < EPS);
            assert!(row.iter().all(|v| *v >= 0.0));
        }
    }

    #[test]
    fn test_rarer_terms_get_higher_idf() {
        // "python" is in both docs, "rust" only in the first; equal raw counts in doc 0.
        let matrix = vectorize(&["rust python", "python"], 10).unwrap();
        let rust = matrix.column_of("rust").unwrap();
        let python = matrix.column_of("python").unwrap();
        assert!(matrix.rows()[0][rust] > matrix.rows()[0][python]);
    }

    #[test]
    fn test_single_document_weights_follow_counts() {
        let matrix = vectorize(&["rust rust python"], 10).unwrap();
        let row = &matrix.rows()[0];
        let rust = row[matrix.column_of("rust").unwrap()];
        let python = row[matrix.column_of("python").unwrap()];
        assert!((rust - 2.0 / 5f64.sqrt()).abs() < EPS);
        assert!((python - 1.0 / 5f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_vocabulary_cap_keeps_most_frequent() {
        let chunks = ["aa aa aa bb bb cc dd", "aa bb ee"];
        let matrix = vectorize(&chunks, 2).unwrap();
        assert_eq!(matrix.terms(), ["aa", "bb"]);
        assert_eq!(matrix.n_cols(), 2);
    }

    #[test]
    fn test_vocabulary_cap_breaks_ties_lexically() {
        let matrix = vectorize(&["dd cc bb aa"], 3).unwrap();
        assert_eq!(matrix.terms(), ["aa", "bb", "cc"]);
    }

    #[test]
    fn test_large_corpus_hits_cap_exactly() {
        let words: Vec<String> = (0..2500).map(|i| format!("term{i:04}x")).collect();
        let chunks: Vec<String> = words.chunks(100).map(|c| c.join(" ")).collect();
        let matrix = vectorize(&chunks, DEFAULT_MAX_FEATURES).unwrap();
        assert_eq!(matrix.n_cols(), DEFAULT_MAX_FEATURES);
        assert_eq!(matrix.n_rows(), 25);
    }
}
