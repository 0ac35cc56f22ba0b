//! Text normalizer: raw resume text -> ordered stream of alphabetic lemmas.

use std::sync::Arc;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::topics::resources::LanguageResources;

pub struct Normalizer {
    resources: Arc<LanguageResources>,
    digit_runs: Regex,
    non_word_runs: Regex,
}

impl Normalizer {
    pub fn new(resources: Arc<LanguageResources>) -> Result<Self, regex::Error> {
        Ok(Self {
            resources,
            digit_runs: Regex::new(r"\d+")?,
            non_word_runs: Regex::new(r"\W+")?,
        })
    }

    /// Lowercases, drops digit runs, collapses non-word runs to a single space, segments into
    /// words and keeps the lemmas of purely alphabetic, non-excluded tokens in source order.
    ///
    /// Punctuation-only separators are dropped before segmentation, so "node.js" becomes the
    /// two tokens "node" and "js".
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let without_digits = self.digit_runs.replace_all(&lowered, "");
        let spaced = self.non_word_runs.replace_all(&without_digits, " ");

        spaced
            .unicode_words()
            .filter(|token| is_alphabetic(token) && !self.resources.is_excluded(token))
            .map(|token| self.resources.lemmatize(token))
            // a plural can lemmatize onto an excluded word ("jobs" -> "job")
            .filter(|lemma| !self.resources.is_excluded(lemma))
            .collect()
    }
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
