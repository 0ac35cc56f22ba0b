//! Noun lemmatizer: irregular-form table, then WordNet-style suffix detachment.
//!
//! Every token is treated as a noun. Without a full dictionary the suffix rules are guarded
//! so that words which only look plural ("business", "status", "analysis") are left alone.

use std::collections::HashMap;

/// Irregular plurals and invariant nouns, checked before any suffix rule.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("media", "medium"),
    ("curricula", "curriculum"),
    ("alumni", "alumnus"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("physics", "physics"),
    ("mathematics", "mathematics"),
    ("economics", "economics"),
    ("statistics", "statistics"),
    ("analytics", "analytics"),
    ("logistics", "logistics"),
    ("graphics", "graphics"),
    ("electronics", "electronics"),
    ("robotics", "robotics"),
    ("linguistics", "linguistics"),
    ("ethics", "ethics"),
];

/// Names and singular nouns ending in "s" that no suffix rule may touch.
const INVARIANT_TERMS: &[&str] = &[
    "kubernetes", "jenkins", "postgres", "devops", "devsecops", "mlops", "gitops", "dataops",
    "aiops", "finops", "secops", "macos", "ipados", "watchos", "tvos", "centos", "chromeos",
    "webos", "pandas", "keras", "rails", "canvas", "atlas", "alias", "bias", "https",
];

/// Singular nouns ending in "ie", whose plural "-ies" must not become "-y".
const IE_SINGULARS: &[&str] = &[
    "movie", "cookie", "rookie", "selfie", "hoodie", "smoothie", "calorie", "zombie", "newbie",
    "goalie", "brownie", "prairie", "genie", "freebie", "pixie", "sortie", "techie", "foodie",
    "indie", "junkie",
];

/// Endings where "es" is the plural marker rather than part of the stem.
const ES_PLURAL_ENDINGS: &[&str] = &[
    "sses", "tches", "nches", "rches", "oaches", "shes", "xes", "zzes",
];

/// Endings that look plural but are singular.
const SINGULAR_S_ENDINGS: &[&str] = &["ss", "us", "is"];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
}

impl Lemmatizer {
    pub fn english() -> Self {
        let invariants = INVARIANT_TERMS.iter().map(|&term| (term, term));
        Self::with_irregular_forms(IRREGULAR_FORMS.iter().copied().chain(invariants))
    }

    pub fn with_irregular_forms<'a>(forms: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            irregular: forms
                .into_iter()
                .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect(),
        }
    }

    /// Returns the dictionary base form of `word`, or `word` unchanged.
    /// Expects lowercase alphabetic input.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return lemma.clone();
        }

        // Short words ("gas", "bus", "yes") are too ambiguous to strip.
        if word.chars().count() <= 3 || !word.ends_with('s') {
            return word.to_string();
        }

        // No English plural ends in "js"; these are library names ("nodejs", "reactjs").
        if word.ends_with("js") || SINGULAR_S_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }

        if word.chars().count() > 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                let singular = &word[..word.len() - 1];
                if IE_SINGULARS.contains(&singular) {
                    return singular.to_string();
                }
                return format!("{stem}y");
            }
        }

        if ES_PLURAL_ENDINGS.iter().any(|e| word.ends_with(e)) {
            if let Some(stem) = word.strip_suffix("es") {
                return stem.to_string();
            }
        }

        word.strip_suffix('s').unwrap_or(word).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::english().lemmatize(word)
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemma("engineers"), "engineer");
        assert_eq!(lemma("systems"), "system");
        assert_eq!(lemma("databases"), "database");
        assert_eq!(lemma("services"), "service");
    }

    #[test]
    fn test_ies_becomes_y() {
        assert_eq!(lemma("technologies"), "technology");
        assert_eq!(lemma("companies"), "company");
    }

    #[test]
    fn test_es_plural_endings() {
        assert_eq!(lemma("processes"), "process");
        assert_eq!(lemma("branches"), "branch");
        assert_eq!(lemma("approaches"), "approach");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("caches"), "cache");
    }

    #[test]
    fn test_singular_s_endings_untouched() {
        assert_eq!(lemma("business"), "business");
        assert_eq!(lemma("status"), "status");
        assert_eq!(lemma("analysis"), "analysis");
    }

    #[test]
    fn test_irregular_forms_win() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("data"), "datum");
        assert_eq!(lemma("series"), "series");
        assert_eq!(lemma("analytics"), "analytics");
        assert_eq!(lemma("kubernetes"), "kubernetes");
    }

    #[test]
    fn test_non_plural_and_short_words_unchanged() {
        assert_eq!(lemma("python"), "python");
        assert_eq!(lemma("gas"), "gas");
        assert_eq!(lemma("backend"), "backend");
    }

    #[test]
    fn test_technology_names_are_fixed_points() {
        for name in ["devops", "macos", "canvas", "pandas", "jenkins", "postgres", "mlops"] {
            assert_eq!(lemma(name), name);
        }
    }

    #[test]
    fn test_js_library_names_unchanged() {
        assert_eq!(lemma("nodejs"), "nodejs");
        assert_eq!(lemma("reactjs"), "reactjs");
        assert_eq!(lemma("vuejs"), "vuejs");
    }

    #[test]
    fn test_ies_nouns_with_ie_singular() {
        assert_eq!(lemma("movies"), "movie");
        assert_eq!(lemma("cookies"), "cookie");
        assert_eq!(lemma("rookies"), "rookie");
        assert_eq!(lemma("libraries"), "library");
    }

    #[test]
    fn test_custom_irregular_table() {
        let lemmatizer = Lemmatizer::with_irregular_forms([("oxen", "ox")]);
        assert_eq!(lemmatizer.lemmatize("oxen"), "ox");
        assert_eq!(lemmatizer.lemmatize("children"), "children");
    }
}
