//! Normalized views of a user query.

/// A query prepared for keyword matching.
///
/// Holds the original text (used when the query itself becomes a search
/// term), the lower-cased text, and a padded form with punctuation folded to
/// single spaces so that `" it "` matches `"IT?"` but not `"item"`.
#[derive(Debug, Clone)]
pub struct QueryText<'a> {
    raw: &'a str,
    lower: String,
    padded: String,
}

impl<'a> QueryText<'a> {
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        let lower = raw.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let padded = format!(" {} ", words.join(" "));
        Self { raw, lower, padded }
    }

    /// The query as the user typed it.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// The query lower-cased, punctuation intact.
    #[must_use]
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Whether `term` occurs in the padded query.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.padded.contains(term)
    }

    /// Whether any of `terms` occurs in the padded query.
    #[must_use]
    pub fn contains_any(&self, terms: &[String]) -> bool {
        terms.iter().any(|t| self.contains(t))
    }

    /// The first of `terms` that occurs in the padded query.
    #[must_use]
    pub fn first_match<'t>(&self, terms: &'t [String]) -> Option<&'t str> {
        terms.iter().find(|t| self.contains(t)).map(String::as_str)
    }

    /// Whitespace-separated words, lower-cased, with leading and trailing
    /// punctuation removed. Words that are only punctuation are dropped.
    pub fn tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.raw
            .split_whitespace()
            .map(normalize_token)
            .filter(|t| !t.is_empty())
    }
}

/// Lower-case a word and trim non-alphanumeric characters from both ends.
#[must_use]
pub fn normalize_token(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
