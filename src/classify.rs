use ahash::AHashSet;
use regex::Regex;

/// Sentinel returned when no configured pattern accepts a token.
pub const NO_PARAM: &str = "";

/// Classifies single tokens against the configured parameter patterns.
///
/// Patterns are tried in the order they were configured and the first whose
/// regex matches wins; that order is fixed at construction, so identical
/// inputs always grow identical trees. Patterns use search semantics;
/// anchor with `^...$` to require a full-token match, as the built-in
/// patterns do. A token *is* a placeholder when it equals one of the
/// configured labels verbatim.
#[derive(Debug, Clone)]
pub struct ParamClassifier {
    patterns: Vec<(String, Regex)>,
    labels: AHashSet<String>,
}

impl ParamClassifier {
    pub fn new(patterns: Vec<(String, Regex)>) -> Self {
        let labels = patterns.iter().map(|(label, _)| label.clone()).collect();
        Self { patterns, labels }
    }

    /// First configured label whose pattern matches, or [`NO_PARAM`].
    pub fn classify<'a>(&'a self, token: &str) -> &'a str {
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(token))
            .map_or(NO_PARAM, |(label, _)| label.as_str())
    }

    /// Whether `token` is one of the configured placeholder labels.
    pub fn is_label(&self, token: &str) -> bool {
        self.labels.contains(token)
    }
}
