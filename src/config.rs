use crate::tokenize::{space_tokenizer, Tokenizer};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Pattern paired with the `*` label in the default configuration.
static CATCH_ALL: Lazy<Regex> = Lazy::new(|| Regex::new(".*").unwrap());

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cluster depth must be at least 3, got {0}")]
    ClusterDepthTooSmall(usize),
    #[error("invalid parameter pattern for label {label:?}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}

/// Knobs for a [`TemplateMiner`](crate::miner::TemplateMiner). Immutable once
/// the miner is constructed.
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Total tree depth; must be at least 3. Descent walks at most
    /// `cluster_depth - 2` token levels below the token-count level.
    pub cluster_depth: usize,
    /// Similarity a line must reach to join an existing cluster.
    pub min_similarity: f64,
    /// Fan-out cap per tree node; the last slot is reserved for the
    /// wildcard branch.
    pub max_children: usize,
    /// Cluster cache bound; 0 keeps every cluster.
    pub max_clusters: usize,
    /// Strings replaced by a space before tokenization.
    pub extra_delimiters: Vec<String>,
    /// Ordered `(label, pattern)` pairs; classification tries them in this
    /// order.
    pub param_patterns: Vec<(String, Regex)>,
    pub tokenizer: Tokenizer,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            cluster_depth: 4,
            min_similarity: 0.4,
            max_children: 100,
            max_clusters: 0,
            extra_delimiters: Vec::new(),
            param_patterns: vec![("*".to_owned(), CATCH_ALL.clone())],
            tokenizer: space_tokenizer,
        }
    }
}

impl MinerConfig {
    /// Defaults with the tokenizer and compiled `(label, pattern)` pairs
    /// replaced. Pattern order is preserved.
    pub fn new(tokenizer: Tokenizer, param_patterns: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(param_patterns.len());
        for (label, source) in param_patterns {
            let regex = Regex::new(source).map_err(|source| ConfigError::InvalidPattern {
                label: (*label).to_owned(),
                source,
            })?;
            compiled.push(((*label).to_owned(), regex));
        }
        Ok(Self {
            tokenizer,
            param_patterns: compiled,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_carries_the_catch_all() {
        let config = MinerConfig::default();
        assert_eq!(config.cluster_depth, 4);
        assert_eq!(config.min_similarity, 0.4);
        assert_eq!(config.max_children, 100);
        assert_eq!(config.max_clusters, 0);
        assert!(config.extra_delimiters.is_empty());
        assert_eq!(config.param_patterns.len(), 1);
        assert_eq!(config.param_patterns[0].0, "*");
    }

    #[test]
    fn patterns_compile_in_order() {
        let config = MinerConfig::new(
            space_tokenizer,
            &[("{ip}", r"^(?:\d{1,3}\.){3}\d{1,3}$"), ("{name}", r"^\w+$")],
        )
        .unwrap();
        let labels: Vec<&str> = config
            .param_patterns
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, ["{ip}", "{name}"]);
    }

    #[test]
    fn malformed_pattern_is_rejected_with_its_label() {
        let err = MinerConfig::new(space_tokenizer, &[("{bad}", "(")]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { label, .. } => assert_eq!(label, "{bad}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
