use crate::classify::ParamClassifier;
use crate::cluster::{Cluster, ClusterCache};
use crate::config::{ConfigError, MinerConfig};
use crate::similarity::merge_template;
use crate::tree::PrefixTree;

/// Online log template miner.
///
/// Lines go in one at a time through [`train`](Self::train); generalized
/// templates come out as [`Cluster`]s. The miner is a plain single-threaded
/// value; embedders needing shared access wrap it in their own
/// synchronization.
pub struct TemplateMiner {
    config: MinerConfig,
    classifier: ParamClassifier,
    tree: PrefixTree,
    clusters: ClusterCache,
    next_id: u64,
}

impl TemplateMiner {
    pub fn new(config: MinerConfig) -> Result<Self, ConfigError> {
        if config.cluster_depth < 3 {
            return Err(ConfigError::ClusterDepthTooSmall(config.cluster_depth));
        }
        let classifier = ParamClassifier::new(config.param_patterns.clone());
        let tree = PrefixTree::new(config.cluster_depth - 2, config.max_children);
        let clusters = ClusterCache::with_capacity(config.max_clusters);
        Ok(Self {
            config,
            classifier,
            tree,
            clusters,
            next_id: 0,
        })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Learns from one line and returns the cluster it landed in.
    ///
    /// A line similar enough to an existing template of the same length is
    /// folded into it (the template generalizes, the size grows, the cluster
    /// is refreshed in the cache). Anything else becomes a new cluster with
    /// the line's own tokens as its template.
    pub fn train(&mut self, content: &str) -> &Cluster {
        let tokens = self.tokenize(content);

        let id = match self.tree.search(
            &tokens,
            self.config.min_similarity,
            false,
            &self.classifier,
            &self.clusters,
        ) {
            Some(id) => {
                let cluster = self
                    .clusters
                    .touch_mut(id)
                    .expect("matched cluster is resident");
                let merged = merge_template(&self.classifier, cluster.tokens(), &tokens);
                cluster.absorb(merged);
                id
            }
            None => {
                self.next_id += 1;
                let id = self.next_id;
                self.clusters.insert(Cluster::new(id, tokens));
                let fresh = self.clusters.peek(id).expect("fresh cluster is resident");
                self.tree.insert(fresh, &self.classifier, &self.clusters);
                id
            }
        };

        self.clusters.peek(id).expect("trained cluster is resident")
    }

    /// Finds the cluster that matches `content` perfectly: every position
    /// either literal-equal or a placeholder slot. Read-only: the tree, the
    /// cache contents, and the recency order are all left untouched.
    pub fn match_line(&self, content: &str) -> Option<&Cluster> {
        let tokens = self.tokenize(content);
        let id = self
            .tree
            .search(&tokens, 1.0, true, &self.classifier, &self.clusters)?;
        self.clusters.peek(id)
    }

    /// Snapshot of the live clusters, least recently used first.
    pub fn clusters(&self) -> Vec<&Cluster> {
        self.clusters.values()
    }

    fn tokenize(&self, content: &str) -> Vec<String> {
        if self.config.extra_delimiters.is_empty() {
            return (self.config.tokenizer)(content);
        }
        let mut normalized = content.to_owned();
        for delimiter in &self.config.extra_delimiters {
            normalized = normalized.replace(delimiter.as_str(), " ");
        }
        (self.config.tokenizer)(&normalized)
    }
}
