use crate::classify::ParamClassifier;
use crate::cluster::{Cluster, ClusterCache};
use crate::similarity::sequence_similarity;
use ahash::AHashMap;

#[derive(Debug, Default)]
struct Node {
    children: AHashMap<String, Node>,
    cluster_ids: Vec<u64>,
}

/// Fixed-depth prefix tree over tokenized lines.
///
/// The first level groups lines by token count; the levels below are keyed
/// by the leading tokens (or their placeholder labels), at most
/// `max_node_depth` of them. Descent stops there and the remaining positions
/// are resolved by similarity against the leaf bucket, so lookup cost is
/// bounded regardless of line length. Fan-out per node is capped at
/// `max_children`, with the last slot reserved for the wildcard branch.
#[derive(Debug)]
pub struct PrefixTree {
    root: Node,
    max_node_depth: usize,
    max_children: usize,
}

impl PrefixTree {
    pub fn new(max_node_depth: usize, max_children: usize) -> Self {
        Self {
            root: Node::default(),
            max_node_depth,
            max_children,
        }
    }

    /// Descends for `tokens` and returns the best-scoring resident cluster
    /// id at the leaf, or `None` when no branch exists or nothing clears
    /// `min_similarity`.
    pub fn search(
        &self,
        tokens: &[String],
        min_similarity: f64,
        include_params: bool,
        classifier: &ParamClassifier,
        clusters: &ClusterCache,
    ) -> Option<u64> {
        let token_count = tokens.len();
        let mut node = self.root.children.get(&token_count.to_string())?;

        // An empty tokenization has nowhere to descend; its bucket holds a
        // single cluster.
        if token_count == 0 {
            return node
                .cluster_ids
                .first()
                .copied()
                .filter(|&id| clusters.peek(id).is_some());
        }

        let mut depth = 1;
        for token in tokens {
            if depth >= self.max_node_depth || depth == token_count {
                break;
            }
            node = match node.children.get(token) {
                Some(child) => child,
                None => node.children.get(classifier.classify(token))?,
            };
            depth += 1;
        }

        fast_match(
            &node.cluster_ids,
            tokens,
            min_similarity,
            include_params,
            classifier,
            clusters,
        )
    }

    /// Adds a freshly created cluster under its template's path, growing
    /// branches within the fan-out budget. The terminal write first drops
    /// bucket ids that no longer resolve in the cache; that write is the
    /// only removal path for evicted-cluster leftovers.
    pub fn insert(
        &mut self,
        cluster: &Cluster,
        classifier: &ParamClassifier,
        clusters: &ClusterCache,
    ) {
        let tokens = cluster.tokens();
        let token_count = tokens.len();
        let mut node = self
            .root
            .children
            .entry(token_count.to_string())
            .or_default();

        if token_count == 0 {
            node.cluster_ids.push(cluster.id());
            return;
        }

        let max_node_depth = self.max_node_depth;
        let max_children = self.max_children;
        let mut depth = 1;
        for token in tokens {
            if depth >= max_node_depth || depth >= token_count {
                node.cluster_ids.retain(|&id| clusters.peek(id).is_some());
                node.cluster_ids.push(cluster.id());
                return;
            }
            node = grow_into(node, token, classifier, max_children);
            depth += 1;
        }
    }
}

/// Child selection for one insertion step, creating branches under the
/// fan-out cap. Tokens containing digits never get a literal branch; they
/// collapse straight into the wildcard.
fn grow_into<'a>(
    node: &'a mut Node,
    token: &str,
    classifier: &ParamClassifier,
    max_children: usize,
) -> &'a mut Node {
    if node.children.contains_key(token) {
        return node
            .children
            .get_mut(token)
            .expect("literal child just observed");
    }

    let wildcard = classifier.classify(token);

    if has_numbers(token) {
        return node.children.entry(wildcard.to_owned()).or_default();
    }

    if node.children.contains_key(wildcard) {
        if node.children.len() < max_children {
            node.children.entry(token.to_owned()).or_default()
        } else {
            node.children
                .get_mut(wildcard)
                .expect("wildcard child just observed")
        }
    } else {
        let fan_out = node.children.len() + 1;
        if fan_out < max_children {
            node.children.entry(token.to_owned()).or_default()
        } else if fan_out == max_children {
            // The last slot goes to the wildcard so novel tokens still have
            // an escape hatch once the node saturates.
            node.children.entry(wildcard.to_owned()).or_default()
        } else {
            unreachable!("node saturated without a wildcard branch")
        }
    }
}

fn has_numbers(token: &str) -> bool {
    token.chars().any(char::is_numeric)
}

/// Best candidate in bucket order by `(similarity, param count)`, earlier
/// candidates winning remaining ties. Evicted ids and foreign lengths are
/// skipped; candidate lookups leave recency alone so a scan of N candidates
/// never reorders the cache.
fn fast_match(
    candidates: &[u64],
    tokens: &[String],
    min_similarity: f64,
    include_params: bool,
    classifier: &ParamClassifier,
    clusters: &ClusterCache,
) -> Option<u64> {
    let mut best = None;
    let mut best_similarity = -1.0_f64;
    let mut best_param_count = -1_i64;

    for &id in candidates {
        let Some(cluster) = clusters.peek(id) else {
            continue;
        };
        if cluster.tokens().len() != tokens.len() {
            continue;
        }
        let (similarity, param_count) =
            sequence_similarity(classifier, cluster.tokens(), tokens, include_params);
        if similarity > best_similarity
            || (similarity == best_similarity && param_count as i64 > best_param_count)
        {
            best_similarity = similarity;
            best_param_count = param_count as i64;
            best = Some(id);
        }
    }

    if best_similarity >= min_similarity {
        best
    } else {
        None
    }
}
