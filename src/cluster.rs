use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// A learned template plus bookkeeping: a unique id and how many lines the
/// cluster has absorbed. The template mixes literal tokens with placeholder
/// labels; its length is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    id: u64,
    size: u64,
    tokens: Vec<String>,
}

impl Cluster {
    pub(crate) fn new(id: u64, tokens: Vec<String>) -> Self {
        Self { id, size: 1, tokens }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of lines folded into this cluster.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The template tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Replaces the template with its merged successor and counts the line.
    pub(crate) fn absorb(&mut self, merged: Vec<String>) {
        debug_assert_eq!(merged.len(), self.tokens.len());
        self.tokens = merged;
        self.size += 1;
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={{{}}} : size={{{}}} : {}",
            self.id,
            self.size,
            self.tokens.join(" ")
        )
    }
}

/// Bounded LRU over cluster id → cluster; a bound of zero keeps everything.
///
/// The cache exclusively owns cluster records. Tree leaves hold plain ids
/// into it, so eviction is silent: resolving a stale id simply comes back
/// empty and the leaf prunes it on its next write.
pub struct ClusterCache {
    entries: LruCache<u64, Cluster>,
}

impl ClusterCache {
    pub fn with_capacity(max_clusters: usize) -> Self {
        let entries = match NonZeroUsize::new(max_clusters) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    /// Inserts keyed by the cluster's id, evicting the least recently used
    /// entry when full.
    pub fn insert(&mut self, cluster: Cluster) {
        self.entries.put(cluster.id(), cluster);
    }

    /// Recency-touching lookup, for the winner of a training round.
    pub fn touch_mut(&mut self, id: u64) -> Option<&mut Cluster> {
        self.entries.get_mut(&id)
    }

    /// Recency-neutral lookup, for candidate scans and read-only callers.
    pub fn peek(&self, id: u64) -> Option<&Cluster> {
        self.entries.peek(&id)
    }

    /// Current contents, least recently used first, recency untouched.
    pub fn values(&self) -> Vec<&Cluster> {
        self.entries.iter().rev().map(|(_, cluster)| cluster).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: u64, raw: &[&str]) -> Cluster {
        Cluster::new(id, raw.iter().map(|t| (*t).to_owned()).collect())
    }

    #[test]
    fn display_format_is_pinned() {
        let mut c = cluster(1, &["connected", "to", "{ip}"]);
        c.absorb(c.tokens().to_vec());
        c.absorb(c.tokens().to_vec());
        assert_eq!(c.to_string(), "id={1} : size={3} : connected to {ip}");
    }

    #[test]
    fn overflow_evicts_the_least_recently_used() {
        let mut cache = ClusterCache::with_capacity(2);
        cache.insert(cluster(1, &["a"]));
        cache.insert(cluster(2, &["b"]));
        cache.insert(cluster(3, &["c"]));
        assert!(cache.peek(1).is_none());
        assert!(cache.peek(2).is_some());
        assert!(cache.peek(3).is_some());
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = ClusterCache::with_capacity(2);
        cache.insert(cluster(1, &["a"]));
        cache.insert(cluster(2, &["b"]));
        assert!(cache.peek(1).is_some());
        cache.insert(cluster(3, &["c"]));
        assert!(cache.peek(1).is_none(), "peek must not refresh recency");
    }

    #[test]
    fn touch_promotes() {
        let mut cache = ClusterCache::with_capacity(2);
        cache.insert(cluster(1, &["a"]));
        cache.insert(cluster(2, &["b"]));
        assert!(cache.touch_mut(1).is_some());
        cache.insert(cluster(3, &["c"]));
        assert!(cache.peek(1).is_some());
        assert!(cache.peek(2).is_none());
    }

    #[test]
    fn values_enumerate_least_recently_used_first() {
        let mut cache = ClusterCache::with_capacity(3);
        cache.insert(cluster(1, &["a"]));
        cache.insert(cluster(2, &["b"]));
        cache.insert(cluster(3, &["c"]));
        assert!(cache.touch_mut(1).is_some());
        let ids: Vec<u64> = cache.values().iter().map(|c| c.id()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn zero_bound_keeps_everything() {
        let mut cache = ClusterCache::with_capacity(0);
        for id in 1..=1000 {
            cache.insert(cluster(id, &["x"]));
        }
        assert_eq!(cache.len(), 1000);
        assert!(cache.peek(1).is_some());
    }
}
