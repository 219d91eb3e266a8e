//! Route resolution caching
//!
//! Caches the outcome of matching a path against the route table, misses
//! included, with LRU eviction. The router clears it whenever routes are
//! added.

use crate::matcher::RouteMatch;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Path match cache with LRU eviction
#[derive(Debug)]
pub struct RouteCache {
    matches: LruCache<String, Option<RouteMatch>>,
    stats: CacheStats,
}

impl RouteCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            matches: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing route cache");
        self.matches.clear();
        self.stats.invalidations += 1;
    }

    /// Look up a path; the outer `None` is a cache miss
    pub fn get(&mut self, path: &str) -> Option<Option<RouteMatch>> {
        if let Some(entry) = self.matches.get(path) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for path: '{}'", path);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for path: '{}'", path);
            None
        }
    }

    pub fn insert(&mut self, path: String, result: Option<RouteMatch>) {
        self.matches.push(path, result);
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}
