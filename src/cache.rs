//! Bounded least-recently-used memoization of ranked search output.
//!
//! Keys are normalized queries, values the final (sorted, truncated) result
//! list. Recency is the position in an insertion-ordered map: a hit moves the
//! entry to the back, eviction pops the front. The map sits behind a mutex so
//! a `get` or `put` from one thread never interleaves with another's.
//!
//! The cache does not know about the catalog. Whoever swaps the catalog must
//! [`ResultCache::clear`] it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::SearchResult;

/// Number of distinct queries kept by default
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

type Entries = IndexMap<String, Vec<SearchResult>>;

/// Thread-safe LRU cache of search results keyed by query
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache {
    /// Creates a cache holding at most `capacity` queries; 0 disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the results stored for `query` and marks it most recently used.
    pub fn get(&self, query: &str) -> Option<Vec<SearchResult>> {
        let mut entries = self.lock();
        let index = entries.get_index_of(query)?;
        let last = entries.len() - 1;
        entries.move_index(index, last);
        entries.get_index(last).map(|(_, results)| results.clone())
    }

    /// Stores `results` for `query` as the most recently used entry, evicting
    /// the least recently used ones beyond capacity.
    pub fn put(&self, query: impl Into<String>, results: Vec<SearchResult>) {
        if self.capacity == 0 {
            return;
        }

        let query = query.into();
        let mut entries = self.lock();
        entries.shift_remove(&query);
        entries.insert(query, results);
        while entries.len() > self.capacity {
            let Some((evicted, _)) = entries.shift_remove_index(0) else {
                break;
            };
            trace!("cache evicted {evicted:?}");
        }
    }

    /// Returns true if `query` is cached, without touching its recency.
    pub fn contains(&self, query: &str) -> bool {
        self.lock().contains_key(query)
    }

    /// Cached queries from least to most recently used
    pub fn queries(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Drops every cached entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached queries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of cached queries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
