//! This module contains the search coordinator
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::ResultCache;
use crate::catalog::Catalog;
use crate::fuzzy_matcher::FuzzyMatcher;
use crate::fuzzy_matcher::fallback::FallbackMatcher;
use crate::fuzzy_matcher::subsequence::SubsequenceMatcher;
use crate::options::SearchOptions;
use crate::{MatchDetail, SearchResult, normalize_query};

//==============================================================================
/// Ranks catalog entries against queries and memoizes the results.
///
/// `Searcher` is `Send + Sync`: share it behind an `Arc` between every place
/// that issues queries. Only the result cache is mutable, and it locks itself.
pub struct Searcher {
    catalog: Arc<Catalog>,
    options: SearchOptions,
    matchers: Vec<Box<dyn FuzzyMatcher>>,
    cache: ResultCache,
}

impl Searcher {
    /// Creates a searcher over `catalog`.
    pub fn new(catalog: impl Into<Arc<Catalog>>, options: SearchOptions) -> Self {
        let catalog = catalog.into();
        let matchers = Self::create_matchers(&catalog, &options);
        let cache = ResultCache::with_capacity(options.cache_capacity);
        Self {
            catalog,
            options,
            matchers,
            cache,
        }
    }

    /// Builds the matcher chain: subsequence alignment first, then fallback.
    ///
    /// The fallback ceiling depends on the longest name, so the chain has to be
    /// rebuilt whenever the catalog changes.
    fn create_matchers(catalog: &Catalog, options: &SearchOptions) -> Vec<Box<dyn FuzzyMatcher>> {
        if let Err(err) = options.scoring.validate() {
            warn!("{err}; fallback matches may outrank alignments");
        }

        let mut matchers: Vec<Box<dyn FuzzyMatcher>> = vec![Box::new(
            SubsequenceMatcher::default()
                .scoring(options.scoring)
                .fold_confusables(options.fold_confusables),
        )];

        if !options.no_fallback {
            let fallback =
                FallbackMatcher::for_names(catalog.names(), &options.scoring).min_span(options.min_fallback_span);
            debug!("fallback matcher ceiling: {}", fallback.ceiling());
            matchers.push(Box::new(fallback));
        }

        matchers
    }

    /// Returns the catalog currently searched.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the options this searcher was built with.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns the result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Drops every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Replaces the catalog and invalidates everything derived from the old one.
    pub fn reload(&mut self, catalog: impl Into<Arc<Catalog>>) {
        self.catalog = catalog.into();
        self.matchers = Self::create_matchers(&self.catalog, &self.options);
        self.cache.clear();
        debug!("searcher reloaded with {} entries", self.catalog.len());
    }

    fn accepts(&self, query: &str) -> bool {
        !query.is_empty() && query.chars().count() >= self.options.min_query_length
    }

    /// Searches the catalog for `query`.
    ///
    /// The query is trimmed and lowercased first. Queries shorter than
    /// `min_query_length` return nothing and leave the cache alone. Otherwise
    /// the result is served from the cache, or ranked and then cached.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = normalize_query(query);
        if !self.accepts(&query) {
            trace!("query {query:?} below minimum length");
            return Vec::new();
        }

        if let Some(results) = self.cache.get(&query) {
            trace!("cache hit for {query:?}");
            return results;
        }

        let results = self.rank(&query);
        self.cache.put(query, results.clone());
        results
    }

    /// Ranks every catalog entry against an already normalized `query`,
    /// bypassing the cache.
    ///
    /// Order: exact name match first, then score (descending), tier, name.
    /// At most `max_results` entries are returned.
    pub fn rank(&self, query: &str) -> Vec<SearchResult> {
        if !self.accepts(query) {
            return Vec::new();
        }

        let start = Instant::now();
        let mut results: Vec<SearchResult> = self
            .catalog
            .iter()
            .filter_map(|entry| {
                self.match_name(&entry.name, query).map(|detail| SearchResult {
                    entry: entry.clone(),
                    detail,
                })
            })
            .collect();
        let num_matched = results.len();

        results.sort_by(|a, b| compare_results(query, a, b));
        results.truncate(self.options.max_results);

        debug!(
            "ranked {query:?}: {num_matched}/{} matched, kept {} in {:?}",
            self.catalog.len(),
            results.len(),
            start.elapsed()
        );
        results
    }

    fn match_name(&self, name: &str, query: &str) -> Option<MatchDetail> {
        self.matchers.iter().find_map(|matcher| matcher.fuzzy_indices(name, query))
    }
}

/// Total order of results for `query`; never depends on catalog order.
fn compare_results(query: &str, a: &SearchResult, b: &SearchResult) -> Ordering {
    let a_exact = a.name() == query;
    let b_exact = b.name() == query;
    b_exact
        .cmp(&a_exact)
        .then_with(|| b.score().total_cmp(&a.score()))
        .then_with(|| a.tier().cmp(b.tier()))
        .then_with(|| a.name().cmp(b.name()))
}
