//! Configuration options for the searcher.
//!
//! `SearchOptions` is built either through [`SearchOptionsBuilder`] or, with the
//! `cli` feature, parsed from command line arguments.

use derive_builder::Builder;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::fuzzy_matcher::fallback::DEFAULT_MIN_SPAN;
use crate::fuzzy_matcher::scoring::ScoreConfig;

/// Default maximum number of results per query
pub const DEFAULT_MAX_RESULTS: usize = 25;
/// Default minimum query length, in characters
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Search behaviour
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct SearchOptions {
    /// Maximum number of results returned per query
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_RESULTS, help_heading = "Search"))]
    pub max_results: usize,

    /// Minimum query length to start matching
    ///
    /// Shorter queries return nothing without scoring
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value_t = DEFAULT_MIN_QUERY_LENGTH, help_heading = "Search")
    )]
    pub min_query_length: usize,

    /// Number of distinct queries whose results are memoized
    ///
    /// 0 disables the cache
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_CACHE_CAPACITY, help_heading = "Search"))]
    pub cache_capacity: usize,

    /// Shortest span a prefix, suffix or fragment fallback match must cover
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MIN_SPAN, help_heading = "Fallback"))]
    pub min_fallback_span: usize,

    /// Disable prefix, suffix and fragment fallback matches
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Fallback"))]
    pub no_fallback: bool,

    /// Let OCR-confusable characters match each other
    ///
    /// Groups: i/l/1/|, o/0, s/5, z/2
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Search"))]
    pub fold_confusables: bool,

    /// Scoring weights of the subsequence matcher
    #[cfg_attr(feature = "cli", arg(skip))]
    pub scoring: ScoreConfig,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            min_fallback_span: DEFAULT_MIN_SPAN,
            no_fallback: false,
            fold_confusables: false,
            scoring: ScoreConfig::default(),
        }
    }
}

impl SearchOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.scoring {
            Some(scoring) => scoring.validate(),
            None => Ok(()),
        }
    }
}
