//! Matching algorithms for a single (candidate, query) pair.
//!
//! [`subsequence::SubsequenceMatcher`] is the primary, DP based aligner;
//! [`fallback::FallbackMatcher`] provides lower confidence prefix/suffix/fragment
//! matches for candidates the aligner rejects.

/// Prefix, suffix and fragment heuristics
pub mod fallback;
/// Scoring model shared by the matchers
pub mod scoring;
/// Subsequence alignment with dynamic programming
pub mod subsequence;
/// Character comparison and highlighting helpers
pub mod util;

use crate::MatchDetail;

/// Character index into a candidate
pub type IndexType = usize;
/// Match score; higher is better
pub type ScoreType = f64;

/// Character positions of the matched characters in a candidate
pub type MatchIndices = Vec<IndexType>;

/// Trait for matching a query against one candidate name
pub trait FuzzyMatcher: Send + Sync {
    /// match choice with pattern, and return the score, matched character indices and method
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<MatchDetail>;

    /// match choice with pattern, and return only the score
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        self.fuzzy_indices(choice, pattern).map(|detail| detail.score)
    }
}
