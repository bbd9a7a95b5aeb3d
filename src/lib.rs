//! atlas-match ranks the entries of a small, fixed catalog of map names against
//! partial or noisy queries.
//!
//! Each query is aligned as a subsequence of every name with a dynamic
//! programming matcher that rewards contiguous runs and segment starts.
//! Names that cannot be aligned may still be returned through lower-confidence
//! prefix, suffix or fragment matches. Results come back ranked, with the
//! character positions that justify them, and are memoized in a bounded LRU
//! cache so incremental typing stays cheap.
//!
//! # Examples
//!
//! ```
//! use atlas_match::prelude::*;
//!
//! let catalog = Catalog::new(vec![
//!     CatalogEntry::new("casos-aiagsum", "T6"),
//!     CatalogEntry::new("cosmos-vale", "T6"),
//! ])
//! .unwrap();
//! let searcher = Searcher::new(catalog, SearchOptions::default());
//!
//! let results = searcher.search("cs");
//! assert_eq!(results[0].name(), "casos-aiagsum");
//! assert_eq!(results[0].highlighted(), "[c]a[s]os-aiagsum");
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use std::fmt::{Display, Error, Formatter};
use std::sync::Arc;

use serde::Serialize;

pub use crate::cache::ResultCache;
pub use crate::catalog::{Catalog, CatalogEntry, CatalogError};
pub use crate::options::{SearchOptions, SearchOptionsBuilder};
pub use crate::search::Searcher;

pub mod cache;
pub mod catalog;
pub mod fuzzy_matcher;
pub mod options;
pub mod prelude;
mod search;

//------------------------------------------------------------------------------
/// Which heuristic produced a fallback match
#[derive(Eq, PartialEq, Debug, Copy, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// The name starts with the query, or the query starts with the whole name
    Prefix,
    /// The name ends with the query, or the query ends with the whole name
    Suffix,
    /// A contiguous piece of the query occurs somewhere in the name
    Fragment,
}

/// How a query was matched against a name
#[derive(Eq, PartialEq, Debug, Copy, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Every query character aligned, in order
    Subsequence,
    /// Lower confidence heuristic match
    Fallback(FallbackKind),
}

impl MatchMethod {
    /// Returns true for heuristic matches
    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchMethod::Fallback(_))
    }
}

impl Display for MatchMethod {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            MatchMethod::Subsequence => write!(f, "subsequence"),
            MatchMethod::Fallback(FallbackKind::Prefix) => write!(f, "fallback:prefix"),
            MatchMethod::Fallback(FallbackKind::Suffix) => write!(f, "fallback:suffix"),
            MatchMethod::Fallback(FallbackKind::Fragment) => write!(f, "fallback:fragment"),
        }
    }
}

/// Result of matching one query against one name
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct MatchDetail {
    /// Higher is better; heavily penalized fallback matches go negative
    pub score: f64,
    /// Strictly increasing character indices of the matched characters
    ///
    /// One per query character for subsequence matches, only the matched span
    /// for fallback matches.
    pub positions: Vec<usize>,
    /// How the match was found
    pub method: MatchMethod,
}

/// A catalog entry together with the way it matched a query
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The matched entry
    pub entry: Arc<CatalogEntry>,
    /// Score, positions and method of the match
    #[serde(flatten)]
    pub detail: MatchDetail,
}

impl SearchResult {
    /// The matched (lowercase) name
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Tier of the matched entry
    pub fn tier(&self) -> &str {
        &self.entry.tier
    }

    /// Score of the match
    pub fn score(&self) -> f64 {
        self.detail.score
    }

    /// Character positions to highlight in [`SearchResult::name`]
    pub fn positions(&self) -> &[usize] {
        &self.detail.positions
    }

    /// The name with matched characters wrapped in brackets, e.g. `[c]a[s]os`
    pub fn highlighted(&self) -> String {
        fuzzy_matcher::util::wrap_matches(&self.entry.name, &self.detail.positions)
    }
}

/// Trim and lowercase a raw query.
///
/// Idempotent, so already normalized queries pass through unchanged.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}
