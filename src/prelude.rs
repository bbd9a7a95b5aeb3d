//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! atlas-match types and traits with a single `use atlas_match::prelude::*;` statement.

pub use crate::fuzzy_matcher::FuzzyMatcher;
pub use crate::fuzzy_matcher::fallback::FallbackMatcher;
pub use crate::fuzzy_matcher::scoring::ScoreConfig;
pub use crate::fuzzy_matcher::subsequence::SubsequenceMatcher;
pub use crate::*;
pub use std::sync::Arc;
