//! Heuristic matches for candidates the subsequence aligner rejects.
//!
//! Tried in order, first hit wins:
//! 1. prefix: the choice starts with the pattern, or the pattern starts with the
//!    whole choice (trailing OCR noise),
//! 2. suffix: the same at the other end,
//! 3. fragment: the longest contiguous piece of the pattern found in the choice.
//!
//! All scores are placed below `ceiling`, which callers set to the lowest score
//! a subsequence alignment can reach in their catalog. A fallback match then
//! never outranks a real alignment.
//!
//! # Example:
//! ```
//! use atlas_match::fuzzy_matcher::FuzzyMatcher;
//! use atlas_match::fuzzy_matcher::fallback::FallbackMatcher;
//!
//! let matcher = FallbackMatcher::new(-14.0);
//! let detail = matcher.fuzzy_indices("casos-aiagsum", "xai").unwrap();
//! assert_eq!(detail.positions, [6, 7]);
//! assert!(detail.score < -14.0);
//! ```

use std::iter;

use memchr::memmem;

use crate::fuzzy_matcher::scoring::{GAP_PENALTY, ScoreConfig};
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, ScoreType};
use crate::{FallbackKind, MatchDetail, MatchMethod};

const PREFIX_DROP: ScoreType = 4.0;
const SUFFIX_DROP: ScoreType = 6.0;
const FRAGMENT_DROP: ScoreType = 10.0;

/// Default for the shortest span a fallback match may cover.
pub const DEFAULT_MIN_SPAN: usize = 2;

/// Lower-confidence matcher for prefix, suffix and fragment matches.
#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    ceiling: ScoreType,
    gap_penalty: ScoreType,
    min_span: usize,
}

impl FallbackMatcher {
    /// Creates a matcher whose scores all stay strictly below `ceiling`.
    pub fn new(ceiling: ScoreType) -> Self {
        Self {
            ceiling,
            gap_penalty: GAP_PENALTY,
            min_span: DEFAULT_MIN_SPAN,
        }
    }

    /// Creates a matcher whose ceiling is the lowest subsequence score any of
    /// `names` can produce under `scoring`.
    pub fn for_names<'a>(names: impl IntoIterator<Item = &'a str>, scoring: &ScoreConfig) -> Self {
        let max_len = names.into_iter().map(|name| name.chars().count()).max().unwrap_or(0);
        Self::new(scoring.min_subsequence_score(max_len)).gap_penalty(scoring.gap_penalty)
    }

    /// Sets the per-character penalty used to scale fragment matches.
    pub fn gap_penalty(mut self, gap_penalty: ScoreType) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    /// Sets the minimum number of characters a match must cover.
    ///
    /// Applies to fragments and to a choice found whole inside the pattern.
    pub fn min_span(mut self, min_span: usize) -> Self {
        self.min_span = min_span.max(1);
        self
    }

    /// Upper bound (exclusive) of every score this matcher produces.
    pub fn ceiling(&self) -> ScoreType {
        self.ceiling
    }

    fn detail(&self, score: ScoreType, positions: impl Iterator<Item = IndexType>, kind: FallbackKind) -> MatchDetail {
        MatchDetail {
            score,
            positions: positions.collect(),
            method: MatchMethod::Fallback(kind),
        }
    }

    fn longest_fragment(&self, choice: &str, pattern: &str) -> Option<MatchDetail> {
        let bounds: Vec<usize> = pattern
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(iter::once(pattern.len()))
            .collect();
        let pattern_len = bounds.len() - 1;

        for span in (self.min_span..=pattern_len).rev() {
            // (char offset in choice, char offset in pattern)
            let mut best: Option<(usize, usize)> = None;
            for start in 0..=(pattern_len - span) {
                let fragment = &pattern[bounds[start]..bounds[start + span]];
                if let Some(byte_offset) = memmem::find(choice.as_bytes(), fragment.as_bytes()) {
                    let offset = choice[..byte_offset].chars().count();
                    if best.is_none_or(|(best_offset, _)| offset < best_offset) {
                        best = Some((offset, start));
                    }
                }
            }

            if let Some((offset, start)) = best {
                trace!("fragment of {pattern:?} at {start}..{} found in {choice:?} at {offset}", start + span);
                let missing = pattern_len - span;
                let score = self.ceiling - FRAGMENT_DROP - self.gap_penalty * (offset + missing) as ScoreType;
                return Some(self.detail(score, offset..offset + span, FallbackKind::Fragment));
            }
        }

        None
    }
}

impl FuzzyMatcher for FallbackMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<MatchDetail> {
        if choice.is_empty() || pattern.is_empty() {
            return None;
        }

        let choice_len = choice.chars().count();
        let pattern_len = pattern.chars().count();
        let whole_choice_counts = choice_len >= self.min_span;

        if choice.starts_with(pattern) {
            return Some(self.detail(self.ceiling - PREFIX_DROP, 0..pattern_len, FallbackKind::Prefix));
        }
        if whole_choice_counts && pattern.starts_with(choice) {
            return Some(self.detail(self.ceiling - PREFIX_DROP, 0..choice_len, FallbackKind::Prefix));
        }

        if choice.ends_with(pattern) {
            return Some(self.detail(
                self.ceiling - SUFFIX_DROP,
                (choice_len - pattern_len)..choice_len,
                FallbackKind::Suffix,
            ));
        }
        if whole_choice_counts && pattern.ends_with(choice) {
            return Some(self.detail(self.ceiling - SUFFIX_DROP, 0..choice_len, FallbackKind::Suffix));
        }

        self.longest_fragment(choice, pattern)
    }
}
