//! Scoring primitives for a single alignment step.
//!
//! Every matched query character earns `base_match`. On top of that:
//! - `adjacency_bonus` when it sits right after the previous match,
//! - `word_start_bonus` when it starts a `-`/`_`/space separated segment,
//! - `start_of_string_bonus` when it is the very first character,
//!
//! and `gap_penalty` is charged for every candidate character skipped since the
//! previous match (or since the start of the string for the first match).
//!
//! # Example:
//! ```
//! use atlas_match::fuzzy_matcher::scoring::ScoreConfig;
//!
//! let scoring = ScoreConfig::default();
//! let choice: Vec<char> = "ab-cd".chars().collect();
//!
//! // 'a' at 0: base + word start + start of string
//! assert_eq!(scoring.position_score(&choice, 0, None), 22.0);
//! // 'c' at 3 after 'a' at 0: base + word start - 2 skipped
//! assert_eq!(scoring.position_score(&choice, 3, Some(0)), 14.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::fuzzy_matcher::{IndexType, ScoreType};

/// Default score of every aligned character
pub const BASE_MATCH_SCORE: ScoreType = 10.0;
/// Default bonus for a match right after the previous one
pub const ADJACENCY_BONUS: ScoreType = 14.0;
/// Default bonus for a match starting a segment
pub const WORD_START_BONUS: ScoreType = 8.0;
/// Default bonus for a match at index 0
pub const START_OF_STRING_BONUS: ScoreType = 4.0;
/// Default penalty per skipped character
pub const GAP_PENALTY: ScoreType = 2.0;

/// Characters that delimit the segments of a candidate name.
pub const SEPARATORS: [char; 3] = ['-', '_', ' '];

/// Tunable weights of the scoring model.
///
/// Changing them changes the ranking, never which candidates match.
///
/// Every weight must be finite and non-negative. The fallback ceiling from
/// [`ScoreConfig::min_subsequence_score`] is only a lower bound on alignment
/// scores under that condition; [`ScoreConfig::validate`] checks it, and
/// `SearchOptionsBuilder` refuses weights that fail it. A `SearchOptions`
/// literal skips the builder, so callers building one by hand should validate
/// it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Awarded for every aligned character
    pub base_match: ScoreType,
    /// Awarded when the match directly follows the previous one
    pub adjacency_bonus: ScoreType,
    /// Awarded when the match is the first character of a segment
    pub word_start_bonus: ScoreType,
    /// Awarded when the match is at index 0
    pub start_of_string_bonus: ScoreType,
    /// Charged per skipped candidate character
    pub gap_penalty: ScoreType,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_match: BASE_MATCH_SCORE,
            adjacency_bonus: ADJACENCY_BONUS,
            word_start_bonus: WORD_START_BONUS,
            start_of_string_bonus: START_OF_STRING_BONUS,
            gap_penalty: GAP_PENALTY,
        }
    }
}

/// Whether `idx` is the first character of a segment of `choice`.
#[inline]
pub fn is_word_start(choice: &[char], idx: IndexType) -> bool {
    idx == 0 || choice.get(idx - 1).is_some_and(|prev| SEPARATORS.contains(prev))
}

impl ScoreConfig {
    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("base_match", self.base_match),
            ("adjacency_bonus", self.adjacency_bonus),
            ("word_start_bonus", self.word_start_bonus),
            ("start_of_string_bonus", self.start_of_string_bonus),
            ("gap_penalty", self.gap_penalty),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() {
                return Err(format!("scoring weight {name} must be finite, got {weight}"));
            }
            if weight < 0.0 {
                return Err(format!("scoring weight {name} must be non-negative, got {weight}"));
            }
        }
        Ok(())
    }

    /// Segment start bonus for a match at `idx`
    #[inline]
    pub fn word_start_bonus(&self, choice: &[char], idx: IndexType) -> ScoreType {
        if is_word_start(choice, idx) { self.word_start_bonus } else { 0.0 }
    }

    /// Bonus for a match at the very first character
    #[inline]
    pub fn start_of_string_bonus(&self, idx: IndexType) -> ScoreType {
        if idx == 0 { self.start_of_string_bonus } else { 0.0 }
    }

    /// Bonus for a match directly after `prev`
    #[inline]
    pub fn adjacency_bonus(&self, prev: Option<IndexType>, idx: IndexType) -> ScoreType {
        match prev {
            Some(prev) if prev + 1 == idx => self.adjacency_bonus,
            _ => 0.0,
        }
    }

    /// Penalty for the characters skipped between `prev` and `idx`.
    ///
    /// Without a previous match every character before `idx` counts as skipped.
    #[inline]
    pub fn gap_penalty(&self, prev: Option<IndexType>, idx: IndexType) -> ScoreType {
        let skipped = match prev {
            Some(prev) => idx.saturating_sub(prev + 1),
            None => idx,
        };
        self.gap_penalty * skipped as ScoreType
    }

    /// Score contributed by matching a query character at `choice[idx]`,
    /// given the index of the previous matched character.
    #[inline]
    pub fn position_score(&self, choice: &[char], idx: IndexType, prev: Option<IndexType>) -> ScoreType {
        self.base_match + self.adjacency_bonus(prev, idx) + self.word_start_bonus(choice, idx)
            + self.start_of_string_bonus(idx)
            - self.gap_penalty(prev, idx)
    }

    /// Lowest score a subsequence alignment can reach against names of at most
    /// `max_len` characters.
    ///
    /// Reached by a single character matched at the last index with no bonus.
    /// Holds only for non-negative weights (see [`ScoreConfig::validate`]):
    /// each further character then adds at least `base_match` while its gaps
    /// are already counted in the span.
    pub fn min_subsequence_score(&self, max_len: usize) -> ScoreType {
        self.base_match - self.gap_penalty * max_len.saturating_sub(1) as ScoreType
    }
}
