//! Subsequence alignment with dynamic programming.
//!
//! Every character of the pattern must be matched, in order, by a strictly later
//! character of the choice. Among all such alignments the one with the highest
//! total [`ScoreConfig::position_score`] wins.
//!
//! The DP uses two flat `rows × cols` tables addressed by `i * cols + j`:
//! - `scores[i][j]`: best score of an alignment of `pattern[..=i]` whose last
//!   character is matched at `choice[j]`, or `-inf` when there is none.
//! - `back[i][j]`: the column `k` that `pattern[i - 1]` was matched at on that
//!   best path, used to recover the positions.
//!
//! # Example:
//! ```
//! use atlas_match::fuzzy_matcher::FuzzyMatcher;
//! use atlas_match::fuzzy_matcher::subsequence::SubsequenceMatcher;
//!
//! let matcher = SubsequenceMatcher::default();
//!
//! assert_eq!(None, matcher.fuzzy_match("abc", "abx"));
//! assert!(matcher.fuzzy_match("axbycz", "abc").is_some());
//!
//! let detail = matcher.fuzzy_indices("axbycz", "abc").unwrap();
//! assert_eq!(detail.positions, [0, 2, 4]);
//! ```

use std::cell::RefCell;

use thread_local::ThreadLocal;

use crate::fuzzy_matcher::scoring::ScoreConfig;
use crate::fuzzy_matcher::util::{char_matches, cheap_matches};
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, MatchIndices, ScoreType};
use crate::{MatchDetail, MatchMethod};

const SCORE_MIN: ScoreType = f64::NEG_INFINITY;
const NO_PREDECESSOR: IndexType = IndexType::MAX;

#[derive(Debug, Default)]
struct AlignTable {
    scores: Vec<ScoreType>,
    back: Vec<IndexType>,
    cols: usize,
}

impl AlignTable {
    fn reset(&mut self, rows: usize, cols: usize) {
        let needed = rows * cols;
        self.scores.clear();
        self.scores.resize(needed, SCORE_MIN);
        self.back.clear();
        self.back.resize(needed, NO_PREDECESSOR);
        self.cols = cols;
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// Fill the table and backtrack the best alignment into `positions`.
///
/// Ties keep the smallest predecessor column and the smallest final column,
/// so the result does not depend on anything but the two strings.
fn align(
    pattern: &[char],
    choice: &[char],
    scoring: &ScoreConfig,
    fold_confusables: bool,
    table: &mut AlignTable,
    positions: &mut MatchIndices,
) -> Option<ScoreType> {
    let m = pattern.len();
    let n = choice.len();

    if m == 0 || m > n {
        return None;
    }

    table.reset(m, n);

    for (j, &ch) in choice.iter().enumerate() {
        if char_matches(pattern[0], ch, fold_confusables) {
            table.scores[j] = scoring.position_score(choice, j, None);
        }
    }

    for i in 1..m {
        // pattern[i] needs i characters before it, so columns < i stay unreachable
        for j in i..n {
            if !char_matches(pattern[i], choice[j], fold_confusables) {
                continue;
            }

            let mut best_score = SCORE_MIN;
            let mut best_prev = NO_PREDECESSOR;
            for k in (i - 1)..j {
                let prev_score = table.scores[table.at(i - 1, k)];
                if prev_score == SCORE_MIN {
                    continue;
                }
                let score = prev_score + scoring.position_score(choice, j, Some(k));
                if score > best_score {
                    best_score = score;
                    best_prev = k;
                }
            }

            let cell = table.at(i, j);
            table.scores[cell] = best_score;
            table.back[cell] = best_prev;
        }
    }

    let mut final_score = SCORE_MIN;
    let mut end = NO_PREDECESSOR;
    for j in (m - 1)..n {
        let score = table.scores[table.at(m - 1, j)];
        if score > final_score {
            final_score = score;
            end = j;
        }
    }

    if end == NO_PREDECESSOR {
        return None;
    }

    positions.clear();
    positions.resize(m, 0);
    let mut j = end;
    for i in (0..m).rev() {
        positions[i] = j;
        if i > 0 {
            j = table.back[table.at(i, j)];
            debug_assert_ne!(j, NO_PREDECESSOR, "reachable cell without predecessor");
        }
    }

    Some(final_score)
}

/// Fuzzy matcher aligning the pattern as a subsequence of the choice.
///
/// Both inputs are expected to be lowercase already; no case folding happens here.
#[derive(Debug)]
pub struct SubsequenceMatcher {
    scoring: ScoreConfig,
    fold_confusables: bool,
    c_cache: ThreadLocal<RefCell<Vec<char>>>,
    p_cache: ThreadLocal<RefCell<Vec<char>>>,
    table: ThreadLocal<RefCell<AlignTable>>,
}

impl Default for SubsequenceMatcher {
    fn default() -> Self {
        Self {
            scoring: ScoreConfig::default(),
            fold_confusables: false,
            c_cache: ThreadLocal::new(),
            p_cache: ThreadLocal::new(),
            table: ThreadLocal::new(),
        }
    }
}

impl SubsequenceMatcher {
    /// Sets the scoring weights.
    pub fn scoring(mut self, scoring: ScoreConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Lets OCR-confusable characters (`1`/`l`/`i`, `0`/`o`, ...) match each other.
    pub fn fold_confusables(mut self, fold_confusables: bool) -> Self {
        self.fold_confusables = fold_confusables;
        self
    }
}

impl FuzzyMatcher for SubsequenceMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<MatchDetail> {
        let mut choice_chars = self.c_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        let mut pattern_chars = self.p_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();

        choice_chars.clear();
        choice_chars.extend(choice.chars());

        pattern_chars.clear();
        pattern_chars.extend(pattern.chars());

        // Quick check: does the pattern even appear as a subsequence?
        if !cheap_matches(&choice_chars, &pattern_chars, self.fold_confusables) {
            return None;
        }

        let mut table = self.table.get_or(|| RefCell::new(AlignTable::default())).borrow_mut();
        let mut positions = Vec::with_capacity(pattern_chars.len());
        let score = align(
            &pattern_chars,
            &choice_chars,
            &self.scoring,
            self.fold_confusables,
            &mut table,
            &mut positions,
        )?;

        Some(MatchDetail {
            score,
            positions,
            method: MatchMethod::Subsequence,
        })
    }
}

/// Align `pattern` against `choice` with the default weights, returning the
/// full match detail.
pub fn fuzzy_indices(choice: &str, pattern: &str) -> Option<MatchDetail> {
    SubsequenceMatcher::default().fuzzy_indices(choice, pattern)
}

/// Align `pattern` against `choice` with the default weights, returning only
/// the score.
pub fn fuzzy_match(choice: &str, pattern: &str) -> Option<ScoreType> {
    SubsequenceMatcher::default().fuzzy_match(choice, pattern)
}
