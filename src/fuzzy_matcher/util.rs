use crate::fuzzy_matcher::IndexType;

/// Groups of characters an OCR pass commonly confuses with each other.
const CONFUSABLE_GROUPS: [&[char]; 4] = [&['i', 'l', '1', '|'], &['o', '0'], &['s', '5'], &['z', '2']];

fn confusable_group(ch: char) -> Option<&'static [char]> {
    CONFUSABLE_GROUPS.iter().copied().find(|group| group.contains(&ch))
}

/// Whether pattern char `p` may be aligned to choice char `c`.
#[inline]
pub fn char_matches(p: char, c: char, fold_confusables: bool) -> bool {
    p == c || (fold_confusables && confusable_group(p).is_some_and(|group| group.contains(&c)))
}

/// Greedy check that `pattern` is a subsequence of `choice`.
///
/// Cheap enough to run before allocating the DP table for every candidate.
pub fn cheap_matches(choice: &[char], pattern: &[char], fold_confusables: bool) -> bool {
    let mut choice_iter = choice.iter();
    pattern
        .iter()
        .all(|&p| choice_iter.any(|&c| char_matches(p, c, fold_confusables)))
}

/// Wrap the matched characters of `line` in brackets, e.g. `[c]a[s]os`.
pub fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    let mut ret = String::with_capacity(line.len() + indices.len() * 2);
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.chars().enumerate() {
        if peekable.peek().is_some_and(|&&next| next == idx) {
            ret.push('[');
            ret.push(ch);
            ret.push(']');
            peekable.next();
        } else {
            ret.push(ch);
        }
    }

    ret
}

#[cfg(test)]
pub(crate) fn assert_order(matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher, pattern: &str, choices: &[&str]) {
    let result = filter_and_sort(matcher, pattern, choices);

    if result != choices {
        // debug print
        println!("pattern: {}", pattern);
        for &choice in choices.iter() {
            if let Some(detail) = matcher.fuzzy_indices(choice, pattern) {
                println!("{}: {:?}", detail.score, wrap_matches(choice, &detail.positions));
            } else {
                println!("NO MATCH for {}", choice);
            }
        }
    }

    assert_eq!(result, choices);
}

#[cfg(test)]
fn filter_and_sort<'a>(
    matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher,
    pattern: &str,
    lines: &[&'a str],
) -> Vec<&'a str> {
    let mut lines_with_score: Vec<(crate::fuzzy_matcher::ScoreType, &'a str)> = lines
        .iter()
        .filter_map(|&s| matcher.fuzzy_match(s, pattern).map(|score| (score, s)))
        .collect();
    lines_with_score.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    lines_with_score.into_iter().map(|(_, string)| string).collect()
}
