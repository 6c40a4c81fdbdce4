//! Line Matcher (spec §4.C). Pairs deletions to additions via normalized
//! edit distance and an optimal assignment, producing the three disjoint
//! edit classes: changed, pure deletion, pure addition.

use crate::hunk::Decomposed;
use crate::hungarian;

/// Lower bound is exclusive: a cost of exactly 0.0 means the lines are
/// identical and would not represent a real edit.
const RETAIN_MIN: f64 = 0.0;
/// Upper bound is exclusive: the similarity threshold beyond which two
/// lines are no longer considered "the same line, modified."
const RETAIN_MAX: f64 = 0.4;

/// The three disjoint classes a hunk's deletions/additions resolve into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    /// `(old_index, new_index)` pairs: a deletion matched to an addition.
    pub changed: Vec<(usize, usize)>,
    /// Old-side indices with no matching addition.
    pub pure_deletions: Vec<usize>,
    /// New-side indices with no matching deletion.
    pub pure_additions: Vec<usize>,
}

/// Normalized Levenshtein distance: edit distance divided by the length of
/// the longer operand, in `[0.0, 1.0]`. Two empty strings are defined as
/// distance 0.0 (no edit needed).
fn normalized_distance(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 0.0;
    }
    strsim::levenshtein(a, b) as f64 / longer as f64
}

/// Classifies a hunk's decomposed deletions/additions per spec §4.C.
pub fn classify(decomposed: &Decomposed) -> Classified {
    let deletions = &decomposed.deletions;
    let additions = &decomposed.additions;

    if deletions.is_empty() || additions.is_empty() {
        return Classified {
            changed: Vec::new(),
            pure_deletions: deletions.iter().map(|d| d.index).collect(),
            pure_additions: additions.iter().map(|a| a.index).collect(),
        };
    }

    let cost: Vec<Vec<f64>> = deletions
        .iter()
        .map(|d| {
            additions
                .iter()
                .map(|a| normalized_distance(&d.body, &a.body))
                .collect()
        })
        .collect();

    let assignment = hungarian::solve(&cost);

    let mut changed = Vec::new();
    let mut matched_deletions = std::collections::HashSet::new();
    let mut matched_additions = std::collections::HashSet::new();

    for (i, j) in assignment {
        let c = cost[i][j];
        if c > RETAIN_MIN && c < RETAIN_MAX {
            changed.push((deletions[i].index, additions[j].index));
            matched_deletions.insert(i);
            matched_additions.insert(j);
        }
    }

    let pure_deletions = deletions
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_deletions.contains(i))
        .map(|(_, d)| d.index)
        .collect();
    let pure_additions = additions
        .iter()
        .enumerate()
        .filter(|(j, _)| !matched_additions.contains(j))
        .map(|(_, a)| a.index)
        .collect();

    Classified { changed, pure_deletions, pure_additions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunk::IndexedLine;

    fn indexed(body: &str, index: usize) -> IndexedLine {
        IndexedLine { body: body.to_owned(), index }
    }

    #[test]
    fn cost_is_in_unit_range() {
        assert_eq!(normalized_distance("abc", "abc"), 0.0);
        assert_eq!(normalized_distance("", ""), 0.0);
        assert!(normalized_distance("abc", "xyz") <= 1.0);
        assert!(normalized_distance("abc", "xyz") >= 0.0);
    }

    #[test]
    fn small_edit_is_classified_as_changed() {
        let decomposed = Decomposed {
            deletions: vec![indexed("int x = 1;", 0)],
            additions: vec![indexed("int x = 2;", 0)],
        };
        let result = classify(&decomposed);
        assert_eq!(result.changed, vec![(0, 0)]);
        assert!(result.pure_deletions.is_empty());
        assert!(result.pure_additions.is_empty());
    }

    #[test]
    fn unrelated_lines_are_pure() {
        let decomposed = Decomposed {
            deletions: vec![indexed("foo();", 0)],
            additions: vec![indexed("bar_with_long_name();", 0)],
        };
        let result = classify(&decomposed);
        assert!(result.changed.is_empty());
        assert_eq!(result.pure_deletions, vec![0]);
        assert_eq!(result.pure_additions, vec![0]);
    }

    #[test]
    fn identical_lines_are_not_counted_as_changed() {
        let decomposed = Decomposed {
            deletions: vec![indexed("same line", 3)],
            additions: vec![indexed("same line", 7)],
        };
        let result = classify(&decomposed);
        assert!(result.changed.is_empty());
        assert_eq!(result.pure_deletions, vec![3]);
        assert_eq!(result.pure_additions, vec![7]);
    }

    #[test]
    fn empty_deletions_all_additions_pure() {
        let decomposed = Decomposed {
            deletions: vec![],
            additions: vec![indexed("a", 0), indexed("b", 1)],
        };
        let result = classify(&decomposed);
        assert!(result.changed.is_empty());
        assert_eq!(result.pure_additions, vec![0, 1]);
    }

    #[test]
    fn assignment_prefers_globally_minimal_cost() {
        // "abcd" is equally close to both additions, but "abcx" is a much
        // better match for the second deletion; a greedy nearest-match
        // would grab it first and leave a poor pairing for "abcd".
        let decomposed = Decomposed {
            deletions: vec![indexed("abcd", 0), indexed("abcx", 1)],
            additions: vec![indexed("abce", 0), indexed("abcx", 1)],
        };
        let result = classify(&decomposed);
        // "abcx" <-> "abcx" is cost 0.0, excluded as identical; so it's pure.
        assert!(result.pure_deletions.contains(&1));
        assert!(result.pure_additions.contains(&1));
        // "abcd" <-> "abce" remains, a small edit.
        assert!(result.changed.contains(&(0, 0)));
    }
}
