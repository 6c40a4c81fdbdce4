//! Message Tagger (spec §4.A). Extracts bug identifiers referenced in a
//! commit message. Patterns are tried in order; the first one that matches
//! wins and all of its captured integers are returned.

use regex::Regex;

lazy_static! {
    static ref BUG_NUMBER: Regex = Regex::new(r"(?i)bug[# \t]*(\d+)").unwrap();
    static ref BRACKET_NUMBER: Regex = Regex::new(r"\[(\d+)\]").unwrap();
    static ref ISSUE_NUMBER: Regex = Regex::new(r"#(\d+)").unwrap();
    static ref CLOSING_SENTENCE: Regex =
        Regex::new(r"(?i)(?:Fixes|Closes|Resolves) issue #?(\d+)").unwrap();
}

/// Returns the bug numbers referenced by `message`, per the pattern order
/// in spec §4.A. An empty result means no bug linkage was found.
pub fn extract_bug_numbers(message: &str) -> Vec<u64> {
    for pattern in [&*BUG_NUMBER, &*BRACKET_NUMBER, &*ISSUE_NUMBER, &*CLOSING_SENTENCE] {
        if let Some(captures) = pattern.captures(message) {
            return captures
                .iter()
                .skip(1)
                .flatten()
                .filter_map(|m| m.as_str().parse().ok())
                .collect();
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bug_keyword_pattern() {
        assert_eq!(extract_bug_numbers("Fix bug 42 in parser"), vec![42]);
        assert_eq!(extract_bug_numbers("bug#17: off by one"), vec![17]);
    }

    #[test]
    fn bracket_pattern_wins_over_hash() {
        // Bracket pattern is earlier in the ordered list than the hash pattern.
        assert_eq!(extract_bug_numbers("See [17] and #99"), vec![17]);
    }

    #[test]
    fn hash_pattern() {
        assert_eq!(extract_bug_numbers("See #99 only"), vec![99]);
    }

    #[test]
    fn closing_sentence_pattern() {
        assert_eq!(
            extract_bug_numbers("Unrelated text. Closes issue #123."),
            vec![123]
        );
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(extract_bug_numbers("Refactor the widget factory").is_empty());
    }

    #[test]
    fn only_first_matching_pattern_counts() {
        // "bug 7" matches the bug pattern first; the bracket number on the
        // same line must not also be returned.
        assert_eq!(extract_bug_numbers("bug 7, see also [8]"), vec![7]);
    }
}
