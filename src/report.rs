//! Report Formatting (SPEC_FULL §4.K). Renders the Origin Resolver's
//! per-bug results as the `#<bug_no> [<hex1>, <hex2>, ...]` lines spec §6
//! specifies, kept separate from the resolver's query logic so the
//! resolver stays unit-testable without capturing stdout.

use crate::resolve::BugOrigins;

pub fn format_line(bug: &BugOrigins) -> String {
    format!("#{} [{}]\n\n", bug.bug_no, bug.origin_hexes.join(", "))
}

pub fn print_report(bugs: &[BugOrigins]) {
    for bug in bugs {
        print!("{}", format_line(bug));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_line_per_bug_followed_by_a_blank_line() {
        let bug = BugOrigins { bug_no: 42, origin_hexes: vec!["abc123".into(), "def456".into()] };
        assert_eq!(format_line(&bug), "#42 [abc123, def456]\n\n");
    }
}
