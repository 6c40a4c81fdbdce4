//! Origin Resolver (spec §4.E). For each bug, for each of its fix commits,
//! for each line that commit's edits changed, finds the latest earlier
//! commit whose own edit introduced that exact (file, line) — a temporal
//! join over the edit history.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::error::Result;
use crate::model::Id;
use crate::store;

/// One bug with at least one resolved origin commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugOrigins {
    pub bug_no: i64,
    pub origin_hexes: Vec<String>,
}

/// Resolves origins for every bug in the store, restricted to fix commits
/// whose date falls within the optional `[from, to]` window (spec §4.E).
/// Origin commits themselves are never date-filtered. Bugs with no
/// resolved origin are omitted — an empty result is not an error (spec
/// §7).
pub fn resolve_all(conn: &Connection, from: Option<i64>, to: Option<i64>) -> Result<Vec<BugOrigins>> {
    let mut results = Vec::new();
    for bug in store::all_bugs(conn)? {
        let origins = resolve_bug(conn, bug.id, from, to)?;
        if !origins.is_empty() {
            results.push(BugOrigins {
                bug_no: bug.bug_no,
                origin_hexes: origins.into_values().collect(),
            });
        }
    }
    Ok(results)
}

/// Returns the union of origin commits (keyed by commit id, to dedupe)
/// across every fix commit and every one of its edits, for a single bug.
fn resolve_bug(
    conn: &Connection,
    bug: Id,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<HashMap<Id, String>> {
    let mut origins: HashMap<Id, String> = HashMap::new();

    for fix in store::fix_commits_for_bug(conn, bug, from, to)? {
        for edit in store::edits_for_commit(conn, fix.id)? {
            let (Some(old_file), Some(old_line)) = (edit.old_file, edit.old_line) else {
                // Pure additions have no prior line to trace an origin for.
                continue;
            };

            if let Some(origin) = store::find_origin(conn, old_file, old_line, fix.date)? {
                origins.entry(origin.id).or_insert(origin.hex);
            }
        }
    }

    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{insert_edit, link_bug_commit, upsert_bug, upsert_commit, upsert_file, Store};

    #[test]
    fn resolves_single_origin_for_two_edits_in_one_commit() {
        let store = Store::open_in_memory().unwrap();
        let conn = &store.conn;

        let file = upsert_file(conn, "f.c").unwrap();
        let origin = upsert_commit(conn, "origin", 10).unwrap();
        insert_edit(conn, origin, None, Some(file), None, Some(10)).unwrap();
        insert_edit(conn, origin, None, Some(file), None, Some(20)).unwrap();

        let fix = upsert_commit(conn, "fix", 50).unwrap();
        insert_edit(conn, fix, Some(file), Some(file), Some(10), Some(11)).unwrap();
        insert_edit(conn, fix, Some(file), Some(file), Some(20), Some(21)).unwrap();

        let bug = upsert_bug(conn, 7).unwrap();
        link_bug_commit(conn, bug, fix).unwrap();

        let resolved = resolve_all(conn, None, None).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].bug_no, 7);
        assert_eq!(resolved[0].origin_hexes, vec!["origin".to_string()]);
    }

    #[test]
    fn later_origin_wins_over_earlier_one() {
        let store = Store::open_in_memory().unwrap();
        let conn = &store.conn;

        let file = upsert_file(conn, "f.c").unwrap();
        let early = upsert_commit(conn, "early", 5).unwrap();
        insert_edit(conn, early, None, Some(file), None, Some(20)).unwrap();
        let later = upsert_commit(conn, "later", 15).unwrap();
        insert_edit(conn, later, None, Some(file), None, Some(20)).unwrap();

        let fix = upsert_commit(conn, "fix", 50).unwrap();
        insert_edit(conn, fix, Some(file), Some(file), Some(20), Some(21)).unwrap();

        let bug = upsert_bug(conn, 7).unwrap();
        link_bug_commit(conn, bug, fix).unwrap();

        let resolved = resolve_all(conn, None, None).unwrap();
        assert_eq!(resolved[0].origin_hexes, vec!["later".to_string()]);
    }

    #[test]
    fn bug_with_no_origin_is_omitted() {
        let store = Store::open_in_memory().unwrap();
        let conn = &store.conn;
        let fix = upsert_commit(conn, "fix", 50).unwrap();
        let bug = upsert_bug(conn, 9).unwrap();
        link_bug_commit(conn, bug, fix).unwrap();

        assert!(resolve_all(conn, None, None).unwrap().is_empty());
    }

    #[test]
    fn from_date_filters_fix_commits_not_origins() {
        let store = Store::open_in_memory().unwrap();
        let conn = &store.conn;
        let file = upsert_file(conn, "f.c").unwrap();
        let origin = upsert_commit(conn, "origin", 1).unwrap();
        insert_edit(conn, origin, None, Some(file), None, Some(1)).unwrap();

        let fix = upsert_commit(conn, "fix", 100).unwrap();
        insert_edit(conn, fix, Some(file), Some(file), Some(1), Some(2)).unwrap();
        let bug = upsert_bug(conn, 3).unwrap();
        link_bug_commit(conn, bug, fix).unwrap();

        // `from` excludes the fix commit entirely.
        assert!(resolve_all(conn, Some(200), None).unwrap().is_empty());
        // Fix commit (date 100) still passes a looser `from`; the origin
        // (date 1) is resolved normally even though it predates `from`.
        let resolved = resolve_all(conn, Some(50), None).unwrap();
        assert_eq!(resolved[0].origin_hexes, vec!["origin".to_string()]);
    }
}
