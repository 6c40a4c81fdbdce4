//! Ingestor (spec §4.D). Drives a chronological walk of the repository,
//! persisting each commit, its parents, its bug links, and the edits found
//! in hunks over tracked-extension files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::git_adapter;
use crate::hunk;
use crate::matcher;
use crate::model::Id;
use crate::store::{self, Store};
use crate::tagger;

/// Default tracked-extension allow-list (spec §4.B): C sources and headers.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".c", ".h"];

/// Runs the Ingestor over `repo`, extending `store`. Idempotent: re-running
/// over history already represented in the store produces no duplicate
/// rows (spec Testable Property 1), because every upsert looks up by its
/// unique key first.
pub fn ingest(repo: &git2::Repository, store: &mut Store, extensions: &[&str]) -> Result<()> {
    let walk = git_adapter::revwalk(repo)?;

    for oid in walk {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        let hex = commit.id().to_string();

        let tx = store.conn.transaction()?;

        // Idempotence (spec Testable Property 1): a commit already fully
        // ingested in a prior run carries its bug links and edits already;
        // re-processing it here would duplicate the append-only Edit rows.
        // Revwalk visits parents before children, so by the time a commit
        // is reached here, every parent has already had its own body
        // processed in this run (first run) or in a prior one.
        if store::find_commit_by_hex(&tx, &hex)?.is_some() {
            continue;
        }

        log::info!("commit {}", commit.id());

        let date = commit.time().seconds();
        let commit_id = store::upsert_commit(&tx, &hex, date)?;

        let message = commit.message_bytes();
        for bug_no in tagger::extract_bug_numbers(&git_adapter::decode_message(message)) {
            let bug_id = store::upsert_bug(&tx, bug_no as i64)?;
            store::link_bug_commit(&tx, bug_id, commit_id)?;
            log::debug!("bug {}", bug_no);
        }

        for parent in commit.parents() {
            let parent_hex = parent.id().to_string();
            let parent_date = parent.time().seconds();
            let parent_id = store::upsert_commit(&tx, &parent_hex, parent_date)?;
            store::link_parent(&tx, parent_id, commit_id)?;

            match git_adapter::diff_hunks(repo, parent.id(), commit.id()) {
                Ok(hunks) => {
                    for raw_hunk in hunks {
                        if !has_tracked_extension(&raw_hunk.old_path, extensions) {
                            continue;
                        }
                        persist_hunk(&tx, commit_id, &raw_hunk)?;
                    }
                }
                Err(source) => {
                    // Diff error: recovered locally, this parent is skipped
                    // but the rest of the commit proceeds (spec §7).
                    log::warn!(
                        "failed to diff parent {} of {}: {}; skipping this parent",
                        parent_hex, hex, source
                    );
                }
            }
        }

        tx.commit().map_err(Error::from)?;
    }

    Ok(())
}

/// Known quirk, preserved per spec §9: only the *old* file extension is
/// tested. A file renamed `.txt -> .c` is skipped; `.c -> .txt` is
/// processed.
fn has_tracked_extension(old_path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| old_path.ends_with(ext))
}

fn persist_hunk(
    conn: &rusqlite::Connection,
    commit_id: Id,
    raw_hunk: &hunk::RawHunk,
) -> Result<()> {
    let old_file = non_empty(&raw_hunk.old_path)
        .map(|p| store::upsert_file(conn, p))
        .transpose()?;
    let new_file = non_empty(&raw_hunk.new_path)
        .map(|p| store::upsert_file(conn, p))
        .transpose()?;

    let decomposed = hunk::decompose(raw_hunk);
    let classified = matcher::classify(&decomposed);

    for (old_index, new_index) in classified.changed {
        store::insert_edit(
            conn,
            commit_id,
            old_file,
            new_file,
            Some(raw_hunk.old_start + old_index as u32),
            Some(raw_hunk.new_start + new_index as u32),
        )?;
    }
    for old_index in classified.pure_deletions {
        store::insert_edit(
            conn,
            commit_id,
            old_file,
            new_file,
            Some(raw_hunk.old_start + old_index as u32),
            None,
        )?;
    }
    for new_index in classified.pure_additions {
        store::insert_edit(
            conn,
            commit_id,
            old_file,
            new_file,
            None,
            Some(raw_hunk.new_start + new_index as u32),
        )?;
    }

    Ok(())
}

fn non_empty(path: &str) -> Option<&str> {
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Opens `path` as a Git repository, mapping failure to a Configuration
/// error per spec §7.
pub fn open_repository(path: &Path) -> Result<git2::Repository> {
    git2::Repository::open(path).map_err(|source| Error::OpenRepository { path: path.to_owned(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_extension_checks_old_path_only() {
        assert!(has_tracked_extension("src/foo.c", DEFAULT_EXTENSIONS));
        assert!(has_tracked_extension("include/foo.h", DEFAULT_EXTENSIONS));
        assert!(!has_tracked_extension("README.md", DEFAULT_EXTENSIONS));
    }
}
