//! Git Adapter (SPEC_FULL §4.G). The thin seam where repository traversal
//! and diff production — both explicitly delegated to a VCS library by the
//! spec — happen, projected into the plain data types the Hunk Decomposer
//! and Ingestor consume.

use crate::hunk::{LineClass, RawHunk, RawLine};

/// Creates a topological, oldest-first revwalk over `repo`, starting at
/// HEAD — the "chronologically-ordered stream of commits" the inbound VCS
/// contract (spec §6) requires.
pub fn revwalk(repo: &git2::Repository) -> Result<git2::Revwalk<'_>, git2::Error> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;
    let mut sorting = git2::Sort::TOPOLOGICAL;
    sorting.insert(git2::Sort::REVERSE);
    revwalk.set_sorting(sorting)?;
    Ok(revwalk)
}

/// Decodes a possibly non-UTF-8 byte path, recovering via a replacement
/// string and a warning (spec §7 Decode error policy) rather than failing
/// the whole commit.
pub fn decode_path(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => {
            log::warn!("non-UTF-8 path encountered; substituting replacement characters");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Decodes a possibly non-UTF-8 commit message the same way.
pub fn decode_message(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => {
            log::warn!("non-UTF-8 commit message encountered; substituting replacement characters");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Computes the tree-to-tree diff between `parent` and `child` and projects
/// every hunk into the plain `RawHunk` shape the Hunk Decomposer consumes.
/// A failure here is a recoverable Diff error (spec §7); the caller decides
/// whether to skip the parent.
pub fn diff_hunks(
    repo: &git2::Repository,
    parent: git2::Oid,
    child: git2::Oid,
) -> Result<Vec<RawHunk>, git2::Error> {
    let parent_tree = repo.find_commit(parent)?.tree()?;
    let child_tree = repo.find_commit(child)?.tree()?;

    let mut diff_options = git2::DiffOptions::new();
    let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&child_tree), Some(&mut diff_options))?;

    let mut hunks = Vec::new();
    for delta_index in 0..diff.deltas().len() {
        let Some(patch) = git2::Patch::from_diff(&diff, delta_index)? else {
            continue;
        };

        let delta = patch.delta();
        let old_path = delta
            .old_file()
            .path_bytes()
            .map(decode_path)
            .unwrap_or_default();
        let new_path = delta
            .new_file()
            .path_bytes()
            .map(decode_path)
            .unwrap_or_default();

        for hunk_index in 0..patch.num_hunks() {
            let (hunk, line_count) = patch.hunk(hunk_index)?;
            let mut lines = Vec::with_capacity(line_count);
            for line_index in 0..line_count {
                let line = patch.line_in_hunk(hunk_index, line_index)?;
                let class = match line.origin() {
                    '+' => LineClass::Addition,
                    '-' => LineClass::Deletion,
                    _ => LineClass::Context,
                };
                lines.push(RawLine { body: decode_message(line.content()), class });
            }
            hunks.push(RawHunk {
                old_path: old_path.clone(),
                new_path: new_path.clone(),
                old_start: hunk.old_start(),
                new_start: hunk.new_start(),
                lines,
            });
        }
    }

    Ok(hunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_path_recovers_invalid_utf8() {
        let invalid = vec![0x66, 0x6f, 0xff, 0x6f]; // "fo\xFFo"
        let decoded = decode_path(&invalid);
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn decode_path_passes_through_valid_utf8() {
        assert_eq!(decode_path(b"src/main.c"), "src/main.c");
    }
}
