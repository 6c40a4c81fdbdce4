//! Hunk Decomposer (spec §4.B). Splits a hunk's line stream into the
//! old-side (deletions, against the context+deletion view) and new-side
//! (additions, against the context+addition view) vectors the Line Matcher
//! consumes.
//!
//! The hunk descriptor and line stream are a plain in-memory projection
//! (`RawHunk`/`RawLine`) of whatever the Git Adapter produced from
//! `git2::Patch`, so this module has no dependency on a live repository and
//! is independently testable.

/// Classification of one line within a hunk's unified line stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Context,
    Addition,
    Deletion,
}

/// One line of a hunk's line stream.
#[derive(Debug, Clone)]
pub struct RawLine {
    pub body: String,
    pub class: LineClass,
}

/// Plain-data hunk descriptor consumed by the Hunk Decomposer.
#[derive(Debug, Clone)]
pub struct RawHunk {
    pub old_path: String,
    pub new_path: String,
    pub old_start: u32,
    pub new_start: u32,
    pub lines: Vec<RawLine>,
}

/// A line body paired with its position within its side's view.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedLine {
    pub body: String,
    pub index: usize,
}

/// The two ordered vectors a hunk decomposes into.
#[derive(Debug, Clone, Default)]
pub struct Decomposed {
    pub deletions: Vec<IndexedLine>,
    pub additions: Vec<IndexedLine>,
}

/// Decomposes a hunk's line stream into its deletion and addition vectors.
///
/// `index` for a deletion is its position within the old-side view (context
/// + deletion lines); `index` for an addition is its position within the
/// new-side view (context + addition lines) — per spec §4.B.
pub fn decompose(hunk: &RawHunk) -> Decomposed {
    let mut deletions = Vec::new();
    let mut additions = Vec::new();
    let mut old_index = 0usize;
    let mut new_index = 0usize;

    for line in &hunk.lines {
        match line.class {
            LineClass::Context => {
                old_index += 1;
                new_index += 1;
            }
            LineClass::Deletion => {
                deletions.push(IndexedLine {
                    body: line.body.clone(),
                    index: old_index,
                });
                old_index += 1;
            }
            LineClass::Addition => {
                additions.push(IndexedLine {
                    body: line.body.clone(),
                    index: new_index,
                });
                new_index += 1;
            }
        }
    }

    Decomposed { deletions, additions }
}
