//! Plain record types for the six persisted entities (spec §3). No entity
//! holds references to another; relations are foreign-key fields resolved
//! through the store (spec §9's "re-architect as plain record types").

/// Opaque, monotonically-assigned identifier.
pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: Id,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Id,
    pub hex: String,
    pub date: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitParent {
    pub parent: Id,
    pub child: Id,
}

/// Exactly one of `old_line`/`new_line` shapes holds (spec §3 invariant 2):
/// deletion (old set, new absent), addition (old absent, new set), or
/// change (both set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub id: Id,
    pub old_file: Option<Id>,
    pub new_file: Option<Id>,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
    pub commit: Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bug {
    pub id: Id,
    pub bug_no: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugCommit {
    pub bug: Id,
    pub commit: Id,
}
