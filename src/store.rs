//! Persistence Schema (spec §3/§6/§4.F). An embedded SQLite store (via
//! `rusqlite`) owning storage for all six entities. Schema creation is
//! idempotent; per-commit ingestion is expected to run inside one
//! [`rusqlite::Transaction`] so that the Commit, CommitParent, BugCommit,
//! and Edit rows for that commit become visible atomically (spec §5).

use rusqlite::Connection;

use crate::error::Result;
use crate::model::{Bug, Commit, Edit, Id};

pub struct Store {
    pub conn: Connection,
}

impl Store {
    /// Opens (creating if absent) the store file and ensures its schema.
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// Opens an in-memory store, useful for tests.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS files (
            file_id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL UNIQUE
        );
        CREATE TABLE IF NOT EXISTS commits (
            commit_id INTEGER PRIMARY KEY AUTOINCREMENT,
            hex TEXT NOT NULL UNIQUE,
            date INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS commits_commits (
            parent_id INTEGER NOT NULL REFERENCES commits(commit_id),
            child_id INTEGER NOT NULL REFERENCES commits(commit_id),
            PRIMARY KEY (parent_id, child_id)
        );
        CREATE TABLE IF NOT EXISTS edits (
            edit_id INTEGER PRIMARY KEY AUTOINCREMENT,
            old_file_id INTEGER REFERENCES files(file_id),
            new_file_id INTEGER REFERENCES files(file_id),
            old_line INTEGER,
            new_line INTEGER,
            commit_id INTEGER NOT NULL REFERENCES commits(commit_id)
        );
        CREATE TABLE IF NOT EXISTS bugs (
            bug_id INTEGER PRIMARY KEY AUTOINCREMENT,
            bug_no INTEGER NOT NULL UNIQUE
        );
        CREATE TABLE IF NOT EXISTS bugs_commits (
            bug_id INTEGER NOT NULL REFERENCES bugs(bug_id),
            commit_id INTEGER NOT NULL REFERENCES commits(commit_id),
            PRIMARY KEY (bug_id, commit_id)
        );

        CREATE INDEX IF NOT EXISTS commits_hex_index ON commits(hex);
        CREATE INDEX IF NOT EXISTS edits_old_file_index ON edits(old_file_id);
        CREATE INDEX IF NOT EXISTS edits_new_file_index ON edits(new_file_id);
        CREATE INDEX IF NOT EXISTS edits_commit_index ON edits(commit_id);
        CREATE INDEX IF NOT EXISTS bugs_bug_index ON bugs(bug_id);
        CREATE INDEX IF NOT EXISTS commits_commit_index ON commits(commit_id);
        ",
    )?;
    Ok(())
}

/// Looks up a row's id by a unique-keyed `SELECT`, treating "no rows" as
/// `None` and anything else as a propagated store error.
fn lookup_id(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Option<Id>> {
    match conn.query_row(sql, params, |row| row.get(0)) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Finds or creates the File row for `path`.
pub fn upsert_file(conn: &Connection, path: &str) -> Result<Id> {
    if let Some(id) =
        lookup_id(conn, "SELECT file_id FROM files WHERE path = ?1", rusqlite::params![path])?
    {
        return Ok(id);
    }
    conn.execute("INSERT INTO files (path) VALUES (?1)", rusqlite::params![path])?;
    Ok(conn.last_insert_rowid())
}

/// Finds or creates the Commit row for `hex`, leaving `date` unchanged if
/// the commit was already present (Commit rows are immutable after
/// creation per spec §3).
pub fn upsert_commit(conn: &Connection, hex: &str, date: i64) -> Result<Id> {
    if let Some(id) =
        lookup_id(conn, "SELECT commit_id FROM commits WHERE hex = ?1", rusqlite::params![hex])?
    {
        return Ok(id);
    }
    conn.execute("INSERT INTO commits (hex, date) VALUES (?1, ?2)", rusqlite::params![hex, date])?;
    Ok(conn.last_insert_rowid())
}

/// Links `parent -> child`; at-most-once per pair (spec §3).
pub fn link_parent(conn: &Connection, parent: Id, child: Id) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO commits_commits (parent_id, child_id) VALUES (?1, ?2)",
        rusqlite::params![parent, child],
    )?;
    Ok(())
}

/// Finds or creates the Bug row for `bug_no`.
pub fn upsert_bug(conn: &Connection, bug_no: i64) -> Result<Id> {
    if let Some(id) =
        lookup_id(conn, "SELECT bug_id FROM bugs WHERE bug_no = ?1", rusqlite::params![bug_no])?
    {
        return Ok(id);
    }
    conn.execute("INSERT INTO bugs (bug_no) VALUES (?1)", rusqlite::params![bug_no])?;
    Ok(conn.last_insert_rowid())
}

/// Links a Bug to a Commit whose message referenced it.
pub fn link_bug_commit(conn: &Connection, bug: Id, commit: Id) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO bugs_commits (bug_id, commit_id) VALUES (?1, ?2)",
        rusqlite::params![bug, commit],
    )?;
    Ok(())
}

/// Inserts one Edit row. Edits are append-only; never updated (spec §3).
pub fn insert_edit(
    conn: &Connection,
    commit: Id,
    old_file: Option<Id>,
    new_file: Option<Id>,
    old_line: Option<u32>,
    new_line: Option<u32>,
) -> Result<Id> {
    conn.execute(
        "INSERT INTO edits (old_file_id, new_file_id, old_line, new_line, commit_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![old_file, new_file, old_line, new_line, commit],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_commit_by_hex(conn: &Connection, hex: &str) -> Result<Option<Commit>> {
    let result = conn.query_row(
        "SELECT commit_id, hex, date FROM commits WHERE hex = ?1",
        rusqlite::params![hex],
        |row| Ok(Commit { id: row.get(0)?, hex: row.get(1)?, date: row.get(2)? }),
    );
    match result {
        Ok(commit) => Ok(Some(commit)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn all_bugs(conn: &Connection) -> Result<Vec<Bug>> {
    let mut stmt = conn.prepare("SELECT bug_id, bug_no FROM bugs")?;
    let rows = stmt.query_map([], |row| Ok(Bug { id: row.get(0)?, bug_no: row.get(1)? }))?;
    Ok(rows.collect::<std::result::Result<_, _>>()?)
}

/// Commits linked to `bug`, optionally restricted to `[from, to]` on date
/// (spec §4.E's date filter; bounds are inclusive).
pub fn fix_commits_for_bug(
    conn: &Connection,
    bug: Id,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<Vec<Commit>> {
    let mut sql = "
        SELECT c.commit_id, c.hex, c.date
        FROM commits c
        JOIN bugs_commits bc ON bc.commit_id = c.commit_id
        WHERE bc.bug_id = ?1
    "
    .to_owned();
    if from.is_some() {
        sql.push_str(" AND c.date >= ?2");
    }
    if to.is_some() {
        sql.push_str(" AND c.date <= ?3");
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params![bug, from.unwrap_or(i64::MIN), to.unwrap_or(i64::MAX)],
        |row| Ok(Commit { id: row.get(0)?, hex: row.get(1)?, date: row.get(2)? }),
    )?;
    Ok(rows.collect::<std::result::Result<_, _>>()?)
}

pub fn edits_for_commit(conn: &Connection, commit: Id) -> Result<Vec<Edit>> {
    let mut stmt = conn.prepare(
        "SELECT edit_id, old_file_id, new_file_id, old_line, new_line, commit_id
         FROM edits WHERE commit_id = ?1",
    )?;
    let rows = stmt.query_map(rusqlite::params![commit], |row| {
        Ok(Edit {
            id: row.get(0)?,
            old_file: row.get(1)?,
            new_file: row.get(2)?,
            old_line: row.get(3)?,
            new_line: row.get(4)?,
            commit: row.get(5)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<_, _>>()?)
}

/// The latest commit strictly before `before_date` whose own Edit
/// introduced (as the new side) `(file, line)` — the core query of the
/// Origin Resolver (spec §4.E). Ties broken by largest commit id.
pub fn find_origin(
    conn: &Connection,
    file: Id,
    line: u32,
    before_date: i64,
) -> Result<Option<Commit>> {
    let result = conn.query_row(
        "
        SELECT c.commit_id, c.hex, c.date
        FROM commits c
        JOIN edits e ON e.commit_id = c.commit_id
        WHERE e.new_file_id = ?1 AND e.new_line = ?2 AND c.date < ?3
        ORDER BY c.date DESC, c.commit_id DESC
        LIMIT 1
        ",
        rusqlite::params![file, line, before_date],
        |row| Ok(Commit { id: row.get(0)?, hex: row.get(1)?, date: row.get(2)? }),
    );
    match result {
        Ok(commit) => Ok(Some(commit)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
