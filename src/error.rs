//! Error kinds per spec: Configuration, Store, Diff. Decode errors are
//! recovered inline (replacement + warning) and never escape as a variant.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid repository path: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to open repository at {path}: {source}")]
    OpenRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("malformed date '{0}', expected DD/MM/YYYY")]
    MalformedDate(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
