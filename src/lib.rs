//! This crate mines a Git repository to identify bug-inducing commits:
//! commits whose lines were later modified by a bug-fixing commit
//! referenced from an issue tracker.
//!
//! The ingestion core (hunk decomposition + line matching) and the query
//! core (origin resolution) are the two algorithmically interesting pieces;
//! everything else is plumbing around an embedded SQLite store.

#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod git_adapter;
pub mod hungarian;
pub mod hunk;
pub mod ingest;
pub mod matcher;
pub mod model;
pub mod report;
pub mod resolve;
pub mod store;
pub mod tagger;
