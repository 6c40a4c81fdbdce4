//! Duck-typed CLI option object (spec §9), realized as an explicit,
//! validated value instead of a structured bag of whatever flags happened
//! to be recognized.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Mines a Git repository for bug-inducing commits.
///
/// Walks commit history, decomposes each touched hunk into changed/deleted/
/// added line edits, and persists the result into an embedded store. Queries
/// that store to report, for each referenced bug, the commits that
/// introduced the lines its fix later touched.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the Git repository to mine.
    repo: PathBuf,

    /// Path to the embedded store file. Created if absent.
    #[arg(long, default_value = "db.sqlite", value_name = "FILE")]
    database: PathBuf,

    /// Inclusive lower bound on fix-commit date (DD/MM/YYYY).
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Inclusive upper bound on fix-commit date (DD/MM/YYYY).
    #[arg(long, value_name = "DATE")]
    to: Option<String>,

    /// Run the ingestor before resolving origins.
    #[arg(short, long)]
    build: bool,

    /// Be more verbose.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Be less verbose.
    #[arg(short, long)]
    quiet: bool,
}

/// Fully-validated configuration, the result of parsing and checking a
/// [`Cli`] value. This is what every downstream entry point takes.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: PathBuf,
    pub database: PathBuf,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub build: bool,
    pub log_level: log::LevelFilter,
}

impl Config {
    pub fn from_args() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(cli: Cli) -> Result<Self> {
        if !cli.repo.exists() {
            return Err(Error::InvalidPath(cli.repo));
        }

        let from = cli.from.as_deref().map(parse_date).transpose()?;
        let to = cli.to.as_deref().map(parse_date).transpose()?;

        let log_level = if cli.verbose {
            log::LevelFilter::Debug
        } else if cli.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        };

        Ok(Config {
            repo: cli.repo,
            database: cli.database,
            from,
            to,
            build: cli.build,
            log_level,
        })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo
    }
}

/// Parses `DD/MM/YYYY` into epoch seconds at midnight UTC.
fn parse_date(text: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| Error::MalformedDate(text.to_owned()))?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::MalformedDate(text.to_owned()))?;
    Ok(datetime.and_utc().timestamp())
}
