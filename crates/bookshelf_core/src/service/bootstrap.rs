//! Storage bootstrapper: schema creation and seed data.
//!
//! # Responsibility
//! - Open (or create) the catalog file once at process start.
//! - Ensure the `books` table exists.
//! - Insert the fixed seed records exactly once.
//!
//! # Invariants
//! - Re-running against a seeded catalog never duplicates rows or errors.
//! - Seeding is atomic: either every missing seed row lands or none do.

use crate::db::{self, DbError};
use crate::model::book::Book;
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

/// `(id, title, author, first_sentence, year_published)` seed rows.
pub const SEED_BOOKS: &[(i64, &str, &str, &str, i64)] = &[
    (
        0,
        "A Fire Upon the Deep",
        "Vernor Vinge",
        "The coldsleep itself was dreamless.",
        1992,
    ),
    (
        1,
        "The Ones Who Walk Away From Omelas",
        "Ursula K. Le Guin",
        "With a clamor of bells that set the swallows soaring, the Festival",
        1973,
    ),
    (
        2,
        "Dhalgren",
        "Samuel R. Delany",
        "to wound the autumnal city.",
        1975,
    ),
];

/// Returns the seed rows as domain records.
pub fn seed_books() -> Vec<Book> {
    SEED_BOOKS
        .iter()
        .map(|&(id, title, author, first_sentence, year)| {
            Book::new(id, title, author, first_sentence, year)
        })
        .collect()
}

/// Outcome of a successful bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Seed rows written by this run; `0` on every run after the first.
    pub inserted: usize,
    /// Rows in the catalog after seeding.
    pub total: u64,
}

/// Bootstrap failure, split by the step that failed.
#[derive(Debug)]
pub enum BootstrapError {
    /// The database file could not be opened or created.
    Open(DbError),
    /// The `books` schema could not be created or verified.
    Schema(DbError),
    /// Seed rows could not be written.
    Seed(RepoError),
}

impl BootstrapError {
    /// Whether startup must stop. Only an open failure is fatal; after a
    /// schema or seed failure requests still run and fail individually.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open catalog database: {err}"),
            Self::Schema(err) => write!(f, "cannot ensure catalog schema: {err}"),
            Self::Seed(err) => write!(f, "cannot seed catalog: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Schema(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

/// Opens the catalog at `path`, ensures the schema and seeds it.
///
/// # Side effects
/// - Creates the database file when absent.
/// - Emits `catalog_bootstrap` logging events with duration and status.
pub fn bootstrap_catalog(path: impl AsRef<Path>) -> Result<BootstrapReport, BootstrapError> {
    let started_at = Instant::now();
    info!(
        "event=catalog_bootstrap module=service status=start path={}",
        path.as_ref().display()
    );

    let result = bootstrap_steps(path.as_ref());
    match &result {
        Ok(report) => info!(
            "event=catalog_bootstrap module=service status=ok duration_ms={} inserted={} total={}",
            started_at.elapsed().as_millis(),
            report.inserted,
            report.total
        ),
        Err(err) => error!(
            "event=catalog_bootstrap module=service status=error duration_ms={} fatal={} error={}",
            started_at.elapsed().as_millis(),
            err.is_fatal(),
            err
        ),
    }
    result
}

fn bootstrap_steps(path: &Path) -> Result<BootstrapReport, BootstrapError> {
    let mut conn = db::open_file(path).map_err(BootstrapError::Open)?;
    db::ensure_schema(&mut conn).map_err(BootstrapError::Schema)?;
    seed_catalog(&mut conn).map_err(BootstrapError::Seed)
}

/// Inserts every missing seed row in one transaction.
///
/// Requires the schema to exist on `conn`.
pub fn seed_catalog(conn: &mut Connection) -> RepoResult<BootstrapReport> {
    let tx = conn.transaction()?;
    let (inserted, total) = {
        let repo = SqliteBookRepository::new(&tx);
        let mut inserted = 0;
        for book in seed_books() {
            if repo.insert_if_absent(&book)? {
                inserted += 1;
            }
        }
        (inserted, repo.count_books()?)
    };
    tx.commit()?;

    Ok(BootstrapReport { inserted, total })
}
