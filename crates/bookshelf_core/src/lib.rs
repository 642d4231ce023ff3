//! Core domain logic for the bookshelf catalog service.
//! This crate is the single source of truth for storage and query invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookValidationError};
pub use repo::book_repo::{
    BookFilter, BookPredicate, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use service::bootstrap::{
    bootstrap_catalog, seed_books, seed_catalog, BootstrapError, BootstrapReport, SEED_BOOKS,
};
pub use service::catalog::{CatalogService, FilterOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
