//! Catalog read use-cases.
//!
//! # Responsibility
//! - Provide the "all books" and "filtered books" entry points.
//! - Decide when a filter request expresses no intent at all.
//!
//! # Invariants
//! - A filter with no supplied parameter never reaches storage.
//! - Service layer remains storage-agnostic.

use crate::model::book::Book;
use crate::repo::book_repo::{BookFilter, BookRepository, RepoResult};
use log::debug;

/// Result of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No filter parameter was supplied; no query ran.
    NoCriteria,
    /// Books matching every supplied parameter (possibly none).
    Matches(Vec<Book>),
}

/// Use-case service wrapper for catalog reads.
pub struct CatalogService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every book in id order.
    pub fn list_all(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Lists books matching the AND of every supplied filter parameter.
    ///
    /// # Contract
    /// - Returns `FilterOutcome::NoCriteria` without querying when
    ///   `filter.is_empty()`.
    /// - Zero matches is `Matches(vec![])`, not an error.
    pub fn filter(&self, filter: &BookFilter) -> RepoResult<FilterOutcome> {
        if filter.is_empty() {
            debug!("event=catalog_filter module=service status=skipped reason=no_criteria");
            return Ok(FilterOutcome::NoCriteria);
        }

        let books = self.repo.filter_books(&filter.to_predicate())?;
        debug!(
            "event=catalog_filter module=service status=ok keys={} matches={}",
            filter.present_keys().join(","),
            books.len()
        );
        Ok(FilterOutcome::Matches(books))
    }
}
