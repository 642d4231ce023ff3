//! Route table and handlers.

mod books;
mod pages;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;

pub use pages::{not_found, NOT_FOUND_BODY};

/// Catalog and page routes; unmatched paths fall through to [`not_found`].
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/api/v1/books/all", get(books::list_all_books))
        .route("/api/v1/books", get(books::filter_books))
        .fallback(not_found)
}
