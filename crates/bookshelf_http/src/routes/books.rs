//! Book catalog endpoints.
//!
//! - `GET /api/v1/books/all` lists every book.
//! - `GET /api/v1/books?id=&published=&author=` lists books matching all
//!   supplied parameters; with none supplied it answers 404.

use super::pages::not_found_response;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::{Book, BookFilter, FilterOutcome};

pub(crate) async fn list_all_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.with_catalog(|catalog| catalog.list_all()).await?;
    Ok(Json(books))
}

pub(crate) async fn filter_books(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let filter = BookFilter::from_query_pairs(pairs);

    // Skip the connection entirely; the service would not query anyway.
    if filter.is_empty() {
        return Ok(not_found_response());
    }

    let outcome = state
        .with_catalog(move |catalog| catalog.filter(&filter))
        .await?;

    Ok(match outcome {
        FilterOutcome::Matches(books) => Json(books).into_response(),
        FilterOutcome::NoCriteria => not_found_response(),
    })
}
