//! HTML pages: the API landing page and the fixed 404 body.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Body of every 404 response.
pub const NOT_FOUND_BODY: &str = "<h1>404</h1><p>Page not found.</p>";

const HOME_PAGE: &str = include_str!("../../templates/home.html");

pub(crate) async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Fixed 404 response, shared by the router fallback and the filter
/// endpoint when no filter parameter was given.
pub async fn not_found() -> Response {
    not_found_response()
}

pub(crate) fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response()
}
