//! Error types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::{BootstrapError, RepoError};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

/// Request-time failure; always rendered as a 500.
#[derive(Debug)]
pub enum ApiError {
    /// Opening the catalog or running the query failed.
    Storage(RepoError),
    /// The blocking storage task panicked or was cancelled.
    TaskJoin(JoinError),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::TaskJoin(err) => write!(f, "storage task failed: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::TaskJoin(err) => Some(err),
        }
    }
}

/// JSON body of a 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("event=http_error module=http status=error error={self}");
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Startup failure of the server runner.
#[derive(Debug)]
pub enum ServerError {
    /// Host/port cannot be turned into a listen address.
    Config(String),
    /// The catalog could not be opened at all.
    Bootstrap(BootstrapError),
    /// The bootstrap task panicked or was cancelled.
    Task(JoinError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
            Self::Bootstrap(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "bootstrap task failed: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Bootstrap(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use bookshelf_core::RepoError;

    #[test]
    fn storage_error_renders_as_internal_server_error() {
        let err = ApiError::Storage(RepoError::InvalidData("bad row".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
