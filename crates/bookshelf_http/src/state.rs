//! Per-request storage access.

use crate::error::ApiError;
use bookshelf_core::db::connect_db;
use bookshelf_core::{CatalogService, RepoResult, SqliteBookRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handler state: where the catalog lives, nothing more.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs `op` against a fresh read-only catalog connection.
    ///
    /// The connection is opened and dropped on the blocking pool, so it is
    /// released on every exit path before this future resolves.
    pub async fn with_catalog<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&CatalogService<SqliteBookRepository<'conn>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        let outcome = tokio::task::spawn_blocking(move || -> RepoResult<T> {
            let conn = connect_db(db_path.as_path())?;
            let catalog = CatalogService::new(SqliteBookRepository::new(&conn));
            op(&catalog)
        })
        .await
        .map_err(ApiError::TaskJoin)?;

        outcome.map_err(ApiError::Storage)
    }
}
