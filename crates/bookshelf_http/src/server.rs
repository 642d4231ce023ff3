//! Router assembly and the serve loop.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::catalog_routes;
use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use bookshelf_core::bootstrap_catalog;
use log::{error, info, warn};
use std::time::Instant;

/// Builds the full application router around `state`.
pub fn build_router(state: AppState) -> Router {
    catalog_routes()
        .with_state(state)
        .layer(middleware::from_fn(log_request))
}

/// Bootstraps the catalog, then serves HTTP until Ctrl-C.
///
/// # Errors
/// - `ServerError::Bootstrap` when the catalog file cannot be opened.
/// - `ServerError::Config` / `ServerError::Io` when the listener cannot bind.
///
/// Schema and seed failures are logged and do not stop startup.
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;

    let db_path = config.db_path.clone();
    let bootstrap = tokio::task::spawn_blocking(move || bootstrap_catalog(db_path))
        .await
        .map_err(ServerError::Task)?;
    match bootstrap {
        Ok(_) => {}
        Err(err) if err.is_fatal() => return Err(ServerError::Bootstrap(err)),
        Err(err) => warn!(
            "event=server_start module=http status=degraded reason=bootstrap_failed error={err}"
        ),
    }

    let router = build_router(AppState::new(config.db_path.clone()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=http status=ok addr={} db_path={}",
        addr,
        config.db_path.display()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_stop module=http status=error error_code=signal_failed error={err}");
        std::future::pending::<()>().await;
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    // Path only; query strings carry user filter values.
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
