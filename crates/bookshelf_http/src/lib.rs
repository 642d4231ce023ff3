//! HTTP surface for the bookshelf catalog.
//!
//! # Responsibility
//! - Expose the catalog read use-cases as JSON endpoints.
//! - Map storage failures to 500 responses instead of crashing the process.
//! - Own server configuration and the serve loop.
//!
//! # Invariants
//! - Handlers receive storage access only through [`AppState`].
//! - Every request opens and releases its own read-only connection.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::NOT_FOUND_BODY;
pub use server::{build_router, serve};
pub use state::AppState;
