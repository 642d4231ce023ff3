//! Core use-case services.
//!
//! # Responsibility
//! - Bootstrap the catalog storage at process start.
//! - Orchestrate repository reads into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod bootstrap;
pub mod catalog;
