//! `bookshelf` server entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging, then hand off to the HTTP runner.
//! - Map startup failures to a non-zero exit code.

use bookshelf_core::{core_version, init_logging};
use bookshelf_http::{serve, ServerConfig};
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    // Logging is not up yet, so this is the one place that writes to stderr directly.
    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("bookshelf: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    match serve(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            log::logger().flush();
            ExitCode::FAILURE
        }
    }
}
