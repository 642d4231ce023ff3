//! Server configuration from command-line flags and environment.

use crate::error::ServerError;
use bookshelf_core::default_log_level;
use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

/// Bookshelf catalog server.
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf", version)]
pub struct ServerConfig {
    /// SQLite catalog file; created and seeded when absent.
    #[arg(long, env = "BOOKSHELF_DB_PATH", default_value = "./books.db")]
    pub db_path: PathBuf,

    /// Interface to listen on.
    #[arg(long, env = "BOOKSHELF_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "BOOKSHELF_PORT", default_value_t = 5000)]
    pub port: u16,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Absolute directory for rotated log files; stderr only when unset.
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Resolves `host:port` into the first matching socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|err| ServerError::Config(format!("invalid address `{}`: {err}", self.host)))?
            .next()
            .ok_or_else(|| ServerError::Config(format!("no address for host `{}`", self.host)))
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "bookshelf",
            "--db-path",
            "/tmp/catalog.db",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/bookshelf",
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/bookshelf"));
        assert_eq!(
            config.socket_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = ServerConfig::try_parse_from(["bookshelf", "--port", "70000"]);
        assert!(result.is_err());
    }

    #[test]
    fn unresolvable_host_is_a_config_error() {
        let config = ServerConfig::try_parse_from([
            "bookshelf",
            "--host",
            "not a host name",
            "--port",
            "5000",
        ])
        .unwrap();

        let err = config.socket_addr().unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}
