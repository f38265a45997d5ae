//! Server configuration, read from flags, the environment or `.env`.

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Dispatch JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "dispatch-json", about = "Dispatch JSON API Server", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(flatten)]
    pub observability: ObservabilityConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Parse arguments, falling back to the environment and then to `.env`.
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env is fine; real environment variables still apply.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::observability::LogFormat;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_url_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "dispatch-json",
            "--database-url",
            "postgres://localhost/dispatch",
        ])?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.database.run_migrations, "migrations are opt-in");
        assert_eq!(config.auth.token_ttl_hours, 12);
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn token_lifetime_must_be_positive() {
        let result = ServerConfig::try_parse_from([
            "dispatch-json",
            "--database-url",
            "postgres://localhost/dispatch",
            "--token-ttl-hours",
            "0",
        ]);

        assert!(result.is_err(), "a zero hour lifetime should be rejected");
    }
}
