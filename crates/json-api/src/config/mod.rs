//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing export and request timing settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::observability::LogFormat;

    use super::*;

    #[test]
    fn parses_nested_groups_from_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/storefront",
            "--log-format",
            "json",
            "--slow-request-threshold-ms",
            "250",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(config.database.database_url, "postgres://localhost/storefront");
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.observability.slow_request_threshold_ms, 250);
        assert_eq!(config.observability.otel_service_name, "storefront-json");
        assert_eq!(config.database.pool_settings().max_connections, 10);
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);

        Ok(())
    }
}
