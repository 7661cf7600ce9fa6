//! Configuration management for the MCP server.
//!
//! Populated from environment variables (and an optional `.env` file) at
//! process start, then treated as read-only.

use super::deps::database::DEFAULT_MAX_CONNECTIONS;
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials.
    pub credentials: CredentialsConfig,

    /// Optional trademark database.
    pub database: DatabaseConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Credentials for the USPTO TSDR API.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// API key sent as `USPTO-API-KEY`.
    /// Get a key at: https://account.uspto.gov/api-manager/
    pub uspto_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "uspto_api_key",
                &self.uspto_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Connection settings for the local trademark database.
///
/// The schema (table plus `pg_trgm` index) is provisioned externally.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Wordmark search falls back to a manual
    /// search link when unset.
    pub url: Option<String>,

    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "trademark-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). The API key and database URL
    /// use their conventional names, `USPTO_API_KEY` and `DATABASE_URL`.
    ///
    /// Nothing is logged here: this runs before the subscriber exists. Call
    /// [`Config::log_summary`] once logging is initialized.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.credentials.uspto_api_key = non_blank_var("USPTO_API_KEY");
        config.database.url = non_blank_var("DATABASE_URL");

        if let Ok(max) = std::env::var("MCP_DB_MAX_CONNECTIONS") {
            config.database.max_connections = max
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        }

        config
    }

    /// Report which optional capabilities are configured.
    pub fn log_summary(&self) {
        info!("Log level: {}", self.logging.level);

        if self.credentials.uspto_api_key.is_some() {
            info!("USPTO API key loaded from environment");
        } else {
            warn!(
                "USPTO_API_KEY not set - serial, registration, status, image and \
                 document lookups will report a configuration error"
            );
        }

        if self.database.url.is_some() {
            info!(
                "Trademark database configured (max {} connections)",
                self.database.max_connections
            );
        } else {
            info!("DATABASE_URL not set - wordmark search will return manual search links");
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
