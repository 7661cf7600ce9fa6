//! Dependency bundle handed to every tool.
//!
//! Production code builds it from [`Config`]; tests substitute fakes for the
//! HTTP capability and the database driver.

pub mod cache;
pub mod database;
pub mod http;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use super::config::Config;

pub use cache::{Availability, ConnectionCache};
pub use database::{
    DatabaseDriver, DriverLoader, QueryParam, StoreError, TrademarkRow, TrademarkStore,
};
pub use http::{FetchError, HttpFetch, HttpMethod, HttpRequest, HttpResponse, ReqwestFetcher};

/// Accessor for an optional secret or setting.
pub type SettingSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Everything a tool needs from the outside world.
#[derive(Clone)]
pub struct ToolDependencies {
    /// Returns the USPTO API key, if configured.
    pub api_key_source: SettingSource,

    /// Returns the database connection string, if configured.
    pub database_url_source: SettingSource,

    /// Outbound HTTP capability.
    pub http: Arc<dyn HttpFetch>,

    /// Loads the database driver on first use.
    pub driver_loader: DriverLoader,

    /// Shared pool cache.
    pub connections: Arc<ConnectionCache>,
}

impl ToolDependencies {
    /// Build the production bundle from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.credentials.uspto_api_key.clone();
        let database_url = config.database.url.clone();

        Self {
            api_key_source: Arc::new(move || api_key.clone()),
            database_url_source: Arc::new(move || database_url.clone()),
            http: Arc::new(ReqwestFetcher::new()),
            driver_loader: database::driver_loader(config.database.max_connections),
            connections: Arc::new(ConnectionCache::new()),
        }
    }

    /// Configured API key; empty values count as absent.
    pub fn api_key(&self) -> Option<String> {
        (self.api_key_source)().filter(|k| !k.trim().is_empty())
    }

    /// Configured connection string; empty values count as absent.
    pub fn database_url(&self) -> Option<String> {
        (self.database_url_source)().filter(|u| !u.trim().is_empty())
    }
}

impl std::fmt::Debug for ToolDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDependencies")
            .field("api_key", &self.api_key().map(|_| "[REDACTED]"))
            .field("database_url", &self.database_url().map(|_| "[REDACTED]"))
            .field("connections", &self.connections)
            .finish_non_exhaustive()
    }
}
