//! Core infrastructure: configuration, error handling, the dependency bundle
//! handed to tools, server lifecycle and transports.

pub mod config;
pub mod deps;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use deps::ToolDependencies;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
