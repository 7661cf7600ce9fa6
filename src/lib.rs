//! USPTO trademark lookup tools served over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the dependency bundle handed to
//!   tools (HTTP capability, database driver, connection cache), the server
//!   handler and transports
//! - **domains::tools**: the six read-only lookup tools
//!
//! Every tool is total: lookups always produce text for the agent, and only
//! malformed arguments are reported as protocol errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use trademark_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result, ToolDependencies};
