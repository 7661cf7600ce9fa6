//! Error type for server startup and serving.
//!
//! Tool lookups never surface these: every lookup failure is rendered to
//! text inside the tool layer, and bad arguments become MCP `invalid_params`
//! errors.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport setup or serving failure.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
