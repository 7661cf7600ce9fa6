//! Tool-specific error types.
//!
//! [`ToolError`] covers argument validation and is reported to the host as a
//! protocol error. [`LookupError`] covers everything that can go wrong while a
//! tool runs; its `Display` output is the text returned to the agent, so each
//! variant's message is a complete, user-facing template.

use thiserror::Error;

use crate::core::deps::{FetchError, StoreError};

/// Errors raised before a tool executes.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

/// Failures during a lookup, rendered to text by the tool.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(
        "Error: USPTO API key not configured. Set the USPTO_API_KEY environment variable \
         to use this tool. Get a free API key at https://account.uspto.gov/api-manager/"
    )]
    ApiKeyMissing,

    #[error(
        "Error: the USPTO API rejected the configured API key ({masked_key}).\n\n\
         Check that:\n\
         1. USPTO_API_KEY holds the complete key from https://account.uspto.gov/api-manager/\n\
         2. The key has not expired or been revoked\n\
         3. The key was issued for the TSDR API\n\n\
         Restart the server after updating the key."
    )]
    ApiKeyRejected { masked_key: String },

    #[error("Error: USPTO API returned {status} {status_text}\n\n{body}")]
    HttpStatus {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Error: failed to reach the USPTO API: {0}")]
    Transport(String),

    #[error("Error: could not parse the USPTO API response: {0}")]
    Parse(String),

    #[error(
        "Error searching trademark database: {message}\n\n\
         You can search manually at: {manual_search_url}"
    )]
    Database {
        message: String,
        manual_search_url: String,
    },
}

impl From<FetchError> for LookupError {
    fn from(e: FetchError) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl LookupError {
    /// Database failure with a pointer to the manual search page.
    pub fn database(error: StoreError, manual_search_url: impl Into<String>) -> Self {
        Self::Database {
            message: error.to_string(),
            manual_search_url: manual_search_url.into(),
        }
    }

    /// Rejected-credential error showing only the key prefix.
    pub fn api_key_rejected(api_key: &str) -> Self {
        Self::ApiKeyRejected {
            masked_key: mask_api_key(api_key),
        }
    }
}

/// First eight characters of the key followed by an ellipsis.
pub fn mask_api_key(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(8).collect();
    format!("{}...", prefix)
}
