//! MCP server handler.
//!
//! Tool routes are built in `domains/tools/router.rs`; this handler only
//! owns the router and answers `initialize`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use super::deps::ToolDependencies;
use crate::domains::tools::build_tool_router;

const INSTRUCTIONS: &str = "Read-only USPTO trademark lookups. \
    search_wordmark finds similar marks in a local database (or returns a manual \
    search link when no database is configured). search_by_serial and \
    search_by_registration return full TSDR case data as JSON or XML. \
    get_trademark_status, get_trademark_image and get_trademark_documents \
    return a quick status summary, the mark image URL and the document bundle \
    URL. Identifier-based tools require USPTO_API_KEY.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with production dependencies.
    pub fn new(config: Config) -> Self {
        let deps = ToolDependencies::from_config(&config);
        Self::with_dependencies(config, deps)
    }

    /// Create a server with an explicit dependency bundle.
    pub fn with_dependencies(config: Config, deps: ToolDependencies) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(deps),
            config: Arc::new(config),
        }
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
