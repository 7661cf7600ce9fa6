//! Tools domain module.
//!
//! Read-only trademark lookup tools exposed over MCP.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Builds the rmcp ToolRouter from the definitions
//! - `error.rs` - Validation errors and user-facing lookup messages
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()`,
//!    `to_tool()` and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add the route in `router.rs`

pub mod definitions;
mod error;
pub mod router;

pub use error::{LookupError, ToolError, mask_api_key};
pub use router::build_tool_router;
