//! Case lookup by serial number.
//!
//! Returns the full TSDR case record, pretty-printed JSON or raw XML.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{ResponseFormat, fetch_case_status, serial_status_url};
use crate::core::deps::ToolDependencies;
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result, validate_serial,
};
use crate::domains::tools::error::ToolError;

/// Parameters for serial number lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SerialLookupParams {
    /// 8-digit application serial number.
    #[schemars(description = "8-digit trademark serial number (e.g. 78462704)")]
    pub serial_number: String,

    /// Response format.
    #[serde(default)]
    #[schemars(description = "Response format: json (default) or xml")]
    pub format: ResponseFormat,
}

impl ValidateParams for SerialLookupParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_serial(&self.serial_number)
    }
}

/// Serial number lookup tool.
#[derive(Debug, Clone, Default)]
pub struct SerialLookupTool;

impl SerialLookupTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_by_serial";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up a trademark application by its 8-digit serial \
        number. Returns the complete USPTO TSDR case record (mark, owner, status, dates, goods \
        and services, prosecution history) as JSON or XML.";

    /// Execute the lookup. Always returns text.
    pub async fn execute(params: &SerialLookupParams, deps: &ToolDependencies) -> String {
        info!(
            "Serial lookup: {} ({:?})",
            params.serial_number, params.format
        );
        let url = serial_status_url(&params.serial_number, params.format);
        into_text(fetch_case_status(deps, url, params.format).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SerialLookupParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the given dependencies.
    pub fn create_route<S>(deps: ToolDependencies) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let deps = deps.clone();
            async move {
                let params: SerialLookupParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}
