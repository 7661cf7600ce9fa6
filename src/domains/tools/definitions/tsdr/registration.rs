//! Case lookup by registration number.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{ResponseFormat, fetch_case_status, registration_status_url};
use crate::core::deps::ToolDependencies;
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result, validate_digits,
};
use crate::domains::tools::error::ToolError;

/// Parameters for registration number lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RegistrationLookupParams {
    /// 7 or 8 digit registration number.
    #[schemars(description = "7-8 digit trademark registration number (e.g. 3068631)")]
    pub registration_number: String,

    /// Response format.
    #[serde(default)]
    #[schemars(description = "Response format: json (default) or xml")]
    pub format: ResponseFormat,
}

impl ValidateParams for RegistrationLookupParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_digits("registration_number", &self.registration_number, 7, 8)
    }
}

/// Registration number lookup tool.
#[derive(Debug, Clone, Default)]
pub struct RegistrationLookupTool;

impl RegistrationLookupTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_by_registration";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up a registered trademark by its 7-8 digit \
        registration number. Returns the complete USPTO TSDR case record as JSON or XML.";

    /// Execute the lookup. Always returns text.
    pub async fn execute(params: &RegistrationLookupParams, deps: &ToolDependencies) -> String {
        info!(
            "Registration lookup: {} ({:?})",
            params.registration_number, params.format
        );
        let url = registration_status_url(&params.registration_number, params.format);
        into_text(fetch_case_status(deps, url, params.format).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RegistrationLookupParams>(),
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
                let params: RegistrationLookupParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}
