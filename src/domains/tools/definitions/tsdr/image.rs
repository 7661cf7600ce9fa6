//! Mark drawing image lookup.
//!
//! Only checks that the image exists (HEAD request); the agent receives the
//! URL rather than the image bytes.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info};

use super::common::{API_KEY_HEADER, image_url, require_api_key, with_tsdr_headers};
use crate::core::deps::{HttpRequest, ToolDependencies};
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result, validate_serial,
};
use crate::domains::tools::error::{LookupError, ToolError};

/// Parameters for image lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ImageParams {
    #[schemars(description = "8-digit trademark serial number")]
    pub serial_number: String,
}

impl ValidateParams for ImageParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_serial(&self.serial_number)
    }
}

/// Mark image tool.
#[derive(Debug, Clone, Default)]
pub struct ImageTool;

impl ImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_trademark_image";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the URL of the mark drawing image for a trademark \
        by serial number. Reports when no image is on file (e.g. standard character marks).";

    /// Execute the lookup. Always returns text.
    pub async fn execute(params: &ImageParams, deps: &ToolDependencies) -> String {
        info!("Image lookup: {}", params.serial_number);
        into_text(Self::image_report(&params.serial_number, deps).await)
    }

    async fn image_report(serial: &str, deps: &ToolDependencies) -> Result<String, LookupError> {
        let api_key = require_api_key(deps)?;
        let url = image_url(serial);
        let request = with_tsdr_headers(HttpRequest::head(url.clone()), Some(&api_key));

        let response = deps.http.fetch(request).await.map_err(|e| {
            error!("Image check for {} failed: {}", serial, e);
            LookupError::from(e)
        })?;

        if !response.is_success() {
            info!("No image for {} (HTTP {})", serial, response.status);
            return Ok(format!(
                "No image found for serial number {serial}. The mark may be a standard \
                 character mark without a drawing, or the serial number may not exist."
            ));
        }

        Ok(format!(
            "Trademark image for serial number {serial}:\n{url}\n\n\
             Open the URL to view the mark drawing. Direct requests must include the \
             {API_KEY_HEADER} header."
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ImageParams>(),
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
                let params: ImageParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}
