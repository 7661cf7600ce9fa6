//! Quick status check from the TSDR HTML status page.

use std::sync::LazyLock;

use futures::FutureExt;
use regex::Regex;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{require_api_key, send_checked, status_page_url, with_tsdr_headers};
use crate::core::deps::{HttpRequest, ToolDependencies};
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result, validate_serial,
};
use crate::domains::tools::error::{LookupError, ToolError};

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid")
});

const NO_TITLE: &str = "No title found";

/// Parameters for status lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatusParams {
    #[schemars(description = "8-digit trademark serial number")]
    pub serial_number: String,
}

impl ValidateParams for StatusParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_serial(&self.serial_number)
    }
}

/// Status summary tool.
#[derive(Debug, Clone, Default)]
pub struct StatusTool;

impl StatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_trademark_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a quick status summary for a trademark by serial \
        number, taken from the USPTO TSDR status page. Use search_by_serial for full case data.";

    /// Execute the lookup. Always returns text.
    pub async fn execute(params: &StatusParams, deps: &ToolDependencies) -> String {
        info!("Status lookup: {}", params.serial_number);
        into_text(Self::status_report(&params.serial_number, deps).await)
    }

    async fn status_report(serial: &str, deps: &ToolDependencies) -> Result<String, LookupError> {
        let api_key = require_api_key(deps)?;
        let url = status_page_url(serial);
        let request = with_tsdr_headers(HttpRequest::get(url.clone()), Some(&api_key));
        let response = send_checked(deps, request, &api_key).await?;

        let title = extract_title(&response.body).unwrap_or_else(|| NO_TITLE.to_string());

        Ok(format!(
            "Trademark Status for Serial Number {serial}\n\n\
             Title: {title}\n\
             Source: {url}\n\n\
             For complete structured case data, use search_by_serial with this serial number."
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatusParams>(),
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
                let params: StatusParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}

/// First `<title>` element's text, trimmed.
fn extract_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
