//! Document bundle link.
//!
//! Builds the URL only; no request is made. The credential gate still
//! applies because downloading the bundle requires the key.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{API_KEY_HEADER, documents_url, require_api_key};
use crate::core::deps::ToolDependencies;
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result, validate_serial,
};
use crate::domains::tools::error::{LookupError, ToolError};

/// TSDR download limit for document bundles.
pub const DOCUMENT_RATE_LIMIT_PER_MINUTE: u32 = 4;

/// Parameters for document lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentsParams {
    #[schemars(description = "8-digit trademark serial number")]
    pub serial_number: String,
}

impl ValidateParams for DocumentsParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_serial(&self.serial_number)
    }
}

/// Document bundle tool.
#[derive(Debug, Clone, Default)]
pub struct DocumentsTool;

impl DocumentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_trademark_documents";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the download URL for the PDF bundle of all \
        prosecution documents (office actions, responses, certificates) for a trademark by \
        serial number.";

    /// Execute the lookup. Always returns text.
    pub async fn execute(params: &DocumentsParams, deps: &ToolDependencies) -> String {
        info!("Documents lookup: {}", params.serial_number);
        into_text(Self::documents_report(&params.serial_number, deps))
    }

    fn documents_report(serial: &str, deps: &ToolDependencies) -> Result<String, LookupError> {
        require_api_key(deps)?;
        let url = documents_url(serial);

        Ok(format!(
            "Document bundle for serial number {serial}:\n{url}\n\n\
             Note: the USPTO limits document downloads to {DOCUMENT_RATE_LIMIT_PER_MINUTE} \
             requests per minute per API key. Include the {API_KEY_HEADER} header when \
             downloading."
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DocumentsParams>(),
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
                let params: DocumentsParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deps::testing::{FakeFetcher, api_deps};

    fn params(serial: &str) -> DocumentsParams {
        DocumentsParams {
            serial_number: serial.to_string(),
        }
    }

    #[tokio::test]
    async fn test_returns_bundle_url_without_request() {
        let fetcher = FakeFetcher::ok("");
        let deps = api_deps(Some("key-1"), fetcher.clone());

        let text = DocumentsTool::execute(&params("78462704"), &deps).await;

        assert!(text.contains("https://tsdrapi.uspto.gov/ts/cd/casedocs/bundle.pdf?sn=78462704"));
        assert!(text.contains("4 requests per minute"));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_requires_api_key() {
        let deps = api_deps(None, FakeFetcher::ok(""));

        let text = DocumentsTool::execute(&params("78462704"), &deps).await;

        assert_eq!(text, LookupError::ApiKeyMissing.to_string());
    }
}
