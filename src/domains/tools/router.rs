//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool creates its own route; this module only binds them to the shared
//! dependency bundle.

use rmcp::handler::server::tool::ToolRouter;

use crate::core::deps::ToolDependencies;

use super::definitions::{
    DocumentsTool, ImageTool, RegistrationLookupTool, SerialLookupTool, StatusTool,
    WordmarkSearchTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(deps: ToolDependencies) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(WordmarkSearchTool::create_route(deps.clone()))
        .with_route(SerialLookupTool::create_route(deps.clone()))
        .with_route(RegistrationLookupTool::create_route(deps.clone()))
        .with_route(StatusTool::create_route(deps.clone()))
        .with_route(ImageTool::create_route(deps.clone()))
        .with_route(DocumentsTool::create_route(deps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deps::testing::{FakeFetcher, api_deps};

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> =
            build_tool_router(api_deps(None, FakeFetcher::ok("")));
        let tools = router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"search_wordmark"));
        assert!(names.contains(&"search_by_serial"));
        assert!(names.contains(&"search_by_registration"));
        assert!(names.contains(&"get_trademark_status"));
        assert!(names.contains(&"get_trademark_image"));
        assert!(names.contains(&"get_trademark_documents"));
    }

    #[test]
    fn test_schemas_declare_required_identifiers() {
        let router: ToolRouter<TestServer> =
            build_tool_router(api_deps(None, FakeFetcher::ok("")));

        for tool in router.list_all() {
            let schema = serde_json::Value::Object((*tool.input_schema).clone());
            let required = schema["required"].as_array().cloned().unwrap_or_default();
            let expected = match tool.name.as_ref() {
                "search_wordmark" => "text",
                "search_by_registration" => "registration_number",
                _ => "serial_number",
            };
            assert!(
                required.iter().any(|v| v == expected),
                "{} should require {}",
                tool.name,
                expected
            );
        }
    }
}
