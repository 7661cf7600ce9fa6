//! Helpers shared by every tool definition.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::error::{LookupError, ToolError};

/// Argument checks that the JSON schema alone cannot express to serde.
pub trait ValidateParams {
    fn validate(&self) -> Result<(), ToolError>;
}

/// Deserialize and validate tool arguments.
///
/// Failures become MCP `invalid_params` errors; the tool itself never runs.
pub fn parse_params<P>(arguments: Option<JsonObject>) -> Result<P, McpError>
where
    P: DeserializeOwned + ValidateParams,
{
    let args = arguments.unwrap_or_default();
    let params: P = serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    params
        .validate()
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    Ok(params)
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Collapse a lookup outcome into the text returned to the agent.
pub fn into_text(result: Result<String, LookupError>) -> String {
    result.unwrap_or_else(|e| {
        warn!("Lookup failed: {}", first_line(&e.to_string()));
        e.to_string()
    })
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Check that `value` is all ASCII digits with a length in `min..=max`.
pub fn validate_digits(field: &str, value: &str, min: usize, max: usize) -> Result<(), ToolError> {
    let digits_only = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    let length_ok = (min..=max).contains(&value.len());

    if digits_only && length_ok {
        return Ok(());
    }

    let expected = if min == max {
        format!("{} digits", min)
    } else {
        format!("{}-{} digits", min, max)
    };
    Err(ToolError::invalid_arguments(format!(
        "{} must be {}, got '{}'",
        field, expected, value
    )))
}

/// Length of an 8-digit serial number.
pub const SERIAL_DIGITS: usize = 8;

/// Validate an 8-digit serial number.
pub fn validate_serial(value: &str) -> Result<(), ToolError> {
    validate_digits("serial_number", value, SERIAL_DIGITS, SERIAL_DIGITS)
}
