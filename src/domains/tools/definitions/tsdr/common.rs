//! Shared TSDR (Trademark Status & Document Retrieval) API plumbing.
//!
//! URL templates, the credential gate, request headers and response checks
//! used by all identifier-based tools.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, warn};

use crate::core::deps::{HttpRequest, HttpResponse, ToolDependencies};
use crate::domains::tools::error::LookupError;

/// TSDR API base URL.
pub const TSDR_BASE_URL: &str = "https://tsdrapi.uspto.gov/ts/cd";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "USPTO-API-KEY";

/// Client identifier sent with every request.
pub const USER_AGENT: &str = concat!("trademark-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Lowercased body fragment the API returns when it rejects a key.
const API_KEY_REJECTION_MARKER: &str = "invalid api key";

/// Payload format for case status lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Json => "info.json",
            Self::Xml => "info.xml",
        }
    }
}

/// Case status URL for a serial number.
pub fn serial_status_url(serial_number: &str, format: ResponseFormat) -> String {
    format!(
        "{}/casestatus/sn{}/{}",
        TSDR_BASE_URL,
        serial_number,
        format.file_name()
    )
}

/// Case status URL for a registration number.
pub fn registration_status_url(registration_number: &str, format: ResponseFormat) -> String {
    format!(
        "{}/casestatus/rn{}/{}",
        TSDR_BASE_URL,
        registration_number,
        format.file_name()
    )
}

/// HTML status page for a serial number.
pub fn status_page_url(serial_number: &str) -> String {
    format!("{}/casestatus/sn{}/content.html", TSDR_BASE_URL, serial_number)
}

/// Mark drawing image for a serial number.
pub fn image_url(serial_number: &str) -> String {
    format!("{}/rawImage/{}", TSDR_BASE_URL, serial_number)
}

/// PDF bundle of all case documents for a serial number.
pub fn documents_url(serial_number: &str) -> String {
    format!("{}/casedocs/bundle.pdf?sn={}", TSDR_BASE_URL, serial_number)
}

/// Credential gate: the configured key, or the configuration error.
pub fn require_api_key(deps: &ToolDependencies) -> Result<String, LookupError> {
    deps.api_key().ok_or_else(|| {
        warn!("USPTO_API_KEY not configured");
        LookupError::ApiKeyMissing
    })
}

/// Attach the client identifier and, when present, the API key.
pub fn with_tsdr_headers(request: HttpRequest, api_key: Option<&str>) -> HttpRequest {
    let request = request.header("User-Agent", USER_AGENT);
    match api_key {
        Some(key) => request.header(API_KEY_HEADER, key),
        None => request,
    }
}

/// Send a request and map non-success responses to [`LookupError`].
pub async fn send_checked(
    deps: &ToolDependencies,
    request: HttpRequest,
    api_key: &str,
) -> Result<HttpResponse, LookupError> {
    let url = request.url.clone();
    let response = deps.http.fetch(request).await.map_err(|e| {
        error!("Request to {} failed: {}", url, e);
        LookupError::from(e)
    })?;

    if response.is_success() {
        return Ok(response);
    }

    warn!("USPTO API returned {} for {}", response.status, url);
    Err(rejection_error(response, api_key))
}

fn rejection_error(response: HttpResponse, api_key: &str) -> LookupError {
    if response
        .body
        .to_lowercase()
        .contains(API_KEY_REJECTION_MARKER)
    {
        return LookupError::api_key_rejected(api_key);
    }

    LookupError::HttpStatus {
        status: response.status,
        status_text: response.status_text,
        body: response.body,
    }
}

/// Fetch a case status document and format it for the agent.
///
/// JSON is re-serialized with stable indentation; XML is returned verbatim.
pub async fn fetch_case_status(
    deps: &ToolDependencies,
    url: String,
    format: ResponseFormat,
) -> Result<String, LookupError> {
    let api_key = require_api_key(deps)?;
    let request = with_tsdr_headers(HttpRequest::get(url), Some(&api_key));
    let response = send_checked(deps, request, &api_key).await?;

    match format {
        ResponseFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(&response.body)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        ResponseFormat::Xml => Ok(response.body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deps::testing::{FakeFetcher, api_deps};

    #[test]
    fn test_case_status_urls() {
        assert_eq!(
            serial_status_url("78462704", ResponseFormat::Json),
            "https://tsdrapi.uspto.gov/ts/cd/casestatus/sn78462704/info.json"
        );
        assert_eq!(
            serial_status_url("78462704", ResponseFormat::Xml),
            "https://tsdrapi.uspto.gov/ts/cd/casestatus/sn78462704/info.xml"
        );
        assert_eq!(
            registration_status_url("3068631", ResponseFormat::Json),
            "https://tsdrapi.uspto.gov/ts/cd/casestatus/rn3068631/info.json"
        );
    }

    #[test]
    fn test_other_urls() {
        assert_eq!(
            status_page_url("78462704"),
            "https://tsdrapi.uspto.gov/ts/cd/casestatus/sn78462704/content.html"
        );
        assert_eq!(
            image_url("78462704"),
            "https://tsdrapi.uspto.gov/ts/cd/rawImage/78462704"
        );
        assert_eq!(
            documents_url("78462704"),
            "https://tsdrapi.uspto.gov/ts/cd/casedocs/bundle.pdf?sn=78462704"
        );
    }

    #[test]
    fn test_headers_include_client_id_and_key() {
        let request = with_tsdr_headers(HttpRequest::get("https://x"), Some("key-1"));
        assert_eq!(request.header_value("User-Agent"), Some(USER_AGENT));
        assert_eq!(request.header_value(API_KEY_HEADER), Some("key-1"));

        let anonymous = with_tsdr_headers(HttpRequest::get("https://x"), None);
        assert_eq!(anonymous.header_value("User-Agent"), Some(USER_AGENT));
        assert_eq!(anonymous.header_value(API_KEY_HEADER), None);
    }

    #[test]
    fn test_format_defaults_to_json() {
        let format: ResponseFormat = serde_json::from_str("\"xml\"").unwrap();
        assert_eq!(format, ResponseFormat::Xml);
        assert_eq!(ResponseFormat::default(), ResponseFormat::Json);
        assert!(serde_json::from_str::<ResponseFormat>("\"yaml\"").is_err());
    }

    #[tokio::test]
    async fn test_json_is_pretty_printed() {
        let fetcher = FakeFetcher::ok(r#"{"trademarks":[{"status":{"serialNumber":78462704}}]}"#);
        let deps = api_deps(Some("key-1"), fetcher);

        let text = fetch_case_status(
            &deps,
            serial_status_url("78462704", ResponseFormat::Json),
            ResponseFormat::Json,
        )
        .await
        .unwrap();

        let expected = serde_json::to_string_pretty(&serde_json::json!({
            "trademarks": [{ "status": { "serialNumber": 78462704 } }]
        }))
        .unwrap();
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn test_json_keeps_upstream_key_order() {
        let fetcher = FakeFetcher::ok(r#"{"zeta":1,"alpha":{"mark":"NIKE","date":"2004-07-22"}}"#);
        let deps = api_deps(Some("key-1"), fetcher);

        let text = fetch_case_status(&deps, "https://x".into(), ResponseFormat::Json)
            .await
            .unwrap();

        let pos = |key: &str| text.find(key).unwrap();
        assert!(pos("\"zeta\"") < pos("\"alpha\""));
        assert!(pos("\"mark\"") < pos("\"date\""));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let deps = api_deps(Some("key-1"), FakeFetcher::ok("<html>oops</html>"));
        let err = fetch_case_status(&deps, "https://x".into(), ResponseFormat::Json)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[tokio::test]
    async fn test_rejection_marker_is_case_insensitive() {
        let fetcher = FakeFetcher::status(401, "Unauthorized", r#"{"message":"Invalid API Key"}"#);
        let deps = api_deps(Some("abcdefghijkl"), fetcher);
        let err = fetch_case_status(&deps, "https://x".into(), ResponseFormat::Json)
            .await
            .unwrap_err();
        match err {
            LookupError::ApiKeyRejected { masked_key } => assert_eq!(masked_key, "abcdefgh..."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_failures_report_status() {
        let fetcher = FakeFetcher::status(500, "Internal Server Error", "upstream down");
        let deps = api_deps(Some("key-1"), fetcher);
        let err = fetch_case_status(&deps, "https://x".into(), ResponseFormat::Xml)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::HttpStatus { status: 500, .. }));
    }
}
