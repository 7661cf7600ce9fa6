//! Fuzzy wordmark search against the local trademark database.
//!
//! Uses PostgreSQL `pg_trgm`: the `%` operator selects candidates and
//! `similarity()` ranks them. Without a configured database the tool returns a
//! link to the USPTO's own search system instead.

use std::fmt;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info};

use crate::core::deps::{QueryParam, ToolDependencies, TrademarkRow};
use crate::domains::tools::definitions::common::{
    ValidateParams, into_text, parse_params, success_result,
};
use crate::domains::tools::error::{LookupError, ToolError};

/// USPTO trademark search page used as the manual fallback.
pub const MANUAL_SEARCH_URL: &str = "https://tmsearch.uspto.gov/search/search-results";

/// Maximum accepted length of the search text, in characters.
pub const MAX_TEXT_LENGTH: usize = 200;

/// Largest accepted result limit.
pub const MAX_LIMIT: u32 = 100;

const SEARCH_SELECT: &str = "SELECT serial_number, registration_number, mark_identification, \
     status_code, filing_date, registration_date, owner_name, attorney_name, \
     similarity(mark_identification, $1)::float8 AS similarity_score \
     FROM trademarks \
     WHERE mark_identification % $1";

/// Restricts results to live statuses (pending applications and registrations).
pub const ACTIVE_STATUS_CLAUSE: &str = " AND status_code IN ('630', '631', '632', '638', '640', \
     '641', '644', '645', '660', '661', '680', '681', '686', '688', '689', '700', '701', '702', \
     '703', '704', '800')";

const SEARCH_ORDER: &str = " ORDER BY similarity_score DESC LIMIT $2";

/// Which statuses to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Live applications and registrations only.
    Active,
    #[default]
    All,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::All => f.write_str("all"),
        }
    }
}

fn default_limit() -> u32 {
    20
}

/// Parameters for wordmark search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordmarkSearchParams {
    /// Mark text to search for.
    #[schemars(description = "Wordmark text to search for (e.g. 'NIKE')", length(min = 1, max = 200))]
    pub text: String,

    /// Status filter.
    #[serde(default)]
    #[schemars(description = "Filter by status: active (live marks only) or all (default)")]
    pub status: StatusFilter,

    /// Maximum number of results.
    #[serde(default = "default_limit")]
    #[schemars(
        description = "Maximum number of results (default: 20, max: 100)",
        range(min = 1, max = 100)
    )]
    pub limit: u32,
}

impl WordmarkSearchParams {
    fn search_text(&self) -> &str {
        self.text.trim()
    }
}

impl ValidateParams for WordmarkSearchParams {
    fn validate(&self) -> Result<(), ToolError> {
        let text = self.search_text();
        if text.is_empty() {
            return Err(ToolError::invalid_arguments("text must not be empty"));
        }
        if text.chars().count() > MAX_TEXT_LENGTH {
            return Err(ToolError::invalid_arguments(format!(
                "text must be at most {} characters",
                MAX_TEXT_LENGTH
            )));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ToolError::invalid_arguments(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }
        Ok(())
    }
}

/// Wordmark similarity search tool.
#[derive(Debug, Clone, Default)]
pub struct WordmarkSearchTool;

impl WordmarkSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_wordmark";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search trademarks by wordmark text using trigram \
        similarity, ranked by closeness. Optionally restrict to active (live) marks. Requires a \
        local trademark database; otherwise returns a link to the USPTO search system.";

    /// Execute the search. Always returns text.
    pub async fn execute(params: &WordmarkSearchParams, deps: &ToolDependencies) -> String {
        let text = params.search_text();
        info!(
            "Wordmark search: '{}' (status: {}, limit: {})",
            text, params.status, params.limit
        );

        let Some(store) = deps.connections.get_store(deps) else {
            return fallback_message(text);
        };

        let sql = build_search_query(params.status);
        let binds = [
            QueryParam::Text(text.to_string()),
            QueryParam::Int(i64::from(params.limit)),
        ];

        let result = store.query(&sql, &binds).await.map_err(|e| {
            error!("Wordmark query failed: {}", e);
            LookupError::database(e, manual_search_url(text))
        });

        into_text(result.map(|rows| format_results(text, params.status, &rows)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<WordmarkSearchParams>(),
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
                let params: WordmarkSearchParams = parse_params(args)?;
                Ok(success_result(Self::execute(&params, &deps).await))
            }
            .boxed()
        })
    }
}

/// SQL for a similarity search; user input only ever travels as `$1`/`$2`.
pub fn build_search_query(status: StatusFilter) -> String {
    let mut sql = String::from(SEARCH_SELECT);
    if status == StatusFilter::Active {
        sql.push_str(ACTIVE_STATUS_CLAUSE);
    }
    sql.push_str(SEARCH_ORDER);
    sql
}

/// USPTO search page URL pre-filled with `text`.
pub fn manual_search_url(text: &str) -> String {
    let query = serde_urlencoded::to_string([("query", text)]).unwrap_or_default();
    format!("{}?{}", MANUAL_SEARCH_URL, query)
}

fn fallback_message(text: &str) -> String {
    format!(
        "Wordmark search requires a local trademark database, which is not configured \
         or is currently unavailable.\n\n\
         Search for \"{text}\" manually on the USPTO trademark search system:\n{}\n\n\
         To enable database search, set DATABASE_URL to a PostgreSQL database loaded with \
         USPTO trademark data (the pg_trgm extension is required).",
        manual_search_url(text)
    )
}

/// Similarity score as a percentage with one decimal place.
pub fn format_similarity(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn format_results(text: &str, status: StatusFilter, rows: &[TrademarkRow]) -> String {
    if rows.is_empty() {
        return format!(
            "No trademarks found similar to \"{}\" (status filter: {}).",
            text, status
        );
    }

    let mut out = format!(
        "Found {} trademark(s) similar to \"{}\" (status filter: {}):\n",
        rows.len(),
        text,
        status
    );

    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {}\n   Serial: {} | Registration: {}\n   Status: {} | Filed: {} | Registered: {}\n",
            i + 1,
            row.mark_text.as_deref().unwrap_or("(no mark text)"),
            row.serial_number,
            row.registration_number.as_deref().unwrap_or("N/A"),
            row.status_code.as_deref().unwrap_or("N/A"),
            or_na(row.filing_date),
            or_na(row.registration_date),
        ));
        if let Some(owner) = &row.owner_name {
            out.push_str(&format!("   Owner: {}\n", owner));
        }
        out.push_str(&format!(
            "   Similarity: {}\n",
            format_similarity(row.similarity)
        ));
    }

    out
}

fn or_na(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
