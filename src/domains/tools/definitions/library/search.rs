//! Library search tool definition.
//!
//! Searches the Plex library for media items and reports their rating
//! keys, which the playlist tools take as input.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{
    KNOWN_ITEM_TYPES, default_limit, error_result, item_list, plex_type_code, success_result,
    validate_limit,
};
use crate::plex::client::PlexClient;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the library search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchLibraryParams {
    /// Text to search for.
    #[schemars(description = "Search text (title, artist, show name, ...)")]
    pub query: String,

    /// Restrict the search to one library section.
    #[schemars(description = "Optional library section id to search within")]
    #[serde(default)]
    pub section_id: Option<String>,

    /// Restrict the result to one media kind.
    #[schemars(description = "Optional media kind: movie, show, season, episode, artist, album, or track")]
    #[serde(default)]
    pub item_type: Option<String>,

    /// Result cap, defaulting to 10 and clamped to 100.
    #[schemars(description = "Maximum number of results (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Library search tool - finds media items and their rating keys.
pub struct SearchLibraryTool;

impl SearchLibraryTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "search_library";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Search the Plex library for media items by text. Returns matching items with their rating keys, which are the item identifiers used by the playlist tools.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &SearchLibraryParams, plex: &PlexClient) -> CallToolResult {
        info!("Library search for: {}", params.query);

        if params.query.trim().is_empty() {
            return error_result("Search query must not be empty");
        }

        let type_code = match &params.item_type {
            Some(kind) => match plex_type_code(kind) {
                Some(code) => Some(code),
                None => {
                    return error_result(&format!(
                        "Unknown item type '{}'. Known types: {}",
                        kind, KNOWN_ITEM_TYPES
                    ));
                }
            },
            None => None,
        };

        let limit = validate_limit(params.limit);
        let items = match plex
            .search(&params.query, params.section_id.as_deref(), type_code, limit)
            .await
        {
            Ok(items) => items,
            Err(err) => return error_result(&format!("Search failed: {}", err)),
        };

        if items.is_empty() {
            return success_result(format!("No items found for '{}'", params.query));
        }

        let shown: Vec<_> = items.into_iter().take(limit as usize).collect();
        let response = format!(
            "Found {} item(s) for '{}':\n\n{}",
            shown.len(),
            params.query,
            item_list(&shown)
        );
        success_result(response)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: SearchLibraryParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &plex).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Tool metadata for tools/list.
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchLibraryParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Route handed to the rmcp router for STDIO/TCP.
    pub fn create_route<S>(plex: Arc<PlexClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let plex = plex.clone();
            async move {
                let params: SearchLibraryParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &plex).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let params: SearchLibraryParams =
            serde_json::from_value(serde_json::json!({ "query": "pink floyd" })).unwrap();
        assert_eq!(params.limit, 10);
        assert!(params.section_id.is_none());
        assert!(params.item_type.is_none());
    }

    #[test]
    fn test_params_reject_missing_query() {
        let result =
            serde_json::from_value::<SearchLibraryParams>(serde_json::json!({ "limit": 5 }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_is_an_error() {
        let params = SearchLibraryParams {
            query: "   ".to_string(),
            section_id: None,
            item_type: None,
            limit: 10,
        };
        let plex = crate::plex::testing::offline_client();
        let result = SearchLibraryTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_unknown_item_type_is_an_error() {
        let params = SearchLibraryParams {
            query: "heat".to_string(),
            section_id: None,
            item_type: Some("podcast".to_string()),
            limit: 10,
        };
        let plex = crate::plex::testing::offline_client();
        let result = SearchLibraryTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
