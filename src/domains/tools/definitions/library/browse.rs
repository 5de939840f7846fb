//! Library section browsing tool definition.

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
    KNOWN_ITEM_TYPES, error_result, item_list, plex_type_code, success_result, validate_limit,
};
use crate::plex::client::PlexClient;

fn default_browse_limit() -> u32 {
    20
}

/// Parameters for the section browsing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BrowseLibraryParams {
    /// The library section to browse (from browse_libraries).
    #[schemars(description = "Library section id")]
    pub section_id: String,

    /// Restrict rows to one media kind.
    #[schemars(description = "Optional media kind: movie, show, season, episode, artist, album, or track")]
    #[serde(default)]
    pub item_type: Option<String>,

    /// Sort expression passed through to the server.
    #[schemars(description = "Optional sort, e.g. 'titleSort', 'addedAt:desc', 'year'")]
    #[serde(default)]
    pub sort: Option<String>,

    /// Maximum number of rows to return (default: 20, max: 100).
    #[schemars(description = "Maximum number of rows (default: 20, max: 100)")]
    #[serde(default = "default_browse_limit")]
    pub limit: u32,
}

/// Section browsing tool - pages through one library's contents.
pub struct BrowseLibraryTool;

impl BrowseLibraryTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "browse_library";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Browse the contents of one library section, optionally filtered by media kind and sorted. Returns items with their rating keys.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(section_id = %params.section_id))]
    pub async fn execute(params: &BrowseLibraryParams, plex: &PlexClient) -> CallToolResult {
        info!("Browsing library section {}", params.section_id);

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
        let container = match plex
            .section_items(&params.section_id, type_code, params.sort.as_deref(), limit)
            .await
        {
            Ok(container) => container,
            Err(err) => {
                return error_result(&format!(
                    "Failed to browse section {}: {}",
                    params.section_id, err
                ));
            }
        };

        if container.metadata.is_empty() {
            return success_result(format!("Section {} has no matching items.", params.section_id));
        }

        let total = container
            .total_size
            .or(container.size)
            .unwrap_or(container.metadata.len() as u32);
        let response = format!(
            "Showing {} of {} item(s) in section {}:\n\n{}",
            container.metadata.len(),
            total,
            params.section_id,
            item_list(&container.metadata)
        );
        success_result(response)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: BrowseLibraryParams =
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
            input_schema: cached_schema_for_type::<BrowseLibraryParams>(),
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
                let params: BrowseLibraryParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &plex).await)
            }
            .boxed()
        })
    }
}
