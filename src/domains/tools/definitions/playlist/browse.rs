//! Browse playlist tool definition.

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

use crate::domains::tools::definitions::common::{error_result, item_list, success_result, validate_limit};
use crate::plex::client::PlexClient;

fn default_item_limit() -> u32 {
    50
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the browse playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BrowsePlaylistParams {
    /// The playlist to inspect (rating key from list_playlists).
    #[schemars(description = "Playlist id (rating key)")]
    pub playlist_id: String,

    /// Maximum number of items to show.
    #[serde(default = "default_item_limit")]
    #[schemars(description = "Maximum number of items to show (default: 50, max: 100)")]
    pub limit: u32,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Browse playlist tool - lists the items inside one playlist.
pub struct BrowsePlaylistTool;

impl BrowsePlaylistTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "browse_playlist";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "List the items inside a playlist in playback order, with the rating key of each item. Those keys are what add_to_playlist and remove_from_playlist take.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &BrowsePlaylistParams, plex: &PlexClient) -> CallToolResult {
        info!("Browsing playlist: {}", params.playlist_id);

        if params.playlist_id.trim().is_empty() {
            return error_result("playlist_id must not be empty");
        }
        let limit = validate_limit(params.limit) as usize;

        let container = match plex.playlist_items(&params.playlist_id).await {
            Ok(container) => container,
            Err(e) if e.http_status() == Some(404) => {
                return error_result(&format!("Playlist {} not found", params.playlist_id));
            }
            Err(e) => return error_result(&format!("Failed to browse playlist: {}", e)),
        };

        let title = container.title.as_deref().unwrap_or("Playlist");
        let total = container.metadata.len();
        if total == 0 {
            return success_result(format!("Playlist \"{}\" is empty.", title));
        }

        let mut output = format!("Playlist \"{}\" has {} item(s)", title, total);
        if total > limit {
            output.push_str(&format!(" (showing first {})", limit));
        }
        output.push_str(":\n\n");
        output.push_str(&item_list(&container.metadata[..total.min(limit)]));

        success_result(output)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: BrowsePlaylistParams =
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
            input_schema: cached_schema_for_type::<BrowsePlaylistParams>(),
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
                let params: BrowsePlaylistParams =
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
    use crate::plex::testing::offline_client;

    #[test]
    fn test_limit_defaults_to_fifty() {
        let params: BrowsePlaylistParams =
            serde_json::from_value(serde_json::json!({ "playlist_id": "7" })).unwrap();
        assert_eq!(params.limit, 50);
    }

    #[tokio::test]
    async fn test_empty_playlist_id_rejected() {
        let plex = offline_client();
        let params = BrowsePlaylistParams {
            playlist_id: String::new(),
            limit: 50,
        };

        let result = BrowsePlaylistTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
