//! Delete playlist tool definition.

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

use crate::domains::tools::definitions::common::{error_result, success_result};
use crate::plex::client::PlexClient;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the delete playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeletePlaylistParams {
    /// The playlist to delete (rating key from list_playlists).
    #[schemars(description = "Playlist id (rating key) to delete")]
    pub playlist_id: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Delete playlist tool - removes the playlist itself, not its items.
pub struct DeletePlaylistTool;

impl DeletePlaylistTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "delete_playlist";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Delete a playlist by id. The library items it referenced are untouched, only the playlist itself is removed. This cannot be undone.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &DeletePlaylistParams, plex: &PlexClient) -> CallToolResult {
        info!("Deleting playlist: {}", params.playlist_id);

        if params.playlist_id.trim().is_empty() {
            return error_result("playlist_id must not be empty");
        }

        match plex.delete_playlist(&params.playlist_id).await {
            Ok(_) => success_result(format!("Deleted playlist {}.", params.playlist_id)),
            Err(e) if e.http_status() == Some(404) => {
                error_result(&format!("Playlist {} not found", params.playlist_id))
            }
            Err(e) => error_result(&format!("Failed to delete playlist: {}", e)),
        }
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: DeletePlaylistParams =
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
            input_schema: cached_schema_for_type::<DeletePlaylistParams>(),
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
                let params: DeletePlaylistParams =
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

    #[tokio::test]
    async fn test_empty_playlist_id_rejected() {
        let plex = offline_client();
        let params = DeletePlaylistParams {
            playlist_id: String::new(),
        };

        let result = DeletePlaylistTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_params_deserialize() {
        let params: DeletePlaylistParams =
            serde_json::from_value(serde_json::json!({ "playlist_id": "42" })).unwrap();
        assert_eq!(params.playlist_id, "42");
    }
}
