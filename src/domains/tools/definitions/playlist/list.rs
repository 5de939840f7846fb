//! List playlists tool definition.

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

use crate::domains::tools::definitions::common::{error_result, format_duration, success_result};
use crate::plex::client::PlexClient;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list playlists tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPlaylistsParams {
    /// Restrict the listing to one playlist type.
    #[serde(default)]
    #[schemars(description = "Only list playlists of this type: audio, video, or photo (default: all)")]
    pub playlist_type: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List playlists tool - all playlists on the server.
pub struct ListPlaylistsTool;

impl ListPlaylistsTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "list_playlists";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "List the playlists on the server with their ids, types, item counts, and durations. Playlist ids from this listing are what the other playlist tools take.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all)]
    pub async fn execute(params: &ListPlaylistsParams, plex: &PlexClient) -> CallToolResult {
        info!("Listing playlists (type: {:?})", params.playlist_type);

        if let Some(kind) = &params.playlist_type
            && !matches!(kind.as_str(), "audio" | "video" | "photo")
        {
            return error_result(&format!(
                "Unknown playlist type '{}'. Valid types: audio, video, photo",
                kind
            ));
        }

        let playlists = match plex.playlists(params.playlist_type.as_deref()).await {
            Ok(playlists) => playlists,
            Err(e) => return error_result(&format!("Failed to list playlists: {}", e)),
        };

        if playlists.is_empty() {
            return success_result("No playlists found.".to_string());
        }

        let mut output = format!("Found {} playlist(s):\n\n", playlists.len());
        output.push_str("| ID | Title | Type | Items | Duration | Smart |\n");
        output.push_str("|----|-------|------|-------|----------|-------|\n");
        for playlist in &playlists {
            let duration = playlist
                .duration
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string());
            let items = playlist
                .leaf_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "?".to_string());
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                playlist.rating_key,
                playlist.title,
                playlist.playlist_type.as_deref().unwrap_or("-"),
                items,
                duration,
                if playlist.smart.unwrap_or(false) { "yes" } else { "no" },
            ));
        }

        success_result(output)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: ListPlaylistsParams =
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
            input_schema: cached_schema_for_type::<ListPlaylistsParams>(),
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
                let params: ListPlaylistsParams =
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
    fn test_params_default_to_all_types() {
        let params: ListPlaylistsParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.playlist_type.is_none());
    }

    #[tokio::test]
    async fn test_unknown_type_rejected() {
        let plex = offline_client();
        let params = ListPlaylistsParams {
            playlist_type: Some("podcast".to_string()),
        };

        let result = ListPlaylistsTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }
}
