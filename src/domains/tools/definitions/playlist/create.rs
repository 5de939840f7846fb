//! Create playlist tool definition.

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
use crate::plex::types::library_item_uri;

/// Playlist types the server accepts on creation.
const PLAYLIST_TYPES: &[&str] = &["audio", "video", "photo"];

fn default_playlist_type() -> String {
    "audio".to_string()
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the create playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePlaylistParams {
    /// Title for the new playlist.
    #[schemars(description = "Title for the new playlist")]
    pub title: String,

    /// Rating key of the first item. The server refuses to create an
    /// empty regular playlist, so one seed item is required.
    #[schemars(description = "Rating key of the first item to seed the playlist with")]
    pub item_key: String,

    /// Playlist type: audio, video, or photo.
    #[serde(default = "default_playlist_type")]
    #[schemars(description = "Playlist type: audio, video, or photo (default: audio)")]
    pub playlist_type: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create playlist tool - new playlist seeded with one item.
pub struct CreatePlaylistTool;

impl CreatePlaylistTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "create_playlist";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Create a new playlist seeded with one library item. The server does not allow creating an empty regular playlist, so an initial item key is required. Returns the id of the created playlist for use with the other playlist tools.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(title = %params.title))]
    pub async fn execute(params: &CreatePlaylistParams, plex: &PlexClient) -> CallToolResult {
        info!("Creating playlist: {}", params.title);

        if params.title.trim().is_empty() {
            return error_result("title must not be empty");
        }
        if params.item_key.trim().is_empty() {
            return error_result("item_key must not be empty");
        }
        if !PLAYLIST_TYPES.contains(&params.playlist_type.as_str()) {
            return error_result(&format!(
                "Unknown playlist type '{}'. Valid types: {}",
                params.playlist_type,
                PLAYLIST_TYPES.join(", ")
            ));
        }

        let identity = match plex.identity().await {
            Ok(identity) => identity,
            Err(e) => return error_result(&format!("Could not reach the server: {}", e)),
        };

        let seed_uri = library_item_uri(&identity.machine_identifier, &params.item_key);
        match plex
            .create_playlist(&params.title, &params.playlist_type, &seed_uri)
            .await
        {
            Ok(playlist) => success_result(format!(
                "Created {} playlist \"{}\" (id: {}) with 1 item.",
                params.playlist_type, playlist.title, playlist.rating_key
            )),
            Err(e) => error_result(&format!("Failed to create playlist: {}", e)),
        }
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: CreatePlaylistParams =
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
            input_schema: cached_schema_for_type::<CreatePlaylistParams>(),
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
                let params: CreatePlaylistParams =
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
    fn test_playlist_type_defaults_to_audio() {
        let params: CreatePlaylistParams = serde_json::from_value(serde_json::json!({
            "title": "Evening",
            "item_key": "101"
        }))
        .unwrap();
        assert_eq!(params.playlist_type, "audio");
    }

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let plex = offline_client();
        let params = CreatePlaylistParams {
            title: "  ".to_string(),
            item_key: "101".to_string(),
            playlist_type: "audio".to_string(),
        };

        let result = CreatePlaylistTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_unknown_playlist_type_rejected() {
        let plex = offline_client();
        let params = CreatePlaylistParams {
            title: "Evening".to_string(),
            item_key: "101".to_string(),
            playlist_type: "podcast".to_string(),
        };

        let result = CreatePlaylistTool::execute(&params, &plex).await;
        assert!(result.is_error.unwrap_or(false));

        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => {
                assert!(text.text.contains("audio, video, photo"));
            }
            _ => panic!("Expected text content"),
        }
    }
}
