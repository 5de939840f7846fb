//! Add to playlist tool definition.
//!
//! The server acknowledges playlist writes before they are observable, so
//! this tool runs the full mutation engine: baseline capture, paced
//! writes, count verification, and outcome classification.

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

use super::report::into_tool_result;
use crate::core::config::ReconcileSettings;
use crate::domains::tools::definitions::common::error_result;
use crate::plex::client::PlexClient;
use crate::playlist::engine::MutationEngine;
use crate::playlist::request::MutationRequest;
use crate::playlist::store::PlaylistStore;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add to playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddToPlaylistParams {
    /// The playlist to change (rating key from list_playlists).
    #[schemars(description = "Playlist id (rating key)")]
    pub playlist_id: String,

    /// Item rating keys to add, in order.
    #[schemars(description = "Rating keys of the items to add, in the order they should be attempted")]
    pub item_keys: Vec<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add to playlist tool - verified membership addition.
pub struct AddToPlaylistTool;

impl AddToPlaylistTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "add_to_playlist";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Add items to a playlist and verify the result against the server. Returns a classified outcome (FULL_SUCCESS, PARTIAL_SUCCESS, NOOP_SUCCESS, or HARD_FAILURE) with before/after counts and per-item call evidence, never a bare acknowledgement. Items already in the playlist are not duplicated.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(playlist_id = %params.playlist_id, items = params.item_keys.len()))]
    pub async fn execute(
        params: &AddToPlaylistParams,
        store: Arc<dyn PlaylistStore>,
        settings: &ReconcileSettings,
    ) -> CallToolResult {
        info!(
            "Adding {} item(s) to playlist {}",
            params.item_keys.len(),
            params.playlist_id
        );

        if params.item_keys.is_empty() {
            return error_result("item_keys must not be empty");
        }
        if params.item_keys.iter().any(|key| key.trim().is_empty()) {
            return error_result("item_keys must not contain empty keys");
        }

        let engine = MutationEngine::new(store)
            .with_reconcile(settings.verifier_config())
            .with_write_pause(settings.write_pause());
        let request = MutationRequest::add(params.playlist_id.clone(), params.item_keys.clone());

        match engine.mutate(&request).await {
            Ok(result) => into_tool_result(result),
            Err(err) => error_result(&format!("Aborted before any write: {}", err)),
        }
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
        settings: ReconcileSettings,
    ) -> Result<serde_json::Value, String> {
        let params: AddToPlaylistParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let store: Arc<dyn PlaylistStore> = plex;
        let result = Self::execute(&params, store, &settings).await;

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
            input_schema: cached_schema_for_type::<AddToPlaylistParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Route handed to the rmcp router for STDIO/TCP.
    pub fn create_route<S>(plex: Arc<PlexClient>, settings: ReconcileSettings) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let plex = plex.clone();
            let settings = settings.clone();
            async move {
                let params: AddToPlaylistParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let store: Arc<dyn PlaylistStore> = plex;
                Ok(Self::execute(&params, store, &settings).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
