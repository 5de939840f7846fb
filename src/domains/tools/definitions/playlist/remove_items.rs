//! Remove from playlist tool definition.
//!
//! Removal is submitted as one batched call and verified the same way as
//! additions. The server removes by membership, so the observed delta can
//! exceed the number of requested keys when the playlist holds duplicates.

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

/// Parameters for the remove from playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveFromPlaylistParams {
    /// The playlist to change (rating key from list_playlists).
    #[schemars(description = "Playlist id (rating key)")]
    pub playlist_id: String,

    /// Item rating keys to remove.
    #[schemars(description = "Rating keys of the items to remove")]
    pub item_keys: Vec<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Remove from playlist tool - verified membership removal.
pub struct RemoveFromPlaylistTool;

impl RemoveFromPlaylistTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "remove_from_playlist";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Remove items from a playlist and verify the result against the server. Removal is by membership: every entry of a requested item is removed, so a playlist holding duplicates can shrink by more than the number of keys given. Returns a classified outcome with before/after counts rather than a bare acknowledgement.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all, fields(playlist_id = %params.playlist_id, items = params.item_keys.len()))]
    pub async fn execute(
        params: &RemoveFromPlaylistParams,
        store: Arc<dyn PlaylistStore>,
        settings: &ReconcileSettings,
    ) -> CallToolResult {
        info!(
            "Removing {} item(s) from playlist {}",
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
        let request = MutationRequest::remove(params.playlist_id.clone(), params.item_keys.clone());

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
        let params: RemoveFromPlaylistParams =
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
            input_schema: cached_schema_for_type::<RemoveFromPlaylistParams>(),
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
                let params: RemoveFromPlaylistParams =
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::testing::{ScriptedStore, keys};

    fn fast_settings() -> ReconcileSettings {
        ReconcileSettings {
            write_pause_ms: 0,
            ..ReconcileSettings::default()
        }
    }

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_reports_full_success() {
        let store = Arc::new(ScriptedStore::with_items(&["1", "2", "3"]));
        let params = RemoveFromPlaylistParams {
            playlist_id: "7".to_string(),
            item_keys: keys(&["2"]),
        };

        let result = RemoveFromPlaylistTool::execute(&params, store.clone(), &fast_settings()).await;

        assert!(!result.is_error.unwrap_or(false));
        let text = result_text(&result);
        assert!(text.contains("FULL_SUCCESS"));
        assert_eq!(store.items_snapshot(), keys(&["1", "3"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_entries_flagged_as_overshoot() {
        let store = Arc::new(ScriptedStore::with_items(&["5", "5", "6"]));
        let params = RemoveFromPlaylistParams {
            playlist_id: "7".to_string(),
            item_keys: keys(&["5"]),
        };

        let result = RemoveFromPlaylistTool::execute(&params, store, &fast_settings()).await;

        assert!(!result.is_error.unwrap_or(false));
        let text = result_text(&result);
        assert!(text.contains("from 3 to 1"));
        assert!(text.contains("Removal is by membership"));
    }

    #[tokio::test]
    async fn test_empty_keys_rejected() {
        let store = Arc::new(ScriptedStore::with_items(&["1"]));
        let params = RemoveFromPlaylistParams {
            playlist_id: "7".to_string(),
            item_keys: Vec::new(),
        };

        let result = RemoveFromPlaylistTool::execute(&params, store, &fast_settings()).await;

        assert!(result.is_error.unwrap_or(false));
    }
}
