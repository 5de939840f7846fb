//! Central tool registration and HTTP dispatch.
//!
//! Keeps the canonical list of tools for metadata serving, and routes
//! tool calls by name when the http feature is enabled. STDIO and TCP
//! go through the rmcp router in `router.rs` instead.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;
use crate::plex::client::PlexClient;

use super::definitions::{
    AddToPlaylistTool, BrowseLibrariesTool, BrowseLibraryTool, BrowsePlaylistTool,
    CreatePlaylistTool, DeletePlaylistTool, LibraryStatsTool, ListPlaylistsTool, OnDeckTool,
    RecentlyAddedTool, RemoveFromPlaylistTool, SearchLibraryTool,
};
#[cfg(feature = "http")]
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Canonical tool list, and the dispatch table for HTTP calls.
pub struct ToolRegistry {
    config: Arc<Config>,
    plex: Arc<PlexClient>,
}

impl ToolRegistry {
    pub fn new(config: Arc<Config>, plex: Arc<PlexClient>) -> Self {
        Self { config, plex }
    }

    /// Names of every registered tool, in listing order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchLibraryTool::NAME,
            BrowseLibrariesTool::NAME,
            BrowseLibraryTool::NAME,
            RecentlyAddedTool::NAME,
            OnDeckTool::NAME,
            LibraryStatsTool::NAME,
            ListPlaylistsTool::NAME,
            BrowsePlaylistTool::NAME,
            CreatePlaylistTool::NAME,
            DeletePlaylistTool::NAME,
            AddToPlaylistTool::NAME,
            RemoveFromPlaylistTool::NAME,
        ]
    }

    /// Metadata for every registered tool.
    ///
    /// Every transport's tools/list answer comes from here, so a tool
    /// missing from this list is invisible to clients.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchLibraryTool::to_tool(),
            BrowseLibrariesTool::to_tool(),
            BrowseLibraryTool::to_tool(),
            RecentlyAddedTool::to_tool(),
            OnDeckTool::to_tool(),
            LibraryStatsTool::to_tool(),
            ListPlaylistsTool::to_tool(),
            BrowsePlaylistTool::to_tool(),
            CreatePlaylistTool::to_tool(),
            DeletePlaylistTool::to_tool(),
            AddToPlaylistTool::to_tool(),
            RemoveFromPlaylistTool::to_tool(),
        ]
    }

    /// Route an HTTP tool call to its handler by name.
    ///
    /// Handlers only fail on malformed arguments; execution problems come
    /// back in the payload.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let result = match name {
            SearchLibraryTool::NAME => {
                SearchLibraryTool::http_handler(arguments, self.plex.clone()).await
            }
            BrowseLibrariesTool::NAME => {
                BrowseLibrariesTool::http_handler(arguments, self.plex.clone()).await
            }
            BrowseLibraryTool::NAME => {
                BrowseLibraryTool::http_handler(arguments, self.plex.clone()).await
            }
            RecentlyAddedTool::NAME => {
                RecentlyAddedTool::http_handler(arguments, self.plex.clone()).await
            }
            OnDeckTool::NAME => OnDeckTool::http_handler(arguments, self.plex.clone()).await,
            LibraryStatsTool::NAME => {
                LibraryStatsTool::http_handler(arguments, self.plex.clone()).await
            }
            ListPlaylistsTool::NAME => {
                ListPlaylistsTool::http_handler(arguments, self.plex.clone()).await
            }
            BrowsePlaylistTool::NAME => {
                BrowsePlaylistTool::http_handler(arguments, self.plex.clone()).await
            }
            CreatePlaylistTool::NAME => {
                CreatePlaylistTool::http_handler(arguments, self.plex.clone()).await
            }
            DeletePlaylistTool::NAME => {
                DeletePlaylistTool::http_handler(arguments, self.plex.clone()).await
            }
            AddToPlaylistTool::NAME => {
                AddToPlaylistTool::http_handler(
                    arguments,
                    self.plex.clone(),
                    self.config.reconcile.clone(),
                )
                .await
            }
            RemoveFromPlaylistTool::NAME => {
                RemoveFromPlaylistTool::http_handler(
                    arguments,
                    self.plex.clone(),
                    self.config.reconcile.clone(),
                )
                .await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        result.map_err(ToolError::invalid_arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plex::testing::offline_client;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(Config::default()), Arc::new(offline_client()))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"search_library"));
        assert!(names.contains(&"browse_libraries"));
        assert!(names.contains(&"browse_library"));
        assert!(names.contains(&"get_recently_added"));
        assert!(names.contains(&"get_on_deck"));
        assert!(names.contains(&"get_library_stats"));
        assert!(names.contains(&"list_playlists"));
        assert!(names.contains(&"browse_playlist"));
        assert!(names.contains(&"create_playlist"));
        assert!(names.contains(&"delete_playlist"));
        assert!(names.contains(&"add_to_playlist"));
        assert!(names.contains(&"remove_from_playlist"));
    }

    #[test]
    fn test_tool_metadata_matches_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), names.len());
        for tool in &tools {
            assert!(names.contains(&tool.name.as_ref()));
            assert!(tool.description.is_some());
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = test_registry();
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_rejects_bad_arguments() {
        let registry = test_registry();
        let result = registry
            .call_tool("search_library", serde_json::json!({ "limit": 5 }))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
