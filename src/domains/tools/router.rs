//! Assembles the rmcp ToolRouter used on STDIO and TCP.
//!
//! Delegates to the definitions: each tool builds its own route, so this
//! file is just the wiring list. The two mutation tools additionally take
//! the reconciliation settings.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::plex::client::PlexClient;

use super::definitions::{
    AddToPlaylistTool, BrowseLibrariesTool, BrowseLibraryTool, BrowsePlaylistTool,
    CreatePlaylistTool, DeletePlaylistTool, LibraryStatsTool, ListPlaylistsTool, OnDeckTool,
    RecentlyAddedTool, RemoveFromPlaylistTool, SearchLibraryTool,
};

/// Wire every tool into one router.
pub fn build_tool_router<S>(config: Arc<Config>, plex: Arc<PlexClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchLibraryTool::create_route(plex.clone()))
        .with_route(BrowseLibrariesTool::create_route(plex.clone()))
        .with_route(BrowseLibraryTool::create_route(plex.clone()))
        .with_route(RecentlyAddedTool::create_route(plex.clone()))
        .with_route(OnDeckTool::create_route(plex.clone()))
        .with_route(LibraryStatsTool::create_route(plex.clone()))
        .with_route(ListPlaylistsTool::create_route(plex.clone()))
        .with_route(BrowsePlaylistTool::create_route(plex.clone()))
        .with_route(CreatePlaylistTool::create_route(plex.clone()))
        .with_route(DeletePlaylistTool::create_route(plex.clone()))
        .with_route(AddToPlaylistTool::create_route(
            plex.clone(),
            config.reconcile.clone(),
        ))
        .with_route(RemoveFromPlaylistTool::create_route(
            plex,
            config.reconcile.clone(),
        ))
}
