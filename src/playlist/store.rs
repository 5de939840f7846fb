//! Storage seam between the mutation engine and the Plex API.
//!
//! The engine only needs five calls, so they live behind a trait: the
//! production implementation is [`PlexClient`], and tests drive the engine
//! with scripted fakes instead of a live server.

use async_trait::async_trait;

use crate::plex::client::PlexClient;
use crate::plex::error::PlexResult;
use crate::plex::types::{Item, MediaContainer, Playlist};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Stable server identifier used to build item URIs.
    async fn machine_identifier(&self) -> PlexResult<String>;

    /// Playlist metadata, including the `leafCount` fallback count.
    async fn playlist_metadata(&self, playlist_id: &str) -> PlexResult<Playlist>;

    /// The playlist's members. The preferred count source.
    async fn playlist_items(&self, playlist_id: &str) -> PlexResult<MediaContainer<Item>>;

    /// Appends a single item by URI. Returns the HTTP status on 2xx.
    async fn add_item(&self, playlist_id: &str, item_uri: &str) -> PlexResult<u16>;

    /// Removes items by URI (comma-separated). Plex treats this as set
    /// membership: every occurrence of each item goes away.
    async fn remove_items(&self, playlist_id: &str, item_uris: &str) -> PlexResult<u16>;
}

#[async_trait]
impl PlaylistStore for PlexClient {
    async fn machine_identifier(&self) -> PlexResult<String> {
        Ok(self.identity().await?.machine_identifier)
    }

    async fn playlist_metadata(&self, playlist_id: &str) -> PlexResult<Playlist> {
        PlexClient::playlist_metadata(self, playlist_id).await
    }

    async fn playlist_items(&self, playlist_id: &str) -> PlexResult<MediaContainer<Item>> {
        PlexClient::playlist_items(self, playlist_id).await
    }

    async fn add_item(&self, playlist_id: &str, item_uri: &str) -> PlexResult<u16> {
        self.add_playlist_item(playlist_id, item_uri).await
    }

    async fn remove_items(&self, playlist_id: &str, item_uris: &str) -> PlexResult<u16> {
        self.remove_playlist_items(playlist_id, item_uris).await
    }
}
