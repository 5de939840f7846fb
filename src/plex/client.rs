//! Reqwest-backed client for the Plex Media Server HTTP API.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::core::config::PlexConfig;
use crate::plex::error::{PlexError, PlexResult};
use crate::plex::types::{
    Envelope, Identity, IdentityEnvelope, Item, MediaContainer, Playlist, Section,
    SectionsEnvelope,
};

/// HTTP client bound to a single Plex server.
///
/// Authentication goes through the `X-Plex-Token` header on every request;
/// the token never appears in URLs, so request logging stays safe.
#[derive(Clone)]
pub struct PlexClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl PlexClient {
    /// Builds a client from configuration. Fails when the base URL does not
    /// parse or the HTTP client cannot be constructed.
    pub fn new(config: &PlexConfig) -> PlexResult<Self> {
        // A trailing slash keeps Url::join from eating the last path segment
        // when the server lives under a sub-path.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone().unwrap_or_default(),
        })
    }

    fn endpoint(&self, path: &str) -> PlexResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", "application/json")
            .header("X-Plex-Token", &self.token)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> PlexResult<T> {
        debug!(url = %url, "GET");
        self.decode(self.http.get(url)).await
    }

    /// Fetches one page of a list endpoint via the Plex container headers.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: Url,
        start: u32,
        size: u32,
    ) -> PlexResult<T> {
        debug!(url = %url, start, size, "GET (paged)");
        let request = self
            .http
            .get(url)
            .header("X-Plex-Container-Start", start.to_string())
            .header("X-Plex-Container-Size", size.to_string());
        self.decode(request).await
    }

    async fn decode<T: DeserializeOwned>(&self, request: RequestBuilder) -> PlexResult<T> {
        let response = self.authed(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlexError::Status {
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| PlexError::Decode(err.to_string()))
    }

    /// Sends a write request and returns the HTTP status, which is only
    /// ever an `Ok` when the server answered 2xx.
    async fn write(&self, request: RequestBuilder) -> PlexResult<u16> {
        let response = self.authed(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(PlexError::Status {
                status: status.as_u16(),
            })
        }
    }

    /// `GET /identity`. The machine identifier here is required to build
    /// item URIs for playlist writes.
    pub async fn identity(&self) -> PlexResult<Identity> {
        let url = self.endpoint("identity")?;
        let envelope: IdentityEnvelope = self.fetch(url).await?;
        let container = envelope.media_container;
        let machine_identifier = container
            .machine_identifier
            .ok_or(PlexError::MissingField("machineIdentifier"))?;
        Ok(Identity {
            machine_identifier,
            version: container.version,
        })
    }

    /// `GET /playlists`, optionally filtered by playlist type
    /// (`audio`, `video`, `photo`).
    pub async fn playlists(&self, playlist_type: Option<&str>) -> PlexResult<Vec<Playlist>> {
        let mut url = self.endpoint("playlists")?;
        if let Some(kind) = playlist_type {
            url.query_pairs_mut().append_pair("playlistType", kind);
        }
        let envelope: Envelope<Playlist> = self.fetch(url).await?;
        Ok(envelope.media_container.metadata)
    }

    /// `GET /playlists/{id}`: playlist metadata including `leafCount`.
    pub async fn playlist_metadata(&self, playlist_id: &str) -> PlexResult<Playlist> {
        let url = self.endpoint(&format!("playlists/{}", playlist_id))?;
        let envelope: Envelope<Playlist> = self.fetch(url).await?;
        envelope
            .media_container
            .metadata
            .into_iter()
            .next()
            .ok_or(PlexError::MissingField("Metadata"))
    }

    /// `GET /playlists/{id}/items`: the playlist's members. The container
    /// `title` carries the playlist title.
    pub async fn playlist_items(&self, playlist_id: &str) -> PlexResult<MediaContainer<Item>> {
        let url = self.endpoint(&format!("playlists/{}/items", playlist_id))?;
        let envelope: Envelope<Item> = self.fetch(url).await?;
        Ok(envelope.media_container)
    }

    /// `POST /playlists`: creates a playlist seeded with one item. Plex
    /// refuses to create a regular playlist without an initial `uri`.
    pub async fn create_playlist(
        &self,
        title: &str,
        playlist_type: &str,
        seed_uri: &str,
    ) -> PlexResult<Playlist> {
        let mut url = self.endpoint("playlists")?;
        url.query_pairs_mut()
            .append_pair("type", playlist_type)
            .append_pair("title", title)
            .append_pair("smart", "0")
            .append_pair("uri", seed_uri);
        let envelope: Envelope<Playlist> = self.decode(self.http.post(url)).await?;
        envelope
            .media_container
            .metadata
            .into_iter()
            .next()
            .ok_or(PlexError::MissingField("Metadata"))
    }

    /// `DELETE /playlists/{id}`.
    pub async fn delete_playlist(&self, playlist_id: &str) -> PlexResult<u16> {
        let url = self.endpoint(&format!("playlists/{}", playlist_id))?;
        self.write(self.http.delete(url)).await
    }

    /// `PUT /playlists/{id}/items?uri=...`: appends one item. A 2xx here
    /// only means the server accepted the write, not that the playlist
    /// already reflects it.
    pub async fn add_playlist_item(&self, playlist_id: &str, item_uri: &str) -> PlexResult<u16> {
        let mut url = self.endpoint(&format!("playlists/{}/items", playlist_id))?;
        url.query_pairs_mut().append_pair("uri", item_uri);
        self.write(self.http.put(url)).await
    }

    /// `DELETE /playlists/{id}/items?uri=...`: removes by membership. Plex
    /// drops every occurrence of each referenced item, so duplicates cannot
    /// be removed one copy at a time.
    pub async fn remove_playlist_items(
        &self,
        playlist_id: &str,
        item_uris: &str,
    ) -> PlexResult<u16> {
        let mut url = self.endpoint(&format!("playlists/{}/items", playlist_id))?;
        url.query_pairs_mut().append_pair("uri", item_uris);
        self.write(self.http.delete(url)).await
    }

    /// `GET /library/sections`.
    pub async fn sections(&self) -> PlexResult<Vec<Section>> {
        let url = self.endpoint("library/sections")?;
        let envelope: SectionsEnvelope = self.fetch(url).await?;
        Ok(envelope.media_container.directories)
    }

    /// `GET /library/sections/{id}/all`, one page.
    pub async fn section_items(
        &self,
        section_id: &str,
        type_code: Option<u32>,
        sort: Option<&str>,
        limit: u32,
    ) -> PlexResult<MediaContainer<Item>> {
        let mut url = self.endpoint(&format!("library/sections/{}/all", section_id))?;
        if let Some(code) = type_code {
            url.query_pairs_mut().append_pair("type", &code.to_string());
        }
        if let Some(sort) = sort {
            url.query_pairs_mut().append_pair("sort", sort);
        }
        let envelope: Envelope<Item> = self.fetch_page(url, 0, limit).await?;
        Ok(envelope.media_container)
    }

    /// Row count for a section without fetching rows: a zero-sized page
    /// still reports `totalSize`.
    pub async fn section_total(&self, section_id: &str) -> PlexResult<Option<u32>> {
        let url = self.endpoint(&format!("library/sections/{}/all", section_id))?;
        let envelope: Envelope<Item> = self.fetch_page(url, 0, 0).await?;
        let container = envelope.media_container;
        Ok(container.total_size.or(container.size))
    }

    /// Search, either across the whole server (`GET /search`) or scoped to
    /// one section (`GET /library/sections/{id}/search`).
    pub async fn search(
        &self,
        query: &str,
        section_id: Option<&str>,
        type_code: Option<u32>,
        limit: u32,
    ) -> PlexResult<Vec<Item>> {
        let path = match section_id {
            Some(id) => format!("library/sections/{}/search", id),
            None => "search".to_string(),
        };
        let mut url = self.endpoint(&path)?;
        url.query_pairs_mut().append_pair("query", query);
        if let Some(code) = type_code {
            url.query_pairs_mut().append_pair("type", &code.to_string());
        }
        let envelope: Envelope<Item> = self.fetch_page(url, 0, limit).await?;
        Ok(envelope.media_container.metadata)
    }

    /// `GET /library/recentlyAdded`, optionally scoped to one section.
    pub async fn recently_added(
        &self,
        section_id: Option<&str>,
        limit: u32,
    ) -> PlexResult<Vec<Item>> {
        let path = match section_id {
            Some(id) => format!("library/sections/{}/recentlyAdded", id),
            None => "library/recentlyAdded".to_string(),
        };
        let url = self.endpoint(&path)?;
        let envelope: Envelope<Item> = self.fetch_page(url, 0, limit).await?;
        Ok(envelope.media_container.metadata)
    }

    /// `GET /library/onDeck`: in-progress items across the server.
    pub async fn on_deck(&self, limit: u32) -> PlexResult<Vec<Item>> {
        let url = self.endpoint("library/onDeck")?;
        let envelope: Envelope<Item> = self.fetch_page(url, 0, limit).await?;
        Ok(envelope.media_container.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> PlexClient {
        PlexClient::new(&PlexConfig {
            base_url: base_url.to_string(),
            token: Some("secret".to_string()),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_join_plain_host() {
        let client = test_client("http://127.0.0.1:32400");
        let url = client.endpoint("playlists/5/items").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:32400/playlists/5/items");
    }

    #[test]
    fn test_endpoint_join_preserves_sub_path() {
        let client = test_client("http://media.local/plex");
        let url = client.endpoint("identity").unwrap();
        assert_eq!(url.as_str(), "http://media.local/plex/identity");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = PlexClient::new(&PlexConfig {
            base_url: "not a url".to_string(),
            token: None,
            request_timeout_secs: 5,
        });
        assert!(matches!(result, Err(PlexError::Url(_))));
    }

    #[test]
    fn test_missing_token_defaults_to_empty() {
        let client = PlexClient::new(&PlexConfig {
            base_url: "http://127.0.0.1:32400".to_string(),
            token: None,
            request_timeout_secs: 5,
        })
        .unwrap();
        assert!(client.token.is_empty());
    }
}
