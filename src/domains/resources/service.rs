//! Resource listing and reads.
//!
//! Answers resources/list and resources/read. Static documents come out of
//! the registry as-is; the server snapshot and playlist-items template hit
//! the Plex server at read time.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::definitions::PlaylistItemsResource;
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::plex::client::PlexClient;

/// Serves resource listings and reads.
///
/// Holds the fixed-URI registry built at startup. Dynamic resources and
/// template reads query the Plex server at read time.
pub struct ResourceService {
    /// Client for resources whose content is read live from the server.
    plex: Arc<PlexClient>,

    /// Fixed-URI resources, keyed by URI.
    resources: HashMap<String, ResourceEntry>,

    /// Templates for URIs with a parameter segment.
    templates: Vec<ResourceTemplate>,
}

/// One registered resource: metadata plus how to produce its content.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// Metadata advertised in resources/list.
    pub resource: Resource,

    /// Where this resource's content comes from.
    pub content: ResourceContent,
}

/// How a resource read is satisfied.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Text fixed at registration.
    Text(String),

    /// Dynamic content that requires a server round trip.
    Dynamic(DynamicResourceType),
}

/// The dynamic resources this server knows how to build.
#[derive(Debug, Clone)]
pub enum DynamicResourceType {
    /// Identity and library summary, fetched at read time.
    ServerSnapshot,
}

impl ResourceService {
    /// Create a new ResourceService backed by the given client.
    pub fn new(plex: Arc<PlexClient>) -> Self {
        let resources: HashMap<String, ResourceEntry> = get_all_resources()
            .into_iter()
            .map(|entry| (entry.resource.raw.uri.to_string(), entry))
            .collect();
        let templates = get_all_resource_templates();

        info!(
            "Registered {} resources and {} resource templates",
            resources.len(),
            templates.len()
        );

        Self {
            plex,
            resources,
            templates,
        }
    }

    /// Every fixed-URI resource, for resources/list.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Every template, for resources/templates/list.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Resolve a resources/read request.
    ///
    /// Fixed URIs are looked up in the registry. URIs that instantiate the
    /// playlist items template are resolved against the live server.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => ResourceContents::text(text, uri),
                ResourceContent::Dynamic(dynamic_type) => {
                    self.resolve_dynamic_content(uri, dynamic_type).await?
                }
            },
            None => match PlaylistItemsResource::playlist_id_from_uri(uri) {
                Some(playlist_id) => self.playlist_items_content(uri, playlist_id).await?,
                None => return Err(ResourceError::not_found(uri)),
            },
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Build the content for a dynamic fixed-URI resource.
    async fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: &DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerSnapshot => {
                let identity = self.plex.identity().await?;
                let sections = self.plex.sections().await?;
                let playlists = self.plex.playlists(None).await?;

                let info = serde_json::json!({
                    "machine_identifier": identity.machine_identifier,
                    "version": identity.version,
                    "sections": sections.iter().map(|section| {
                        serde_json::json!({
                            "key": section.key,
                            "title": section.title,
                            "type": section.section_type,
                        })
                    }).collect::<Vec<_>>(),
                    "playlist_count": playlists.len(),
                });

                Ok(ResourceContents::text(
                    serde_json::to_string_pretty(&info)
                        .map_err(|e| ResourceError::internal(e.to_string()))?,
                    uri,
                ))
            }
        }
    }

    /// Resolve a playlist items template read against the live server.
    async fn playlist_items_content(
        &self,
        uri: &str,
        playlist_id: &str,
    ) -> Result<ResourceContents, ResourceError> {
        let container = self.plex.playlist_items(playlist_id).await.map_err(|e| {
            if e.http_status() == Some(404) {
                ResourceError::not_found(uri)
            } else {
                ResourceError::from(e)
            }
        })?;

        let listing = serde_json::json!({
            "playlist_id": playlist_id,
            "title": container.title,
            "item_count": container.metadata.len(),
            "items": container.metadata.iter().map(|item| {
                serde_json::json!({
                    "key": item.rating_key,
                    "title": item.title,
                    "type": item.item_type,
                })
            }).collect::<Vec<_>>(),
        });

        Ok(ResourceContents::text(
            serde_json::to_string_pretty(&listing)
                .map_err(|e| ResourceError::internal(e.to_string()))?,
            uri,
        ))
    }
}
