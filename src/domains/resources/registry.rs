//! Resource registry.
//!
//! The single list of resources and URI templates the server offers.
//! `ResourceService` builds its lookup table from here, so an entry in
//! [`get_all_resources`] is all a new resource needs to be servable.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, ResourceTemplate};

use super::definitions::{
    MutationSemanticsResource, PlaylistItemsResource, ResourceDefinition, ServerInfoResource,
};
use super::service::ResourceEntry;

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Every fixed-URI resource.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<ServerInfoResource>(),
        build_resource::<MutationSemanticsResource>(),
    ]
}

/// Every parameterized resource, as RFC 6570 URI templates.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: PlaylistItemsResource::URI_TEMPLATE.to_string(),
            name: PlaylistItemsResource::NAME.to_string(),
            title: Some("Playlist Contents".to_string()),
            description: Some(PlaylistItemsResource::DESCRIPTION.to_string()),
            mime_type: Some(PlaylistItemsResource::MIME_TYPE.to_string()),
        }
        .no_annotation(),
    ]
}

/// URIs of every fixed resource.
pub fn resource_uris() -> Vec<&'static str> {
    vec![ServerInfoResource::URI, MutationSemanticsResource::URI]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 2);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert!(uris.contains(&"plex://server/info"));
        assert!(uris.contains(&"plex://server/mutation-semantics"));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(
            templates[0].raw.uri_template,
            "plex://playlists/{playlist_id}/items"
        );
    }

    #[test]
    fn test_resource_uris_match_registry() {
        let uris = resource_uris();
        let resources = get_all_resources();
        assert_eq!(uris.len(), resources.len());
        for entry in &resources {
            assert!(uris.contains(&entry.resource.raw.uri.as_str()));
        }
    }
}
