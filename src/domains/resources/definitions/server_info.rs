//! Live server snapshot resource.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Live snapshot of the connected Plex Media Server (dynamic).
///
/// Reading this resource queries the server, so the content reflects the
/// state at read time: identity, version, library sections, and playlist
/// count.
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "plex://server/info";
    const NAME: &'static str = "Plex Server Information";
    const DESCRIPTION: &'static str =
        "Identity, version, and library summary of the connected Plex Media Server";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerSnapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "plex://server/info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_server_info_is_dynamic() {
        match ServerInfoResource::content() {
            ResourceContent::Dynamic(DynamicResourceType::ServerSnapshot) => {}
            _ => panic!("Expected dynamic server snapshot content"),
        }
    }
}
